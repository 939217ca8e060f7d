//! `SeaORM` entity definitions.

pub mod applications;
pub mod sea_orm_active_enums;
pub mod sessions;
pub mod site_content;
pub mod users;
