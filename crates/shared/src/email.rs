//! Email relay for contact-form submissions and password-reset mail.
//!
//! Uses `lettre` for SMTP transport. When `EmailConfig.enabled` is false
//! every send is a silent no-op, which keeps local development free of an
//! SMTP dependency.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType, transport::smtp::authentication::Credentials,
};
use thiserror::Error;

use crate::config::EmailConfig;

/// Email service errors.
#[derive(Debug, Error)]
pub enum EmailError {
    /// Failed to build email message.
    #[error("Failed to build email: {0}")]
    BuildError(String),
    /// Failed to send email.
    #[error("Failed to send email: {0}")]
    SendError(String),
    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// Email relay for outbound mail.
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    /// Creates a new email service.
    #[must_use]
    pub const fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn create_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)
            .map_err(|e| EmailError::SendError(e.to_string()))?
            .port(self.config.smtp_port)
            .credentials(creds)
            .build();

        Ok(transport)
    }

    /// Relays a contact-form submission to the configured support inbox.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be sent.
    pub async fn relay_contact_message(
        &self,
        sender_name: &str,
        sender_email: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), EmailError> {
        let body = format!(
            "Contact form submission\n\nFrom: {sender_name} <{sender_email}>\n\n{message}"
        );
        let subject = format!("[Contact] {subject}");

        let inbox = self.config.contact_inbox.clone();
        self.send_email(&inbox, &subject, &body).await
    }

    /// Sends a password-reset notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be sent.
    pub async fn send_password_reset(
        &self,
        to_email: &str,
        to_name: &str,
    ) -> Result<(), EmailError> {
        let subject = "Password reset - Meridian Capital";
        let body = format!(
            r"Hi {to_name},

We received a request to reset the password for your Meridian Capital account.

If you made this request, please contact support to complete the reset.
If you didn't, you can safely ignore this email.

Best regards,
The Meridian Capital Team"
        );

        self.send_email(to_email, subject, &body).await
    }

    /// Sends a generic email.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be sent.
    pub async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), EmailError> {
        if !self.config.enabled {
            return Ok(());
        }

        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| EmailError::BuildError(e.to_string()))?;

        let transport = self.create_transport()?;
        transport
            .send(email)
            .await
            .map_err(|e| EmailError::SendError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_service_sends_nothing() {
        let service = EmailService::new(EmailConfig::default());
        // No SMTP server is running; this only passes because disabled
        // sends are no-ops.
        service
            .send_email("someone@example.com", "subject", "body")
            .await
            .expect("disabled send should be a no-op");
    }

    #[tokio::test]
    async fn test_invalid_address_rejected_when_enabled() {
        let config = EmailConfig {
            enabled: true,
            ..EmailConfig::default()
        };
        let service = EmailService::new(config);
        let result = service.send_email("not-an-address", "subject", "body").await;
        assert!(matches!(result, Err(EmailError::InvalidAddress(_))));
    }
}
