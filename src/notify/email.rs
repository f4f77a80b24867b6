//! # Email Notifications
//!
//! Email sending for travel-request status changes.

use std::sync::Arc;

use crate::travel::TravelRequest;

use super::errors::{NotifyError, NotifyResult};

/// Email configuration
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server host
    pub smtp_host: String,

    /// SMTP server port
    pub smtp_port: u16,

    /// SMTP username
    pub smtp_user: String,

    /// SMTP password (should come from secrets)
    pub smtp_password: String,

    /// From email address
    pub from_email: String,

    /// From name
    pub from_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_user: String::new(),
            smtp_password: String::new(),
            from_email: "noreply@tripdesk.local".to_string(),
            from_name: "TripDesk".to_string(),
        }
    }
}

/// Email template types
#[derive(Debug, Clone)]
pub enum EmailTemplate {
    /// A travel request was approved
    RequestApproved {
        recipient: String,
        request: TravelRequest,
    },

    /// A travel request was cancelled
    RequestCancelled {
        recipient: String,
        request: TravelRequest,
    },
}

/// Email sender trait for abstraction
pub trait EmailSender: Send + Sync {
    /// Send an email
    fn send(&self, template: EmailTemplate) -> NotifyResult<()>;
}

/// Mock email sender for testing
#[derive(Debug, Default)]
pub struct MockEmailSender {
    /// Sent emails (for testing)
    pub sent: std::sync::RwLock<Vec<EmailTemplate>>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of sent emails
    pub fn sent_count(&self) -> usize {
        self.sent.read().unwrap().len()
    }
}

impl EmailSender for MockEmailSender {
    fn send(&self, template: EmailTemplate) -> NotifyResult<()> {
        self.sent.write().unwrap().push(template);
        Ok(())
    }
}

/// SMTP email sender
pub struct SmtpEmailSender {
    config: EmailConfig,
}

impl SmtpEmailSender {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn render_template(&self, template: &EmailTemplate) -> (String, String, String) {
        match template {
            EmailTemplate::RequestApproved { recipient, request } => {
                let subject = "Your travel request was approved".to_string();
                let body = format!(
                    "Hello,\n\n\
                    Your travel request \"{}\" to {} has been approved.\n\n\
                    Departure: {}\n\
                    Return: {}\n\n\
                    Safe travels,\n\
                    The TripDesk Team",
                    request.name, request.country, request.departure_date, request.return_date
                );
                (recipient.clone(), subject, body)
            }
            EmailTemplate::RequestCancelled { recipient, request } => {
                let subject = "Your travel request was cancelled".to_string();
                let body = format!(
                    "Hello,\n\n\
                    Your travel request \"{}\" to {} has been cancelled.\n\n\
                    If you believe this is a mistake, please contact your\n\
                    travel administrator.\n\n\
                    Thanks,\n\
                    The TripDesk Team",
                    request.name, request.country
                );
                (recipient.clone(), subject, body)
            }
        }
    }
}

impl EmailSender for SmtpEmailSender {
    fn send(&self, template: EmailTemplate) -> NotifyResult<()> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials, Message,
            SmtpTransport, Transport,
        };

        let (to, subject, body) = self.render_template(&template);

        let email = Message::builder()
            .from(
                format!("{} <{}>", self.config.from_name, self.config.from_email)
                    .parse()
                    .map_err(|e| NotifyError::Email(format!("Invalid from address: {}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| NotifyError::Email(format!("Invalid to address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| NotifyError::Email(format!("Failed to build email: {}", e)))?;

        let mailer = if self.config.smtp_user.is_empty() {
            // No authentication (local development SMTP servers)
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_user.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| NotifyError::Email(format!("SMTP relay error: {}", e)))?
                .credentials(creds)
                .port(self.config.smtp_port)
                .build()
        };

        mailer
            .send(&email)
            .map_err(|e| NotifyError::Email(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}

/// Create a boxed email sender based on config
pub fn create_email_sender(config: Option<EmailConfig>) -> Arc<dyn EmailSender> {
    match config {
        Some(cfg) => Arc::new(SmtpEmailSender::new(cfg)),
        None => Arc::new(MockEmailSender::new()),
    }
}
