//! Outbound email for password resets.

use std::path::Path;
use std::sync::Arc;

use lettre::{
    AsyncFileTransport, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use storage::models::Role;

use crate::config::{EmailConfig, EmailTransportConfig};
use crate::error::WebError;

#[derive(Clone)]
pub struct Mailer {
    inner: Arc<MailerInner>,
}

struct MailerInner {
    transport: Transport,
    from: Mailbox,
    frontend_url: String,
}

enum Transport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    File(AsyncFileTransport<Tokio1Executor>),
}

impl Mailer {
    pub fn new(config: &EmailConfig) -> Result<Self, WebError> {
        let transport = match &config.transport {
            EmailTransportConfig::Smtp {
                host,
                port,
                username,
                password,
            } => {
                let smtp = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .map_err(|e| WebError::internal(format!("create SMTP transport: {e}")))?
                    .port(*port)
                    .credentials(Credentials::new(username.clone(), password.clone()))
                    .build();
                Transport::Smtp(smtp)
            }
            EmailTransportConfig::File { path } => {
                let dir = Path::new(path);
                std::fs::create_dir_all(dir)
                    .map_err(|e| WebError::internal(format!("create email directory: {e}")))?;
                Transport::File(AsyncFileTransport::<Tokio1Executor>::new(dir))
            }
        };

        let from = format!("{} <{}>", config.from_name, config.from_email)
            .parse::<Mailbox>()
            .map_err(|e| WebError::internal(format!("parse from address: {e}")))?;

        Ok(Self {
            inner: Arc::new(MailerInner {
                transport,
                from,
                frontend_url: config.frontend_url.trim_end_matches('/').to_string(),
            }),
        })
    }

    pub fn reset_link(&self, role: Role, token: &str) -> String {
        format!("{}/{}/reset-password/{}", self.inner.frontend_url, role, token)
    }

    pub async fn send_password_reset(
        &self,
        role: Role,
        to_email: &str,
        to_name: &str,
        token: &str,
    ) -> Result<(), WebError> {
        let link = self.reset_link(role, token);
        let body = format!(
            "<p>Hello {to_name},</p>\
             <p>You requested a password reset. Open the link below within one hour to choose a new password:</p>\
             <p><a href=\"{link}\">{link}</a></p>\
             <p>If you did not request this, you can ignore this email.</p>"
        );

        let to = to_email
            .parse::<Mailbox>()
            .map_err(|e| WebError::internal(format!("parse recipient: {e}")))?;

        let message = Message::builder()
            .from(self.inner.from.clone())
            .to(to)
            .subject("Password Reset Request")
            .header(ContentType::TEXT_HTML)
            .body(body)
            .map_err(|e| WebError::internal(format!("build email: {e}")))?;

        match &self.inner.transport {
            Transport::Smtp(smtp) => {
                smtp.send(message)
                    .await
                    .map_err(|e| WebError::internal(format!("send SMTP email: {e}")))?;
            }
            Transport::File(file) => {
                file.send(message)
                    .await
                    .map_err(|e| WebError::internal(format!("write email file: {e}")))?;
            }
        }

        tracing::info!(%role, "Password reset email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_config(dir: &Path) -> EmailConfig {
        EmailConfig {
            transport: EmailTransportConfig::File {
                path: dir.to_string_lossy().into_owned(),
            },
            from_email: "noreply@playbit.local".into(),
            from_name: "PlayBit Sports".into(),
            frontend_url: "http://localhost:3000/".into(),
        }
    }

    #[test]
    fn test_reset_link_format() {
        let dir = std::env::temp_dir().join(format!("mailer-{}", uuid::Uuid::new_v4()));
        let mailer = Mailer::new(&file_config(&dir)).unwrap();
        assert_eq!(
            mailer.reset_link(Role::Coach, "tok"),
            "http://localhost:3000/coach/reset-password/tok"
        );
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_file_transport_writes_message() {
        let dir = std::env::temp_dir().join(format!("mailer-{}", uuid::Uuid::new_v4()));
        let mailer = Mailer::new(&file_config(&dir)).unwrap();

        mailer
            .send_password_reset(Role::Athlete, "a@x.com", "Asha", "tok123")
            .await
            .unwrap();

        let files: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert_eq!(files.len(), 1);
        std::fs::remove_dir_all(dir).ok();
    }
}
