use crate::configuration::EmailClientSettings;
use crate::domains::SignupEmail;
use anyhow::Context;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::ExposeSecret;

// Seam between the submission handler and the outbound relay. The only
// contract the handler relies on: accept from/to/subject/text/html and
// either succeed or error. Implemented by `EmailClient` in production
// and by a recording fake in the API tests.
pub trait MailTransport: Send + Sync {
    fn send_email(
        &self,
        recipient: &SignupEmail,
        subject: &str,
        text_content: &str,
        html_content: &str,
    ) -> Result<(), anyhow::Error>;
}

pub struct EmailClient {
    transport: SmtpTransport,
    sender: Mailbox,
}

impl EmailClient {
    pub fn new(settings: &EmailClientSettings) -> Result<Self, anyhow::Error> {
        let sender_email = settings
            .sender()
            .map_err(|e| anyhow::anyhow!(e))
            .context("Invalid sender address in configuration")?;
        let sender = sender_email
            .as_ref()
            .parse::<Mailbox>()
            .context("Sender address is not a valid mailbox")?;

        let builder = if settings.secure {
            SmtpTransport::relay(&settings.host)
        } else {
            SmtpTransport::starttls_relay(&settings.host)
        }
        .context("Failed to set up the SMTP relay")?;

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.expose_secret().to_owned(),
            ))
            .timeout(Some(settings.timeout()))
            .build();

        Ok(Self { transport, sender })
    }
}

impl MailTransport for EmailClient {
    fn send_email(
        &self,
        recipient: &SignupEmail,
        subject: &str,
        text_content: &str,
        html_content: &str,
    ) -> Result<(), anyhow::Error> {
        let message = Message::builder()
            .from(self.sender.clone())
            .to(recipient
                .as_ref()
                .parse::<Mailbox>()
                .context("Recipient is not a valid mailbox")?)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(
                text_content.to_string(),
                html_content.to_string(),
            ))
            .context("Failed to build the email message")?;

        // One attempt per call, no retry. Duplicate welcome emails on
        // client retries are accepted behaviour.
        self.transport
            .send(&message)
            .context("SMTP relay rejected the message")?;
        Ok(())
    }
}
