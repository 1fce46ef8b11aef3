use crate::{
    domains::{SignupEmail, SignupRequest},
    email_client::MailTransport,
    telemetry::spawn_blocking_with_tracing,
};
use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use anyhow::Context;
use std::sync::Arc;

use super::error_chain_fmt;

const WELCOME_SUBJECT: &str = "Welcome to Vaulcrypt Waitlist";

const WELCOME_TEXT: &str = "Thank you for joining the Vaulcrypt waitlist! \
We're excited to have you on board.

We'll keep you updated on our progress and let you know when we're ready to launch.

Best regards,
The Vaulcrypt Team";

const WELCOME_HTML: &str = r#"
    <html>
      <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
        <h1 style="color: #4a5568;">Welcome to Vaulcrypt Waitlist!</h1>
        <p>Thank you for joining the Vaulcrypt waitlist! We're excited to have you on board.</p>
        <p>We'll keep you updated on our progress and let you know when we're ready to launch.</p>
        <p>Best regards,<br>The Vaulcrypt Team</p>
      </body>
    </html>"#;

#[derive(serde::Serialize)]
pub struct EmailResponse {
    pub message: String,
}

#[derive(thiserror::Error)]
pub enum SendEmailError {
    #[error("Valid email is required")]
    InvalidInput,
    #[error("Failed to send email")]
    DeliveryFailed(#[source] anyhow::Error),
}

impl std::fmt::Debug for SendEmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SendEmailError {
    fn status_code(&self) -> StatusCode {
        match self {
            SendEmailError::InvalidInput => StatusCode::BAD_REQUEST,
            SendEmailError::DeliveryFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(EmailResponse {
            message: self.to_string(),
        })
    }
}

// Any other method on /api/send-email lands here via the resource's
// default route.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(EmailResponse {
        message: "Method Not Allowed".to_string(),
    })
}

#[tracing::instrument(
    name = "Sending a waitlist welcome email",
    skip(body, mail_client),
    fields(signup_email = tracing::field::Empty)
)]
pub async fn send_email(
    body: Option<web::Json<serde_json::Value>>,
    mail_client: web::Data<dyn MailTransport>,
) -> Result<HttpResponse, SendEmailError> {
    let email = body
        .as_ref()
        .and_then(|body| body.get("email"))
        .and_then(serde_json::Value::as_str)
        .ok_or(SendEmailError::InvalidInput)?;
    let email = SignupEmail::parse(email.to_owned()).map_err(|_| SendEmailError::InvalidInput)?;
    tracing::Span::current().record("signup_email", &tracing::field::display(&email));

    send_welcome_email(mail_client.into_inner(), SignupRequest { email }).await?;

    Ok(HttpResponse::Ok().json(EmailResponse {
        message: "Email sent successfully".to_string(),
    }))
}

#[tracing::instrument(name = "Relaying the welcome email", skip(mail_client, signup))]
async fn send_welcome_email(
    mail_client: Arc<dyn MailTransport>,
    signup: SignupRequest,
) -> Result<(), SendEmailError> {
    // The SMTP client is blocking; keep it off the worker threads.
    spawn_blocking_with_tracing(move || {
        mail_client.send_email(&signup.email, WELCOME_SUBJECT, WELCOME_TEXT, WELCOME_HTML)
    })
    .await
    .context("Blocking send task failed")
    .map_err(SendEmailError::DeliveryFailed)?
    .map_err(|err| {
        tracing::error!("Error happened while sending the welcome email :{:?}", err);
        SendEmailError::DeliveryFailed(err)
    })
}
