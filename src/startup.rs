use crate::configuration::Settings;
use crate::email_client::{EmailClient, MailTransport};
use crate::routes::{health_check, method_not_allowed, send_email};
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn build(settings: &Settings) -> Result<Self, anyhow::Error> {
        let email_client = EmailClient::new(&settings.email_client)?;
        Self::build_with_transport(settings, Arc::new(email_client)).await
    }

    // The transport is injected so the API tests can substitute a
    // recording fake for the SMTP relay.
    pub async fn build_with_transport(
        settings: &Settings,
        mail_client: Arc<dyn MailTransport>,
    ) -> Result<Self, anyhow::Error> {
        let listener = TcpListener::bind(format!(
            "{}:{}",
            settings.application.host, settings.application.port
        ))?;
        let port = listener.local_addr()?.port();
        let server = run(listener, mail_client)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

fn run(listener: TcpListener, mail_client: Arc<dyn MailTransport>) -> Result<Server, std::io::Error> {
    let mail_client = web::Data::from(mail_client);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(mail_client.clone())
            .service(health_check)
            .service(
                web::resource("/api/send-email")
                    .route(web::post().to(send_email))
                    .default_service(web::route().to(method_not_allowed)),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
