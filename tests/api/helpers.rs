use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use vaulcrypt::{
    configuration::get_configuration,
    domains::SignupEmail,
    email_client::MailTransport,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

#[derive(Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

// Stands in for the SMTP relay; records every send attempt and can be
// told to fail them.
pub struct FakeMailTransport {
    sent: Mutex<Vec<SentEmail>>,
    fail: AtomicBool,
}

impl FakeMailTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn fail_sends(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn sent_emails(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

impl MailTransport for FakeMailTransport {
    fn send_email(
        &self,
        recipient: &SignupEmail,
        subject: &str,
        text_content: &str,
        html_content: &str,
    ) -> Result<(), anyhow::Error> {
        self.sent.lock().unwrap().push(SentEmail {
            to: recipient.as_ref().to_owned(),
            subject: subject.to_owned(),
            text: text_content.to_owned(),
            html: html_content.to_owned(),
        });
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("SMTP relay is down");
        }
        Ok(())
    }
}

pub struct TestApp {
    pub address: String,
    pub mail_transport: Arc<FakeMailTransport>,
}

impl TestApp {
    pub async fn post_send_email(&self, body: &serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/api/send-email", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_send_email(&self) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}/api/send-email", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber("test".into(), "debug".into(), std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber("test".into(), "debug".into(), std::io::sink);
        init_subscriber(subscriber);
    }
});

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    std::env::set_var("APP_ENVIRONMENT", "test");

    let configuration = {
        let mut config = get_configuration().expect("Unable to read configuration files");
        // Use random os port
        config.application.port = 0;
        config
    };

    let mail_transport = Arc::new(FakeMailTransport::new());

    let app = Application::build_with_transport(&configuration, mail_transport.clone())
        .await
        .expect("Failed to build application");

    let address = format!("http://127.0.0.1:{}", app.port());
    let _ = tokio::spawn(app.run_until_stopped());

    TestApp {
        address,
        mail_transport,
    }
}
