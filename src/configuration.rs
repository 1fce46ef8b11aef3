use crate::domains::SignupEmail;
use config::File;
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailClientSettings {
    pub host: String,
    #[serde(
        default = "default_smtp_port",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub port: u16,
    // Implicit TLS when true, STARTTLS upgrade otherwise.
    pub secure: bool,
    pub username: String,
    pub password: Secret<String>,
    pub from_email: String,
    pub timeout_milliseconds: u64,
}

fn default_smtp_port() -> u16 {
    587
}

impl EmailClientSettings {
    pub fn sender(&self) -> Result<SignupEmail, String> {
        SignupEmail::parse(self.from_email.clone())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let config_directory = base_path.join("configuration");
    // Add configuration values from a file named `configuration`.
    // It will look for any top-level file with an extension
    // that `config` knows how to parse: yaml, json, etc.

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse app environment");

    let env_file_name = format!("{}.yaml", environment.as_str());

    let config = config::Config::builder()
        .add_source(File::from(config_directory.join("base.yaml")))
        .add_source(File::from(config_directory.join(env_file_name)))
        // SMTP credentials come in via APP_EMAIL_CLIENT__USERNAME etc.
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .expect("Unable to deserialize config values");

    return config.try_deserialize::<Settings>();
}

pub enum Environment {
    Local,
    Test,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "test" => Ok(Self::Test),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} not a suppported environment. Use either `local`, `test` or `production`",
                other
            )),
        }
    }
}
