use vaulcrypt::{
    configuration::get_configuration,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("vaulcrypt".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let settings = get_configuration().expect("Unable to read configuration files");

    let app = Application::build(&settings).await?;
    app.run_until_stopped().await?;
    Ok(())
}
