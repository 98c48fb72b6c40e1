use stay_backend::{config::Config, logging, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    run(config).await?;
    Ok(())
}
