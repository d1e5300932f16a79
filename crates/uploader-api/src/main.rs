use uploader_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, collaborators, routes)
    let (_state, router) = uploader_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    uploader_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
