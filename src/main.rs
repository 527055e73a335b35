use anyhow::Result;
use tracing::{debug, info};

use concert_agent::app;
use concert_agent::config::{AppConfig, EnvConfig};
use concert_agent::logging;
use concert_agent::providers::configs::OpenAiProviderConfig;
use concert_agent::providers::openai::OpenAiProvider;

fn main() -> Result<()> {
    let _logging = logging::init();

    info!("Loading .env file");
    if let Ok(path) = dotenv::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }

    // Fail before any work if the key is missing
    let provider_config = OpenAiProviderConfig::from_env()?;
    let app_config = AppConfig::from_env()?;

    let provider = OpenAiProvider::new(provider_config)?;
    info!("Client: {:?}", provider.config());

    app::run(&provider, &app_config)?;
    Ok(())
}
