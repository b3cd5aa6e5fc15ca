use anyhow::Context;
use wasp_config::WaspConfig;

/// Load layered configuration, including a `.env` file in the working
/// directory if one exists.
pub fn load_config() -> anyhow::Result<WaspConfig> {
    WaspConfig::load_with_dotenv().context("failed to load wasped configuration")
}
