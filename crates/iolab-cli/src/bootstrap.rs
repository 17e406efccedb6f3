use anyhow::Context;
use iolab_config::IoLabConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered config, honouring `--config`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<IoLabConfig> {
    let config = IoLabConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load iolab configuration")?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}
