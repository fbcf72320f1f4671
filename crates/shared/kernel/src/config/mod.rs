use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides (`TPLAT__OVERLAY__DIRECTORY` maps to `overlay.directory`).
pub const ENV_PREFIX: &str = "TPLAT";
const DEFAULT_CONFIG_FILE: &str = "catalog";

/// Custom error type for config loading.
#[tplat_derive::tplat_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader: a required base file overlaid with environment variables.
///
/// 1. **Base File**: any format the `config` crate detects from the extension. Without a
///    path, `catalog` in the current working directory is used.
/// 2. **Environment Overrides**: variables prefixed with `TPLAT__`, nested keys separated
///    by double underscores.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file cannot be found or the merged values do not
/// deserialize into `T`.
///
/// # Example
/// ```rust,no_run
/// use tplat_kernel::config::load_config;
/// use tplat_kernel::domain::config::CatalogConfig;
///
/// let cfg: CatalogConfig = load_config(Some("config/catalog.toml")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), "Loading catalog config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
