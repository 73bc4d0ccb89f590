//! Command handlers -- one module per subcommand

pub mod config;
pub mod normalize;
pub mod validate;

use std::path::Path;

use tracing::{info, warn};

use logfwd_core::config::LogfwdConfig;
use logfwd_core::types::{LogStoreSpec, LogStoreType};
use logfwd_forwarding::{DirSecretStore, Normalized, Normalizer, NormalizerConfig, load_spec};

use crate::cli::{DEFAULT_CONFIG_PATH, StoreArgs};
use crate::error::CliError;

/// Load the configuration file.
///
/// A missing file at the default path falls back to built-in defaults
/// (with env overrides); a missing file at an explicit path is an error.
pub async fn load_config(path: &Path) -> Result<LogfwdConfig, CliError> {
    if path == Path::new(DEFAULT_CONFIG_PATH) && !tokio::fs::try_exists(path).await? {
        warn!(
            path = %path.display(),
            "configuration file not found, using defaults"
        );
        let mut config = LogfwdConfig::default();
        config.apply_env_overrides();
        config.validate()?;
        return Ok(config);
    }
    Ok(LogfwdConfig::load(path).await?)
}

/// Resolve the effective log store from config and CLI overrides.
fn resolve_store(config: &LogfwdConfig, args: &StoreArgs) -> Result<Option<LogStoreSpec>, CliError> {
    let mut store = config.log_store.clone();

    if let Some(raw) = &args.store {
        store.store_type = LogStoreType::from_str_loose(raw).ok_or_else(|| {
            CliError::Command(format!(
                "unknown log store type: {raw} (expected: none, elasticsearch, lokistack)"
            ))
        })?;
    }
    if let Some(name) = &args.store_name {
        store.name = name.clone();
    }

    Ok(store.to_spec())
}

/// Load a spec file and normalize it with the configured store and secrets.
pub async fn run_normalization(
    spec_path: &Path,
    args: &StoreArgs,
    config: &LogfwdConfig,
) -> Result<Normalized, CliError> {
    let spec = load_spec(spec_path).await?;
    let store = resolve_store(config, args)?;
    let secrets_dir = args
        .secrets_dir
        .clone()
        .unwrap_or_else(|| config.secrets.dir.clone().into());

    let normalizer_config = NormalizerConfig::from_core(&config.operator);
    normalizer_config.validate()?;

    info!(
        spec = %spec_path.display(),
        store = %store.as_ref().map(|s| s.store_type).unwrap_or_default(),
        secrets_dir = %secrets_dir.display(),
        "normalizing forwarding spec"
    );

    let normalizer = Normalizer::new(normalizer_config, DirSecretStore::new(secrets_dir));
    Ok(normalizer.normalize(&spec, store.as_ref())?)
}
