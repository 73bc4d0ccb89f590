//! `logfwd config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use logfwd_core::config::LogfwdConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Sections accepted by `config show --section`.
pub const SECTIONS: [&str; 4] = ["general", "log_store", "operator", "secrets"];

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => execute_show(config_path, section, writer).await,
    }
}

/// Load and validate the configuration file, reporting any errors.
///
/// # Errors
///
/// Returns `CliError::Config` if the file is missing, unparsable or invalid.
async fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let errors = match LogfwdConfig::load(config_path).await {
        Ok(_) => Vec::new(),
        Err(e) => vec![e.to_string()],
    };
    let report = ConfigValidationReport {
        source: config_path.display().to_string(),
        valid: errors.is_empty(),
        errors,
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Display the effective configuration (file + env overrides + defaults).
async fn execute_show(
    config_path: &Path,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let config = LogfwdConfig::load(config_path).await?;
    let report = ConfigReport {
        source: config_path.display().to_string(),
        config_toml: section_toml(&config, section.as_deref())?,
        section,
    };

    writer.render(&report)
}

/// Serialize the whole config or one of its sections as TOML.
fn section_toml(config: &LogfwdConfig, section: Option<&str>) -> Result<String, CliError> {
    let rendered = match section {
        None => toml::to_string_pretty(config),
        Some("general") => toml::to_string_pretty(&config.general),
        Some("log_store") => toml::to_string_pretty(&config.log_store),
        Some("operator") => toml::to_string_pretty(&config.operator),
        Some("secrets") => toml::to_string_pretty(&config.secrets),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: {})",
                other,
                SECTIONS.join(", ")
            )));
        }
    };
    Ok(rendered.unwrap_or_else(|e| format!("(serialization error: {})", e)))
}

/// Configuration display report.
///
/// `config_toml` is only used for text rendering.
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration file path
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Serialized TOML configuration
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        match self.section {
            Some(ref section) => writeln!(
                w,
                "Configuration {} (source: {})",
                format!("[{}]", section).bold(),
                self.source
            )?,
            None => writeln!(w, "Configuration (source: {})", self.source.bold())?,
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration file path
    pub source: String,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_toml_known_sections() {
        let config = LogfwdConfig::default();
        for section in SECTIONS {
            let rendered = section_toml(&config, Some(section)).expect("known section");
            assert!(!rendered.starts_with("(serialization error"), "{section}");
        }
        let operator = section_toml(&config, Some("operator")).expect("operator");
        assert!(operator.contains("collector_secret_name"));
    }

    #[test]
    fn test_section_toml_unknown_section() {
        let err = section_toml(&LogfwdConfig::default(), Some("database")).unwrap_err();
        assert!(matches!(err, CliError::Command(_)));
        assert!(err.to_string().contains("log_store"));
    }

    #[test]
    fn test_validation_report_text() {
        colored::control::set_override(false);
        let report = ConfigValidationReport {
            source: "logfwd.toml".to_owned(),
            valid: false,
            errors: vec!["bad store".to_owned()],
        };
        let mut buffer = Vec::new();
        report.render_text(&mut buffer).expect("should render");
        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("INVALID"));
        assert!(output.contains("Error: bad store"));
    }

    #[test]
    fn test_config_report_skips_toml_in_json() {
        let report = ConfigReport {
            source: "logfwd.toml".to_owned(),
            section: None,
            config_toml: "[general]".to_owned(),
        };
        let value = serde_json::to_value(&report).expect("should serialize");
        assert!(value.get("config_toml").is_none());
        assert!(value.get("section").is_none());
    }
}
