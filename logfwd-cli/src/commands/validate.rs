//! `logfwd validate` command handler

use std::io::Write;

use serde::Serialize;

use logfwd_core::config::LogfwdConfig;
use logfwd_forwarding::{ForwardingStatus, StatusSummary};

use crate::cli::ValidateArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `validate` command.
///
/// Returns `CliError::Rejected` (exit code 3) when any output or pipeline
/// was dropped or degraded.
pub async fn execute(
    args: ValidateArgs,
    config: LogfwdConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let normalized = super::run_normalization(&args.spec, &args.store, &config).await?;

    let report = ValidationReport {
        source: args.spec.display().to_string(),
        valid: normalized.status.is_fully_accepted(),
        summary: normalized.status.summary(),
        status: normalized.status,
    };
    writer.render(&report)?;

    if !report.valid {
        let s = report.summary;
        return Err(CliError::Rejected(format!(
            "{} outputs dropped, {} pipelines degraded, {} pipelines dropped",
            s.outputs_dropped, s.pipelines_degraded, s.pipelines_dropped
        )));
    }

    Ok(())
}

/// Spec validation report.
#[derive(Serialize)]
pub struct ValidationReport {
    /// Spec file path
    pub source: String,
    /// Whether every entity was accepted
    pub valid: bool,
    /// Counts per state
    pub summary: StatusSummary,
    /// Per-entity status
    pub status: ForwardingStatus,
}

impl Render for ValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Spec Validation: {}", self.source.bold())?;
        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
        }
        super::normalize::render_status(w, &self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logfwd_forwarding::{EntityStatus, State};

    #[test]
    fn test_render_invalid_report() {
        colored::control::set_override(false);
        let mut degraded = EntityStatus::new("app");
        degraded.state = State::Degraded;
        let status = ForwardingStatus {
            pipelines: vec![degraded],
            ..ForwardingStatus::default()
        };
        let report = ValidationReport {
            source: "spec.yaml".to_owned(),
            valid: status.is_fully_accepted(),
            summary: status.summary(),
            status,
        };

        let mut buffer = Vec::new();
        report.render_text(&mut buffer).expect("should render");
        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("INVALID"));
        assert!(output.contains("1 degraded"));
    }
}
