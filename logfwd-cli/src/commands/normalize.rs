//! `logfwd normalize` command handler

use std::io::Write;

use serde::Serialize;

use logfwd_core::config::LogfwdConfig;
use logfwd_core::types::ForwardingSpec;
use logfwd_forwarding::{EntityStatus, ForwardingStatus, State, StatusSummary};

use crate::cli::NormalizeArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `normalize` command.
pub async fn execute(
    args: NormalizeArgs,
    config: LogfwdConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let normalized = super::run_normalization(&args.spec, &args.store, &config).await?;

    let report = NormalizeReport {
        source: args.spec.display().to_string(),
        summary: normalized.status.summary(),
        status: normalized.status,
        spec: normalized.spec,
    };
    writer.render(&report)
}

/// Normalization report: the normalized spec plus its status.
#[derive(Serialize)]
pub struct NormalizeReport {
    /// Spec file path
    pub source: String,
    /// Counts per state
    pub summary: StatusSummary,
    /// Per-entity status
    pub status: ForwardingStatus,
    /// Normalized spec
    pub spec: ForwardingSpec,
}

impl Render for NormalizeReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Normalized: {}", self.source.bold())?;
        render_status(w, &self.status)?;

        writeln!(w)?;
        writeln!(w, "{}", "Normalized spec:".bold())?;
        let yaml = serde_yaml::to_string(&self.spec)
            .unwrap_or_else(|e| format!("(serialization error: {})", e));
        write!(w, "{}", yaml)?;

        Ok(())
    }
}

/// Render the summary line and per-entity status tables.
pub(crate) fn render_status(w: &mut dyn Write, status: &ForwardingStatus) -> std::io::Result<()> {
    let summary = status.summary();
    writeln!(
        w,
        "  Outputs:   {} accepted, {} dropped",
        summary.outputs_accepted, summary.outputs_dropped
    )?;
    writeln!(
        w,
        "  Pipelines: {} accepted, {} degraded, {} dropped",
        summary.pipelines_accepted, summary.pipelines_degraded, summary.pipelines_dropped
    )?;
    let sources: Vec<String> = status.log_sources.iter().map(|s| s.to_string()).collect();
    writeln!(w, "  Log sources: {}", sources.join(", "))?;

    writeln!(w)?;
    writeln!(w, "{:<32} {:<10}", "OUTPUT", "STATE")?;
    writeln!(w, "{}", "-".repeat(43))?;
    for entity in &status.outputs {
        render_entity(w, entity)?;
    }

    writeln!(w)?;
    writeln!(w, "{:<32} {:<10}", "PIPELINE", "STATE")?;
    writeln!(w, "{}", "-".repeat(43))?;
    for entity in &status.pipelines {
        render_entity(w, entity)?;
    }

    Ok(())
}

fn render_entity(w: &mut dyn Write, entity: &EntityStatus) -> std::io::Result<()> {
    use colored::Colorize;

    let state = match entity.state {
        State::Accepted => entity.state.to_string().green(),
        State::Degraded => entity.state.to_string().yellow(),
        State::Dropped => entity.state.to_string().red(),
    };
    writeln!(w, "{:<32} {:<10}", entity.name, state)?;
    for condition in &entity.conditions {
        writeln!(
            w,
            "    {:?}/{:?}: {}",
            condition.condition_type, condition.reason, condition.message
        )?;
    }
    Ok(())
}
