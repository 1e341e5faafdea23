//! `certdrift check` - one detection run.

use anyhow::{Context as _, Result};
use certdrift_core::{NoopNotifier, Notifier, Orchestrator, RunReport, Verdict};
use colored::Colorize;
use std::process::ExitCode;

use super::Context;
use crate::alert::TerminalAlert;
use crate::cli::args::CheckArgs;
use crate::exit;
use crate::output::OutputFormat;

/// Execute the check command.
pub async fn execute(ctx: Context, args: CheckArgs) -> Result<ExitCode> {
    let mut config = ctx.config;
    if let Some(tool) = args.tool {
        config.tool.program = tool;
    }
    if let Some(secs) = args.timeout {
        config.tool.timeout_secs = secs;
    }
    config.validate()?;

    let notifier: Box<dyn Notifier> = if args.headless {
        Box::new(NoopNotifier)
    } else {
        Box::new(TerminalAlert::new())
    };

    let orchestrator = Orchestrator::from_config(&config, notifier);
    let working_dir = orchestrator.layout().working_dir().display().to_string();
    let report = orchestrator
        .run()
        .await
        .with_context(|| format!("Detection run in {working_dir} failed"))?;

    match ctx.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Pretty => print_report(&report, ctx.verbose),
    }

    Ok(ExitCode::from(match report.verdict {
        Verdict::Match => exit::MATCH,
        Verdict::Drift => exit::DRIFT,
    }))
}

fn print_report(report: &RunReport, verbose: bool) {
    let verdict = match report.verdict {
        Verdict::Match => report.verdict.to_string().bright_green().bold(),
        Verdict::Drift => report.verdict.to_string().bright_red().bold(),
    };

    println!();
    println!("  {} {}", "Verdict:".bold(), verdict);
    println!(
        "  {} {}",
        "Records:".bold(),
        report.records.to_string().bright_white()
    );
    if report.stderr_warning {
        println!(
            "  {} {}",
            "Warning:".bright_yellow().bold(),
            "enumeration tool wrote to stderr, see the run log".bright_yellow()
        );
    }
    if let Some(reason) = &report.alert_error {
        println!(
            "  {} {}",
            "Alert:".bright_yellow().bold(),
            format!("could not be raised ({reason})").bright_yellow()
        );
    }
    if verbose || report.verdict.is_drift() {
        println!(
            "  {} {}",
            "Results:".bold(),
            report.results_fingerprint.to_string().dimmed()
        );
        println!(
            "  {} {}",
            "Baseline:".bold(),
            report.baseline_fingerprint.to_string().dimmed()
        );
    }
    println!(
        "  {} {}",
        "Directory:".bold(),
        report.working_dir.display().to_string().dimmed()
    );
    println!();
}
