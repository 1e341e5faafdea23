//! `certdrift config` - show the effective configuration.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::user_config_path;
use crate::output::OutputFormat;

pub fn execute(ctx: Context, args: ConfigArgs) -> Result<ExitCode> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx)?,
        ConfigCommands::Path => show_path(&ctx)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn show_config(ctx: &Context) -> Result<()> {
    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&ctx.config)?);
        }
        OutputFormat::Pretty => {
            let source = ctx.config_source.as_ref().map_or_else(
                || "(built-in defaults)".dimmed().to_string(),
                |p| p.display().to_string(),
            );
            println!("{} {}", "# source:".dimmed(), source);
            print!("{}", toml::to_string_pretty(&ctx.config)?);
        }
    }
    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    match &ctx.config_source {
        Some(path) => println!("{}", path.display()),
        None => {
            let user = user_config_path()?;
            println!("{} {}", user.display(), "(not present)".dimmed());
        }
    }
    Ok(())
}
