//! `certdrift fingerprint` - SHA-256 of arbitrary files.

use anyhow::Result;
use certdrift_core::hash::sha256_file;
use certdrift_core::Fingerprint;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use super::Context;
use crate::cli::args::FingerprintArgs;
use crate::output::OutputFormat;

#[derive(Debug, Serialize)]
struct FileFingerprint {
    path: PathBuf,
    sha256: Fingerprint,
}

/// Execute the fingerprint command.
pub async fn execute(ctx: Context, args: FingerprintArgs) -> Result<ExitCode> {
    let mut entries = Vec::with_capacity(args.files.len());
    for path in args.files {
        let sha256 = sha256_file(&path).await?;
        entries.push(FileFingerprint { path, sha256 });
    }

    match ctx.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        // Same layout as sha256sum.
        OutputFormat::Pretty => {
            for entry in &entries {
                println!("{}  {}", entry.sha256, entry.path.display());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
