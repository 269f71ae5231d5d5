use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use rust_acquire::acquisition::{run_acquisition, verify_workspace, AcquisitionOptions};
use rust_acquire::cli::{Args, Commands};
use rust_acquire::errors::{
    exit_code_for, EXIT_CONSENT_NOT_GIVEN, EXIT_SUCCESS, EXIT_VERIFY_FAILED,
};

fn main() {
    let args = Args::parse();

    if let Err(e) = initialize_logging(args.verbose) {
        eprintln!("Failed to initialize logger: {:#}", e);
    }

    process::exit(run(args));
}

/// Initialize logging with the specified verbosity level
fn initialize_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")?;
    Ok(())
}

fn run(args: Args) -> i32 {
    if let Some(Commands::Verify { workspace }) = &args.command {
        return run_verify(workspace);
    }

    // Consent is an explicit human-acknowledgment gate: refuse before any
    // other action, side effect, or validation
    if !args.consent {
        error!("LEGAL WARNING: You must have explicit authorization to collect/analyze device data.");
        error!("Run again with --consent when you have authorization.");
        return EXIT_CONSENT_NOT_GIVEN;
    }

    let options = AcquisitionOptions {
        input: args.input,
        device_package: args.device_package,
        outdir: args.outdir,
        case_id: args.case_id,
        collector: args.collector,
        reason: args.reason,
        archive: args.zip,
    };

    match run_acquisition(&options) {
        Ok(outcome) => {
            info!(
                "Acquisition complete: {} files, {} bytes",
                outcome.total_files, outcome.total_bytes
            );
            if outcome.failed_files > 0 {
                warn!("{} files could not be acquired", outcome.failed_files);
            }
            if outcome.skipped_symlinks > 0 {
                warn!("{} symlinks were skipped", outcome.skipped_symlinks);
            }
            if let Some(archive) = &outcome.archive {
                info!("Archive: {} ({})", archive.archive, archive.archive_sha256);
            }
            info!("Workspace: {}", outcome.workspace.display());
            info!("Preserve this workspace and include chain_of_custody.json when handing off evidence.");
            EXIT_SUCCESS
        }
        Err(e) => {
            error!("Acquisition failed: {:#}", e);
            exit_code_for(&e)
        }
    }
}

fn run_verify(workspace: &Path) -> i32 {
    match verify_workspace(workspace) {
        Ok(report) => {
            info!(
                "Verified {} entries: {} matched, {} mismatched, {} missing, {} unreadable",
                report.total,
                report.matched,
                report.mismatched.len(),
                report.missing.len(),
                report.unreadable.len()
            );
            if report.is_clean() {
                EXIT_SUCCESS
            } else {
                for rel_path in &report.mismatched {
                    error!("Hash mismatch: {}", rel_path);
                }
                for rel_path in &report.missing {
                    error!("Missing: {}", rel_path);
                }
                for rel_path in &report.unreadable {
                    error!("Unreadable: {}", rel_path);
                }
                EXIT_VERIFY_FAILED
            }
        }
        Err(e) => {
            error!("Verification failed: {:#}", e);
            exit_code_for(&e)
        }
    }
}
