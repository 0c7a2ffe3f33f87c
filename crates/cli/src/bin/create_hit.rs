//! `create-hit` -- create one AMT HIT from a JSON configuration file.
//!
//! Sandbox is the default; `--live` targets the production site and asks
//! for interactive confirmation before spending real money. The created
//! HIT id is appended to the per-profile creation log, which is what
//! `review-vouchers` reads back when not reviewing all HITs.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};

use amt_voucher_cli::{create, paths, prompt, telemetry};
use amt_voucher_core::hit_config::HitConfig;
use amt_voucher_core::hit_log;
use amt_voucher_mturk::MturkClient;

#[derive(Debug, Parser)]
#[command(name = "create-hit", about = "Create an AMT HIT from a configuration file.")]
struct Args {
    /// Path to the HIT configuration file.
    config_path: PathBuf,

    /// AWS shared-credentials profile to use.
    aws_profile: String,

    /// Create the HIT on the live site. Default is the sandbox.
    #[arg(long)]
    live: bool,

    /// Override the configured number of assignments.
    #[arg(long)]
    n_assignments: Option<i32>,

    /// Directory holding creation logs (default: ~/.amt-voucher/logs).
    #[arg(long)]
    app_dir: Option<PathBuf>,

    /// Increase output verbosity.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init("info");
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("create-hit failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    // Fail on configuration problems before touching the network.
    let cfg = HitConfig::from_path(&args.config_path)?;
    if args.verbose > 0 {
        println!("{cfg:#?}");
    }
    let n_assignments = args.n_assignments.unwrap_or(cfg.max_assignments);
    let app_dir = paths::resolve_app_dir(args.app_dir)?;
    let log_path = hit_log::log_path(&app_dir, &args.aws_profile, args.live);

    create::print_warnings(n_assignments, args.live);
    if args.live && !prompt::confirm("Are you sure you want to create the HIT (yes/no)?")? {
        println!("    Did not create HIT");
        return Ok(());
    }

    let client = MturkClient::connect(&args.aws_profile, args.live).await;
    let hit_id = create::create_and_log(&client, &cfg, n_assignments, &args.config_path, &log_path)
        .await
        .context("CreateHIT failed")?;

    let mode = if args.live { "live" } else { "sandbox" };
    println!("    Created {mode} HIT {hit_id}");
    Ok(())
}
