//! `review-vouchers` -- approve submitted assignments with valid vouchers.
//!
//! For every HIT under review, each `Submitted` assignment's voucher code
//! is hashed and compared against the voucher row bound to that worker and
//! assignment. On a match with an unredeemed voucher, the row is marked
//! redeemed and the assignment approved. Assignments are approved solely on
//! the basis of a valid voucher.
//!
//! # Environment variables
//!
//! | Variable       | Required | Description                               |
//! |----------------|----------|-------------------------------------------|
//! | `DATABASE_URL` | yes      | MySQL connection string for the voucher DB |

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use sqlx::MySqlPool;

use amt_voucher_cli::review::{self, ReviewContext};
use amt_voucher_cli::{paths, telemetry};
use amt_voucher_core::hit_log;
use amt_voucher_mturk::MturkClient;

#[derive(Debug, Parser)]
#[command(
    name = "review-vouchers",
    about = "Review submitted assignments and approve those with valid vouchers."
)]
struct Args {
    /// AWS shared-credentials profile to use.
    aws_profile: String,

    /// Review live HITs. Default is the sandbox.
    #[arg(long)]
    live: bool,

    /// Review all reviewable HITs instead of only those in the creation log.
    #[arg(long)]
    all: bool,

    /// Directory holding creation logs (default: ~/.amt-voucher/logs).
    #[arg(long)]
    app_dir: Option<PathBuf>,

    /// Only inspect the N most recently created HITs (0 inspects all).
    #[arg(long, default_value_t = 1)]
    n_last: usize,

    /// Increase output verbosity.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    telemetry::init("info");
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("review-vouchers failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    println!("Mode: {}", if args.live { "LIVE" } else { "SANDBOX" });

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set (see .env.example)")?;
    let pool = MySqlPool::connect(&database_url)
        .await
        .context("cannot connect to the voucher database")?;
    let client = MturkClient::connect(&args.aws_profile, args.live).await;

    let hit_ids = if args.all {
        client.reviewable_hit_ids().await?
    } else {
        let log_path = paths::resolve_app_dir(args.app_dir)
            .map(|dir| hit_log::log_path(&dir, &args.aws_profile, args.live))?;
        hit_log::read_hit_ids(&log_path)?
    };
    println!("Reviewable HITs: {}", hit_ids.len());

    let hit_ids = hit_log::most_recent(hit_ids, args.n_last);
    println!("Inspecting {} HITs\n", hit_ids.len());

    let ctx = ReviewContext {
        pool: &pool,
        client: &client,
        verbose: args.verbose,
    };
    for hit_id in &hit_ids {
        // One bad HIT must not halt the batch.
        if let Err(e) = review::inspect_hit(&ctx, hit_id).await {
            tracing::error!(hit_id, "HIT inspection failed, continuing: {e:#}");
        }
    }

    pool.close().await;
    Ok(())
}
