//! HIT creation flow.

use std::path::Path;

use chrono::Utc;

use amt_voucher_core::hit_config::HitConfig;
use amt_voucher_core::hit_log::{self, HitLogEntry};
use amt_voucher_core::question::external_question_xml;
use amt_voucher_mturk::MturkClient;

/// Advisory warnings before a HIT is created. Informational only.
pub fn print_warnings(n_assignments: i32, live: bool) {
    if live {
        println!("    WARNING: You are creating a live HIT that uses real money.");
    }
    if HitConfig::exceeds_free_tier(n_assignments) {
        println!(
            "    WARNING: AMT charges an additional 20% fee for HITs with more than 9 assignments."
        );
    }
}

/// Issues the CreateHIT call. The real implementation is [`MturkClient`].
#[allow(async_fn_in_trait)]
pub trait HitCreator {
    async fn create_hit(
        &self,
        cfg: &HitConfig,
        n_assignments: i32,
        question_xml: &str,
    ) -> anyhow::Result<String>;
}

impl HitCreator for MturkClient {
    async fn create_hit(
        &self,
        cfg: &HitConfig,
        n_assignments: i32,
        question_xml: &str,
    ) -> anyhow::Result<String> {
        Ok(MturkClient::create_hit(self, cfg, n_assignments, question_xml).await?)
    }
}

/// Create the HIT and record it in the creation log.
///
/// Confirmation (for live mode) must already have happened; this issues
/// exactly one CreateHIT call.
pub async fn create_and_log<C: HitCreator>(
    client: &C,
    cfg: &HitConfig,
    n_assignments: i32,
    config_path: &Path,
    log_path: &Path,
) -> anyhow::Result<String> {
    let question_xml = external_question_xml(&cfg.question_url);
    let hit_id = client.create_hit(cfg, n_assignments, &question_xml).await?;

    let entry = HitLogEntry {
        hit_id: hit_id.clone(),
        created_on: Utc::now().date_naive(),
        config_path: config_path.display().to_string(),
    };
    hit_log::append(log_path, &entry)?;
    tracing::info!(hit_id = %hit_id, log = %log_path.display(), "HIT recorded in creation log");

    Ok(hit_id)
}
