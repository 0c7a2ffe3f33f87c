//! MTurk requester client.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_mturk::types::AssignmentStatus;
use aws_sdk_mturk::Client;

use amt_voucher_core::hit_config::HitConfig;
use amt_voucher_core::summary::HitSummary;

use crate::convert;
use crate::error::{api_err, MturkError};

/// Production requester endpoint. HITs created here cost real money.
pub const LIVE_ENDPOINT: &str = "https://mturk-requester.us-east-1.amazonaws.com";

/// Sandbox requester endpoint.
pub const SANDBOX_ENDPOINT: &str = "https://mturk-requester-sandbox.us-east-1.amazonaws.com";

/// The requester API is only served from us-east-1.
const MTURK_REGION: &str = "us-east-1";

/// One worker's attempt at a HIT, as needed by the review flow.
#[derive(Debug, Clone)]
pub struct AssignmentView {
    pub assignment_id: String,
    pub status: String,
    pub submitted: bool,
    /// Raw QuestionFormAnswers document, if the worker answered.
    pub answer_xml: Option<String>,
}

/// Requester client bound to one credential profile and endpoint.
pub struct MturkClient {
    inner: Client,
    endpoint_url: &'static str,
}

impl MturkClient {
    /// The endpoint used for the given mode.
    pub fn endpoint_url(live: bool) -> &'static str {
        if live {
            LIVE_ENDPOINT
        } else {
            SANDBOX_ENDPOINT
        }
    }

    /// Build a client from a shared-credentials profile.
    ///
    /// Credentials come from the `[profile]` section of the standard AWS
    /// shared credentials file (or the usual env-var chain).
    pub async fn connect(aws_profile: &str, live: bool) -> Self {
        let endpoint_url = Self::endpoint_url(live);
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(aws_profile)
            .region(Region::new(MTURK_REGION))
            .load()
            .await;
        let config = aws_sdk_mturk::config::Builder::from(&sdk_config)
            .endpoint_url(endpoint_url)
            .build();
        Self {
            inner: Client::from_conf(config),
            endpoint_url,
        }
    }

    /// Create one HIT and return its id.
    pub async fn create_hit(
        &self,
        cfg: &HitConfig,
        n_assignments: i32,
        question_xml: &str,
    ) -> Result<String, MturkError> {
        let mut request = self
            .inner
            .create_hit()
            .max_assignments(n_assignments)
            .lifetime_in_seconds(cfg.lifetime_in_seconds)
            .assignment_duration_in_seconds(cfg.assignment_duration_in_seconds)
            .reward(&cfg.reward)
            .title(&cfg.title)
            .keywords(cfg.keywords_param())
            .description(&cfg.description)
            .question(question_xml);
        for qual in &cfg.qualification_requirements {
            request = request.qualification_requirements(convert::qualification_requirement(qual)?);
        }

        tracing::debug!(endpoint = self.endpoint_url, title = %cfg.title, "Issuing CreateHIT");
        let output = request.send().await.map_err(api_err)?;
        output
            .hit()
            .and_then(|hit| hit.hit_id())
            .map(str::to_string)
            .ok_or(MturkError::MissingField("HITId"))
    }

    /// Fetch one HIT's summary.
    pub async fn hit_summary(&self, hit_id: &str) -> Result<HitSummary, MturkError> {
        let output = self
            .inner
            .get_hit()
            .hit_id(hit_id)
            .send()
            .await
            .map_err(api_err)?;
        let hit = output.hit().ok_or(MturkError::MissingField("HIT"))?;
        convert::hit_summary(hit)
    }

    /// Ids of currently reviewable HITs. First page only; HITs past the
    /// page boundary are picked up on a later run.
    pub async fn reviewable_hit_ids(&self) -> Result<Vec<String>, MturkError> {
        let output = self
            .inner
            .list_reviewable_hits()
            .send()
            .await
            .map_err(api_err)?;
        Ok(output
            .hits()
            .iter()
            .filter_map(|hit| hit.hit_id().map(str::to_string))
            .collect())
    }

    /// Assignments for one HIT. First page only, as above.
    pub async fn assignments_for_hit(
        &self,
        hit_id: &str,
    ) -> Result<Vec<AssignmentView>, MturkError> {
        let output = self
            .inner
            .list_assignments_for_hit()
            .hit_id(hit_id)
            .send()
            .await
            .map_err(api_err)?;
        Ok(output
            .assignments()
            .iter()
            .filter_map(|a| {
                let assignment_id = a.assignment_id()?.to_string();
                let status = a
                    .assignment_status()
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_default();
                let submitted =
                    matches!(a.assignment_status(), Some(AssignmentStatus::Submitted));
                Some(AssignmentView {
                    assignment_id,
                    status,
                    submitted,
                    answer_xml: a.answer().map(str::to_string),
                })
            })
            .collect())
    }

    /// Approve one assignment with the given requester feedback.
    pub async fn approve_assignment(
        &self,
        assignment_id: &str,
        feedback: &str,
    ) -> Result<(), MturkError> {
        self.inner
            .approve_assignment()
            .assignment_id(assignment_id)
            .requester_feedback(feedback)
            .send()
            .await
            .map_err(api_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_selection() {
        assert_eq!(MturkClient::endpoint_url(true), LIVE_ENDPOINT);
        assert_eq!(MturkClient::endpoint_url(false), SANDBOX_ENDPOINT);
        assert!(SANDBOX_ENDPOINT.contains("sandbox"));
    }
}
