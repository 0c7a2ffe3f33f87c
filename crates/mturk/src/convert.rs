//! Conversions between SDK response shapes and domain types.

use aws_sdk_mturk::primitives::DateTime;
use aws_sdk_mturk::types::{
    Comparator, Hit, HitAccessActions, Locale, QualificationRequirement,
};

use amt_voucher_core::hit_config::QualificationRequirementConfig;
use amt_voucher_core::summary::HitSummary;
use amt_voucher_core::types::Timestamp;

use crate::error::MturkError;

/// Convert a smithy timestamp to UTC.
pub fn to_utc(dt: &DateTime) -> Option<Timestamp> {
    chrono::DateTime::from_timestamp(dt.secs(), dt.subsec_nanos())
}

/// Project a GetHIT/ListReviewableHITs entry into a [`HitSummary`].
pub fn hit_summary(hit: &Hit) -> Result<HitSummary, MturkError> {
    Ok(HitSummary {
        hit_id: hit
            .hit_id()
            .ok_or(MturkError::MissingField("HITId"))?
            .to_string(),
        title: hit.title().unwrap_or_default().to_string(),
        hit_status: hit
            .hit_status()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
        max_assignments: hit
            .max_assignments()
            .ok_or(MturkError::MissingField("MaxAssignments"))?,
        completed: hit
            .number_of_assignments_completed()
            .ok_or(MturkError::MissingField("NumberOfAssignmentsCompleted"))?,
        pending: hit
            .number_of_assignments_pending()
            .ok_or(MturkError::MissingField("NumberOfAssignmentsPending"))?,
        available: hit
            .number_of_assignments_available()
            .ok_or(MturkError::MissingField("NumberOfAssignmentsAvailable"))?,
        expiration: hit
            .expiration()
            .and_then(to_utc)
            .ok_or(MturkError::MissingField("Expiration"))?,
    })
}

/// Build an SDK qualification requirement from its config entry.
pub fn qualification_requirement(
    cfg: &QualificationRequirementConfig,
) -> Result<QualificationRequirement, MturkError> {
    let mut builder = QualificationRequirement::builder()
        .qualification_type_id(&cfg.qualification_type_id)
        .comparator(Comparator::from(cfg.comparator.as_str()));

    if let Some(values) = &cfg.integer_values {
        builder = builder.set_integer_values(Some(values.clone()));
    }
    if let Some(locales) = &cfg.locale_values {
        for locale in locales {
            let mut locale_builder = Locale::builder().country(&locale.country);
            if let Some(subdivision) = &locale.subdivision {
                locale_builder = locale_builder.subdivision(subdivision);
            }
            let locale = locale_builder
                .build()
                .map_err(|e| MturkError::InvalidQualification(e.to_string()))?;
            builder = builder.locale_values(locale);
        }
    }
    if let Some(actions) = &cfg.actions_guarded {
        builder = builder.actions_guarded(HitAccessActions::from(actions.as_str()));
    }

    builder
        .build()
        .map_err(|e| MturkError::InvalidQualification(e.to_string()))
}
