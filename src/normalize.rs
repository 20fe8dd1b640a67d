use crate::models::{ApplicationRecord, HIGH_RISK, LOW_RISK, MEDIUM_RISK, PENDING};

/// Canonical approval status: the first non-empty of `Approval_Status` and
/// `policy_status`, falling back to `"Pending"`.
fn canonical_status(record: &ApplicationRecord) -> String {
    [
        record.approval_status.as_deref(),
        record.policy_status.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|value| !value.is_empty())
    .unwrap_or(PENDING)
    .to_string()
}

/// Collapse the loose risk labels seen in exports onto the three canonical
/// ones. Unrecognized labels pass through unchanged.
fn canonical_risk(label: &str) -> &str {
    match label {
        "Medium" | "Medium Risk" => MEDIUM_RISK,
        "High" => HIGH_RISK,
        "Low" => LOW_RISK,
        other => other,
    }
}

/// Produce a normalized copy of `record`. The input is never mutated, and
/// normalizing an already-normalized record is a no-op.
pub fn normalize(record: &ApplicationRecord) -> ApplicationRecord {
    let mut normalized = record.clone();
    normalized.approval_status = Some(canonical_status(record));
    normalized.risk_category = record
        .risk_category
        .as_deref()
        .map(|label| canonical_risk(label).to_string());
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{APPROVED, REJECTED};

    #[test]
    fn approval_status_takes_precedence_over_policy_status() {
        let record = ApplicationRecord {
            approval_status: Some(APPROVED.to_string()),
            policy_status: Some(REJECTED.to_string()),
            ..ApplicationRecord::default()
        };
        assert_eq!(normalize(&record).status(), APPROVED);
    }

    #[test]
    fn empty_status_falls_through_to_policy_status() {
        let record = ApplicationRecord {
            approval_status: Some(String::new()),
            policy_status: Some(REJECTED.to_string()),
            ..ApplicationRecord::default()
        };
        assert_eq!(normalize(&record).status(), REJECTED);
    }

    #[test]
    fn missing_statuses_default_to_pending() {
        let record = ApplicationRecord::default();
        assert_eq!(normalize(&record).status(), PENDING);
    }

    #[test]
    fn risk_labels_collapse_to_canonical_forms() {
        for (raw, expected) in [
            ("Medium", MEDIUM_RISK),
            ("Medium Risk", MEDIUM_RISK),
            ("High", HIGH_RISK),
            ("Low", LOW_RISK),
            ("Severe", "Severe"),
        ] {
            let record = ApplicationRecord {
                risk_category: Some(raw.to_string()),
                ..ApplicationRecord::default()
            };
            assert_eq!(
                normalize(&record).risk_category.as_deref(),
                Some(expected),
                "label {raw:?}"
            );
        }
    }

    #[test]
    fn absent_risk_category_stays_absent() {
        let record = ApplicationRecord::default();
        assert_eq!(normalize(&record).risk_category, None);
    }

    #[test]
    fn normalization_is_idempotent() {
        let record = ApplicationRecord {
            policy_status: Some(REJECTED.to_string()),
            risk_category: Some("High".to_string()),
            ..ApplicationRecord::default()
        };
        let once = normalize(&record);
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn input_record_is_left_untouched() {
        let record = ApplicationRecord {
            risk_category: Some("High".to_string()),
            ..ApplicationRecord::default()
        };
        let _ = normalize(&record);
        assert_eq!(record.risk_category.as_deref(), Some("High"));
        assert_eq!(record.approval_status, None);
    }
}
