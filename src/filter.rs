use crate::models::{ApplicationRecord, FilterCriteria, ALL, APPROVED, REJECTED};

/// Apply the dashboard filters, preserving input order. Only records whose
/// canonical status is `"Approved"` or `"Rejected"` are subject to the
/// visibility toggles; everything else stays regardless.
pub fn filter_records(
    records: &[ApplicationRecord],
    criteria: &FilterCriteria,
) -> Vec<ApplicationRecord> {
    records
        .iter()
        .filter(|record| retained(record, criteria))
        .cloned()
        .collect()
}

fn retained(record: &ApplicationRecord, criteria: &FilterCriteria) -> bool {
    let status = record.status();
    if status == APPROVED && !criteria.show_approved {
        return false;
    }
    if status == REJECTED && !criteria.show_rejected {
        return false;
    }
    if criteria.age_group != ALL
        && record.age_group.as_deref() != Some(criteria.age_group.as_str())
    {
        return false;
    }
    if criteria.risk_category != ALL
        && record.risk_category.as_deref() != Some(criteria.risk_category.as_str())
    {
        return false;
    }
    true
}

/// Narrow an already-filtered set to the rows matching `selector`, or
/// return it unchanged when the selector is `"All"`. Ids compare as
/// strings.
pub fn select_by_id(records: &[ApplicationRecord], selector: &str) -> Vec<ApplicationRecord> {
    if selector == ALL {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| record.id == selector)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PENDING;

    fn record(id: &str, status: &str) -> ApplicationRecord {
        ApplicationRecord {
            id: id.to_string(),
            approval_status: Some(status.to_string()),
            ..ApplicationRecord::default()
        }
    }

    #[test]
    fn toggles_hide_only_their_own_status() {
        let records = vec![
            record("1", APPROVED),
            record("2", REJECTED),
            record("3", PENDING),
        ];

        let criteria = FilterCriteria {
            show_approved: false,
            ..FilterCriteria::default()
        };
        let visible = filter_records(&records, &criteria);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|r| !r.is_approved()));

        let criteria = FilterCriteria {
            show_rejected: false,
            ..FilterCriteria::default()
        };
        let visible = filter_records(&records, &criteria);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|r| !r.is_rejected()));
    }

    #[test]
    fn pending_records_survive_both_toggles_off() {
        let records = vec![
            record("1", APPROVED),
            record("2", REJECTED),
            record("3", PENDING),
        ];
        let criteria = FilterCriteria {
            show_approved: false,
            show_rejected: false,
            ..FilterCriteria::default()
        };
        let visible = filter_records(&records, &criteria);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "3");
    }

    #[test]
    fn age_group_requires_exact_match() {
        let mut young = record("1", APPROVED);
        young.age_group = Some("18-25".to_string());
        let missing = record("2", APPROVED);

        let criteria = FilterCriteria {
            age_group: "18-25".to_string(),
            ..FilterCriteria::default()
        };
        let visible = filter_records(&[young, missing], &criteria);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "1");
    }

    #[test]
    fn risk_category_filter_excludes_absent_labels() {
        let mut low = record("1", APPROVED);
        low.risk_category = Some("Low Risk".to_string());
        let unlabeled = record("2", APPROVED);

        let criteria = FilterCriteria {
            risk_category: "Low Risk".to_string(),
            ..FilterCriteria::default()
        };
        let visible = filter_records(&[low, unlabeled], &criteria);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "1");
    }

    #[test]
    fn output_is_an_ordered_subset_of_input() {
        let records = vec![
            record("1", APPROVED),
            record("2", REJECTED),
            record("3", APPROVED),
            record("4", PENDING),
        ];
        let visible = filter_records(&records, &FilterCriteria::default());
        let ids: Vec<&str> = visible.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
        assert!(visible.iter().all(|r| records.contains(r)));
    }

    #[test]
    fn id_selector_narrows_to_one_row() {
        let records = vec![record("1", APPROVED), record("2", REJECTED)];
        let narrowed = select_by_id(&records, "2");
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].id, "2");

        assert_eq!(select_by_id(&records, ALL).len(), 2);
        assert!(select_by_id(&records, "99").is_empty());
    }
}
