use serde::Serialize;

use crate::models::{ApplicationRecord, CategoryCount};

pub const CREDIT_SCORE_MIN: f64 = 300.0;
pub const CREDIT_SCORE_MAX: f64 = 850.0;

/// KPI bundle for one applicant's risk profile view.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantProfile {
    pub id: String,
    pub vehicle_type: String,
    pub annual_mileage: f64,
    pub mileage_label: String,
    pub credit_score: f64,
    pub gauge_score: f64,
    pub risk_level: String,
    pub violations: Vec<CategoryCount>,
}

pub fn find_applicant<'a>(
    records: &'a [ApplicationRecord],
    id: &str,
) -> Option<&'a ApplicationRecord> {
    records.iter().find(|record| record.id == id)
}

/// Credit-score risk ladder used on the profile header card.
pub fn risk_level(credit_score: f64) -> &'static str {
    if credit_score >= 700.0 {
        "LOW RISK"
    } else if credit_score >= 550.0 {
        "MEDIUM RISK"
    } else {
        "HIGH RISK"
    }
}

/// Clamp a score onto the gauge scale so the needle stays on the dial.
pub fn gauge_score(credit_score: f64) -> f64 {
    credit_score.clamp(CREDIT_SCORE_MIN, CREDIT_SCORE_MAX)
}

/// Counts for the violations donut: DUIs, past accidents, speeding.
pub fn violation_breakdown(record: &ApplicationRecord) -> Vec<CategoryCount> {
    vec![
        CategoryCount {
            name: "DUIs".to_string(),
            value: record.duis as u64,
        },
        CategoryCount {
            name: "Accidents".to_string(),
            value: record.past_accidents as u64,
        },
        CategoryCount {
            name: "Speeding".to_string(),
            value: record.speeding_violations as u64,
        },
    ]
}

pub fn build_profile(records: &[ApplicationRecord], id: &str) -> Option<ApplicantProfile> {
    let record = find_applicant(records, id)?;
    let credit_score = record.credit_score.unwrap_or(0.0);

    Some(ApplicantProfile {
        id: record.id.clone(),
        vehicle_type: record.vehicle_type.clone().unwrap_or_else(|| "-".to_string()),
        annual_mileage: record.annual_mileage,
        mileage_label: format!("{:.2}K", record.annual_mileage / 1000.0),
        credit_score,
        gauge_score: gauge_score(credit_score),
        risk_level: risk_level(credit_score).to_string(),
        violations: violation_breakdown(record),
    })
}
