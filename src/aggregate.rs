use std::collections::BTreeMap;

use crate::filter;
use crate::models::{
    ApplicationRecord, CategoryCount, ClaimStatusBreakdown, DashboardSummary, ExperienceAverages,
    FilterCriteria, RiskStatusBreakdown, ScoreBucket, YearMileage, APPROVED, HIGH_RISK, LOW_RISK,
    MEDIUM_RISK, REJECTED, RISK_FACTORS, SAFE_DRIVING, UNKNOWN,
};

const SCORE_BIN_SIZE: f64 = 400.0;

pub fn status_totals(records: &[ApplicationRecord]) -> (u64, u64) {
    let approved = records.iter().filter(|r| r.is_approved()).count() as u64;
    let rejected = records.iter().filter(|r| r.is_rejected()).count() as u64;
    (approved, rejected)
}

/// Tally per fixed status bucket. Statuses other than `"Approved"` and
/// `"Rejected"` are not counted here.
pub fn count_by_status(records: &[ApplicationRecord]) -> Vec<CategoryCount> {
    let (approved, rejected) = status_totals(records);
    vec![
        CategoryCount {
            name: APPROVED.to_string(),
            value: approved,
        },
        CategoryCount {
            name: REJECTED.to_string(),
            value: rejected,
        },
    ]
}

/// Approved/Rejected counts for each of the three canonical risk labels.
/// Records carrying any other label fall outside all three rows.
pub fn risk_by_status(records: &[ApplicationRecord]) -> Vec<RiskStatusBreakdown> {
    [LOW_RISK, MEDIUM_RISK, HIGH_RISK]
        .into_iter()
        .map(|risk| {
            let rows: Vec<&ApplicationRecord> = records
                .iter()
                .filter(|r| r.risk_category.as_deref() == Some(risk))
                .collect();
            RiskStatusBreakdown {
                risk: risk.to_string(),
                approved: rows.iter().filter(|r| r.is_approved()).count() as u64,
                rejected: rows.iter().filter(|r| r.is_rejected()).count() as u64,
            }
        })
        .collect()
}

/// Binary split on the safe-driving flag; everything that does not carry
/// the exact `"Safe Driving"` label counts as a risk factor.
pub fn safe_driving_split(records: &[ApplicationRecord]) -> Vec<CategoryCount> {
    let safe = records
        .iter()
        .filter(|r| r.safe_driving_flag.as_deref() == Some(SAFE_DRIVING))
        .count() as u64;
    vec![
        CategoryCount {
            name: SAFE_DRIVING.to_string(),
            value: safe,
        },
        CategoryCount {
            name: RISK_FACTORS.to_string(),
            value: records.len() as u64 - safe,
        },
    ]
}

/// Histogram of credit scores in fixed-width bins of 400, labeled
/// `"start-end"` and sorted ascending by bin start. Records without a
/// numeric score are skipped.
pub fn credit_score_bins(records: &[ApplicationRecord]) -> Vec<ScoreBucket> {
    let mut bins: BTreeMap<i64, u64> = BTreeMap::new();

    for record in records {
        let Some(score) = record.credit_score else {
            continue;
        };
        let start = (score / SCORE_BIN_SIZE).floor() as i64 * SCORE_BIN_SIZE as i64;
        *bins.entry(start).or_insert(0) += 1;
    }

    bins.into_iter()
        .map(|(start, count)| ScoreBucket {
            range: format!("{}-{}", start, start + SCORE_BIN_SIZE as i64 - 1),
            count,
        })
        .collect()
}

/// Approved/Rejected counts per claim status. Buckets are created on first
/// sight of a status and keep that order, so output is deterministic for a
/// given input order.
pub fn claims_by_status(records: &[ApplicationRecord]) -> Vec<ClaimStatusBreakdown> {
    let mut buckets: Vec<ClaimStatusBreakdown> = Vec::new();

    for record in records {
        let claim = record.claim_status.as_deref().unwrap_or(UNKNOWN);
        let index = match buckets.iter().position(|b| b.claim_status == claim) {
            Some(index) => index,
            None => {
                buckets.push(ClaimStatusBreakdown {
                    claim_status: claim.to_string(),
                    approved: 0,
                    rejected: 0,
                });
                buckets.len() - 1
            }
        };
        if record.is_approved() {
            buckets[index].approved += 1;
        } else if record.is_rejected() {
            buckets[index].rejected += 1;
        }
    }

    buckets
}

/// Mean past accidents and speeding violations per driving-experience
/// group, rounded to two decimals. Groups keep first-seen order.
pub fn experience_averages(records: &[ApplicationRecord]) -> Vec<ExperienceAverages> {
    struct Totals {
        experience: String,
        accidents: f64,
        violations: f64,
        count: u64,
    }

    let mut groups: Vec<Totals> = Vec::new();

    for record in records {
        let experience = record.driving_experience.as_deref().unwrap_or(UNKNOWN);
        let index = match groups.iter().position(|g| g.experience == experience) {
            Some(index) => index,
            None => {
                groups.push(Totals {
                    experience: experience.to_string(),
                    accidents: 0.0,
                    violations: 0.0,
                    count: 0,
                });
                groups.len() - 1
            }
        };
        groups[index].accidents += record.past_accidents;
        groups[index].violations += record.speeding_violations;
        groups[index].count += 1;
    }

    groups
        .into_iter()
        .map(|g| ExperienceAverages {
            driving_experience: g.experience,
            avg_past_accidents: round2(g.accidents / g.count as f64),
            avg_speeding_violations: round2(g.violations / g.count as f64),
        })
        .collect()
}

/// Fixed Low / Medium / High annual-mileage bands. This chart reads the
/// full snapshot; the dashboard filters do not apply to it.
pub fn mileage_distribution(records: &[ApplicationRecord]) -> Vec<CategoryCount> {
    let (mut low, mut medium, mut high) = (0u64, 0u64, 0u64);

    for record in records {
        let miles = record.annual_mileage;
        if miles < 8000.0 {
            low += 1;
        } else if miles <= 15000.0 {
            medium += 1;
        } else {
            high += 1;
        }
    }

    vec![
        CategoryCount {
            name: "Low".to_string(),
            value: low,
        },
        CategoryCount {
            name: "Medium".to_string(),
            value: medium,
        },
        CategoryCount {
            name: "High".to_string(),
            value: high,
        },
    ]
}

/// Integer-rounded mean annual mileage per vehicle year, over the full
/// snapshot. Groups keep first-seen order.
pub fn mileage_by_vehicle_year(records: &[ApplicationRecord]) -> Vec<YearMileage> {
    let mut groups: Vec<(String, f64, u64)> = Vec::new();

    for record in records {
        let year = record.vehicle_year.as_deref().unwrap_or(UNKNOWN);
        let index = match groups.iter().position(|(name, ..)| name == year) {
            Some(index) => index,
            None => {
                groups.push((year.to_string(), 0.0, 0));
                groups.len() - 1
            }
        };
        groups[index].1 += record.annual_mileage;
        groups[index].2 += 1;
    }

    groups
        .into_iter()
        .map(|(vehicle_year, total, count)| YearMileage {
            vehicle_year,
            avg_annual_mileage: (total / count as f64).round() as i64,
        })
        .collect()
}

/// One-decimal percentage label for a two-bucket share chart. Empty when
/// the total or the value is zero, so a slice never divides by zero.
pub fn percentage_label(value: u64, total: u64) -> String {
    if value == 0 || total == 0 {
        return String::new();
    }
    format!("{:.1}%", value as f64 / total as f64 * 100.0)
}

/// Recompute every named summary for the given snapshot and filter state.
/// The mileage charts intentionally read the unfiltered snapshot, as the
/// dashboards they back always have.
pub fn build_summary(
    records: &[ApplicationRecord],
    criteria: &FilterCriteria,
) -> DashboardSummary {
    let visible = filter::filter_records(records, criteria);
    let (approved, rejected) = status_totals(&visible);

    DashboardSummary {
        total_applications: visible.len() as u64,
        approved,
        rejected,
        approval_distribution: count_by_status(&visible),
        risk_by_status: risk_by_status(&visible),
        safe_driving: safe_driving_split(&visible),
        credit_score_bins: credit_score_bins(&visible),
        claims_by_status: claims_by_status(&visible),
        experience_averages: experience_averages(&visible),
        mileage_distribution: mileage_distribution(records),
        mileage_by_vehicle_year: mileage_by_vehicle_year(records),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
