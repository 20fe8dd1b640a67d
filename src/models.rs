use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const ALL: &str = "All";
pub const APPROVED: &str = "Approved";
pub const REJECTED: &str = "Rejected";
pub const PENDING: &str = "Pending";
pub const UNKNOWN: &str = "Unknown";
pub const LOW_RISK: &str = "Low Risk";
pub const MEDIUM_RISK: &str = "Medium Risk";
pub const HIGH_RISK: &str = "High Risk";
pub const SAFE_DRIVING: &str = "Safe Driving";
pub const RISK_FACTORS: &str = "Risk Factors";

/// One applicant's flattened insurance-application data as it appears in
/// the remote document. Exports are inconsistent about spelling and types,
/// so every field deserializes leniently: an incomplete or mistyped record
/// never fails to parse.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApplicationRecord {
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_score")]
    pub credit_score: Option<f64>,
    #[serde(default)]
    pub risk_category: Option<String>,
    #[serde(default, rename = "Approval_Status")]
    pub approval_status: Option<String>,
    #[serde(default)]
    pub policy_status: Option<String>,
    #[serde(default)]
    pub age_group: Option<String>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default, deserialize_with = "de_group_label")]
    pub vehicle_year: Option<String>,
    #[serde(default, deserialize_with = "de_counter")]
    pub annual_mileage: f64,
    #[serde(default, deserialize_with = "de_counter")]
    pub past_accidents: f64,
    #[serde(default, deserialize_with = "de_counter")]
    pub speeding_violations: f64,
    #[serde(default, deserialize_with = "de_counter")]
    pub duis: f64,
    #[serde(default)]
    pub driving_experience: Option<String>,
    #[serde(default)]
    pub claim_status: Option<String>,
    #[serde(default)]
    pub safe_driving_flag: Option<String>,
}

impl ApplicationRecord {
    /// Canonical approval status; `"Pending"` when unset.
    pub fn status(&self) -> &str {
        self.approval_status
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(PENDING)
    }

    pub fn is_approved(&self) -> bool {
        self.status() == APPROVED
    }

    pub fn is_rejected(&self) -> bool {
        self.status() == REJECTED
    }
}

/// Dashboard filter state. Toggles default to visible and the selectors
/// to `"All"`, matching an untouched filter panel.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    pub show_approved: bool,
    pub show_rejected: bool,
    pub age_group: String,
    pub risk_category: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            show_approved: true,
            show_rejected: true,
            age_group: ALL.to_string(),
            risk_category: ALL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskStatusBreakdown {
    pub risk: String,
    #[serde(rename = "Approved")]
    pub approved: u64,
    #[serde(rename = "Rejected")]
    pub rejected: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBucket {
    pub range: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimStatusBreakdown {
    pub claim_status: String,
    #[serde(rename = "Approved")]
    pub approved: u64,
    #[serde(rename = "Rejected")]
    pub rejected: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceAverages {
    pub driving_experience: String,
    pub avg_past_accidents: f64,
    pub avg_speeding_violations: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearMileage {
    pub vehicle_year: String,
    pub avg_annual_mileage: i64,
}

/// Every named summary the charting layer binds to, recomputed as a whole
/// on each change to the records or the filters.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_applications: u64,
    pub approved: u64,
    pub rejected: u64,
    pub approval_distribution: Vec<CategoryCount>,
    pub risk_by_status: Vec<RiskStatusBreakdown>,
    pub safe_driving: Vec<CategoryCount>,
    pub credit_score_bins: Vec<ScoreBucket>,
    pub claims_by_status: Vec<ClaimStatusBreakdown>,
    pub experience_averages: Vec<ExperienceAverages>,
    pub mileage_distribution: Vec<CategoryCount>,
    pub mileage_by_vehicle_year: Vec<YearMileage>,
}

fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn de_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_number(&Value::deserialize(deserializer)?))
}

fn de_counter<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_number(&Value::deserialize(deserializer)?).unwrap_or(0.0))
}

fn de_group_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_fields_survive_mixed_types() {
        let record: ApplicationRecord = serde_json::from_str(
            r#"{
                "id": 569519,
                "credit_score": "not a number",
                "annual_mileage": "12000",
                "vehicle_year": 2018
            }"#,
        )
        .expect("record should deserialize");

        assert_eq!(record.id, "569519");
        assert_eq!(record.credit_score, None);
        assert_eq!(record.annual_mileage, 12000.0);
        assert_eq!(record.vehicle_year.as_deref(), Some("2018"));
        assert_eq!(record.past_accidents, 0.0);
    }

    #[test]
    fn status_defaults_to_pending() {
        let record = ApplicationRecord::default();
        assert_eq!(record.status(), PENDING);

        let blank = ApplicationRecord {
            approval_status: Some(String::new()),
            ..ApplicationRecord::default()
        };
        assert_eq!(blank.status(), PENDING);
    }
}
