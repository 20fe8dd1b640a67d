use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::{error, info};

use crate::models::ApplicationRecord;
use crate::normalize::normalize;

pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/Surya-461/users/main/users.json";

/// Wire shape of the data document. The `applications` key is optional so
/// an empty or partial document still parses.
#[derive(Debug, Default, Deserialize)]
struct ApplicationsDocument {
    #[serde(default)]
    applications: Vec<ApplicationRecord>,
}

/// Fetch the applications document from `url` and normalize every record.
pub async fn fetch_applications(url: &str) -> anyhow::Result<Vec<ApplicationRecord>> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("failed to fetch {url}"))?
        .error_for_status()
        .context("data endpoint returned an error status")?;
    let document: ApplicationsDocument = response
        .json()
        .await
        .context("failed to parse applications document")?;
    Ok(normalize_all(document.applications))
}

/// Read the applications document from a local file and normalize every
/// record.
pub fn read_applications(path: &Path) -> anyhow::Result<Vec<ApplicationRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let document: ApplicationsDocument =
        serde_json::from_str(&raw).context("failed to parse applications document")?;
    Ok(normalize_all(document.applications))
}

/// Load from `file` when given, otherwise fetch from `url`. A failed load
/// is logged and collapses to an empty working set so every downstream
/// surface renders a benign empty state instead of crashing.
pub async fn load_or_empty(url: &str, file: Option<&Path>) -> Vec<ApplicationRecord> {
    let result = match file {
        Some(path) => read_applications(path),
        None => fetch_applications(url).await,
    };

    match result {
        Ok(applications) => {
            info!("loaded {} applications", applications.len());
            applications
        }
        Err(err) => {
            error!("failed to load applications: {err:#}");
            Vec::new()
        }
    }
}

fn normalize_all(applications: Vec<ApplicationRecord>) -> Vec<ApplicationRecord> {
    applications.iter().map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_applications_key_parses_as_empty() {
        let document: ApplicationsDocument = serde_json::from_str("{}").expect("valid document");
        assert!(document.applications.is_empty());
    }

    #[test]
    fn records_are_normalized_on_load() {
        let document: ApplicationsDocument = serde_json::from_str(
            r#"{
                "applications": [
                    { "id": 1, "policy_status": "Rejected", "risk_category": "High" },
                    { "id": 2 }
                ]
            }"#,
        )
        .expect("valid document");
        let records = normalize_all(document.applications);

        assert_eq!(records[0].status(), "Rejected");
        assert_eq!(records[0].risk_category.as_deref(), Some("High Risk"));
        assert_eq!(records[1].status(), "Pending");
    }
}
