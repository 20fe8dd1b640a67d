use std::fmt::Write;

use chrono::NaiveDate;

use crate::aggregate;
use crate::filter;
use crate::models::{ApplicationRecord, FilterCriteria, ALL};

fn scope_label(criteria: &FilterCriteria, id_selector: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !criteria.show_approved {
        parts.push("approved hidden".to_string());
    }
    if !criteria.show_rejected {
        parts.push("rejected hidden".to_string());
    }
    if criteria.age_group != ALL {
        parts.push(format!("age group {}", criteria.age_group));
    }
    if criteria.risk_category != ALL {
        parts.push(format!("risk category {}", criteria.risk_category));
    }
    if id_selector != ALL {
        parts.push(format!("id {id_selector}"));
    }

    if parts.is_empty() {
        "all applications".to_string()
    } else {
        parts.join(", ")
    }
}

fn kpi_line(label: &str, value: u64, total: u64) -> String {
    let share = aggregate::percentage_label(value, total);
    if share.is_empty() {
        format!("- {label}: {value}")
    } else {
        format!("- {label}: {value} ({share})")
    }
}

pub fn build_report(
    records: &[ApplicationRecord],
    criteria: &FilterCriteria,
    id_selector: &str,
    generated_on: NaiveDate,
) -> String {
    let summary = aggregate::build_summary(records, criteria);
    let visible = filter::filter_records(records, criteria);
    let table = filter::select_by_id(&visible, id_selector);
    let status_total = summary.approved + summary.rejected;

    let mut output = String::new();

    let _ = writeln!(output, "# Insurance Risk & Approval Report");
    let _ = writeln!(
        output,
        "Generated on {} for {}",
        generated_on,
        scope_label(criteria, id_selector)
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Applications");
    let _ = writeln!(output, "- Total: {}", summary.total_applications);
    let _ = writeln!(output, "{}", kpi_line("Approved", summary.approved, status_total));
    let _ = writeln!(output, "{}", kpi_line("Rejected", summary.rejected, status_total));

    let _ = writeln!(output);
    let _ = writeln!(output, "## Approval by Risk Category");
    for row in &summary.risk_by_status {
        let _ = writeln!(
            output,
            "- {}: {} approved, {} rejected",
            row.risk, row.approved, row.rejected
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Safe Driving");
    for row in &summary.safe_driving {
        let _ = writeln!(output, "- {}: {}", row.name, row.value);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Credit Score Distribution");
    if summary.credit_score_bins.is_empty() {
        let _ = writeln!(output, "No applications with a numeric credit score.");
    } else {
        for bucket in &summary.credit_score_bins {
            let _ = writeln!(output, "- {}: {}", bucket.range, bucket.count);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Claims by Status");
    if summary.claims_by_status.is_empty() {
        let _ = writeln!(output, "No applications matched the current filters.");
    } else {
        for row in &summary.claims_by_status {
            let _ = writeln!(
                output,
                "- {}: {} approved, {} rejected",
                row.claim_status, row.approved, row.rejected
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Averages by Driving Experience");
    if summary.experience_averages.is_empty() {
        let _ = writeln!(output, "No applications matched the current filters.");
    } else {
        for row in &summary.experience_averages {
            let _ = writeln!(
                output,
                "- {}: {:.2} accidents, {:.2} speeding violations",
                row.driving_experience, row.avg_past_accidents, row.avg_speeding_violations
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Annual Mileage Distribution (all applications)");
    for row in &summary.mileage_distribution {
        let _ = writeln!(output, "- {}: {}", row.name, row.value);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Average Mileage by Vehicle Year (all applications)");
    if summary.mileage_by_vehicle_year.is_empty() {
        let _ = writeln!(output, "No applications loaded.");
    } else {
        for row in &summary.mileage_by_vehicle_year {
            let _ = writeln!(
                output,
                "- {}: {} miles",
                row.vehicle_year, row.avg_annual_mileage
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Application Overview");
    if table.is_empty() {
        let _ = writeln!(output, "No applications matched the current filters.");
    } else {
        let _ = writeln!(output, "| ID | Credit | Vehicle | Risk Profile | Status |");
        let _ = writeln!(output, "| --- | --- | --- | --- | --- |");
        for record in table.iter().take(10) {
            let credit = record
                .credit_score
                .map(|score| format!("{score}"))
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} |",
                record.id,
                credit,
                record.vehicle_type.as_deref().unwrap_or("-"),
                record.risk_category.as_deref().unwrap_or("-"),
                record.status()
            );
        }
    }

    output
}
