use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};

mod aggregate;
mod filter;
mod loader;
mod models;
mod normalize;
mod profile;
mod report;

use models::{DashboardSummary, FilterCriteria};
use profile::ApplicantProfile;

#[derive(Parser)]
#[command(name = "findrive-analytics")]
#[command(about = "Underwriting analytics for FinDrive insurance applications", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the aggregated dashboard summaries
    Summary {
        #[arg(long, default_value = loader::DEFAULT_DATA_URL)]
        url: String,
        /// Read the applications document from a local file instead
        #[arg(long)]
        file: Option<PathBuf>,
        /// Hide approved applications
        #[arg(long)]
        hide_approved: bool,
        /// Hide rejected applications
        #[arg(long)]
        hide_rejected: bool,
        #[arg(long, default_value = "All")]
        age_group: String,
        #[arg(long, default_value = "All")]
        risk_category: String,
        /// Emit the summaries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = loader::DEFAULT_DATA_URL)]
        url: String,
        /// Read the applications document from a local file instead
        #[arg(long)]
        file: Option<PathBuf>,
        /// Hide approved applications
        #[arg(long)]
        hide_approved: bool,
        /// Hide rejected applications
        #[arg(long)]
        hide_rejected: bool,
        #[arg(long, default_value = "All")]
        age_group: String,
        #[arg(long, default_value = "All")]
        risk_category: String,
        /// Narrow the overview table to one applicant id
        #[arg(long, default_value = "All")]
        id: String,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Show one applicant's risk profile
    Profile {
        #[arg(long, default_value = loader::DEFAULT_DATA_URL)]
        url: String,
        /// Read the applications document from a local file instead
        #[arg(long)]
        file: Option<PathBuf>,
        /// Applicant id
        #[arg(long)]
        id: String,
        /// Emit the profile as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Summary {
            url,
            file,
            hide_approved,
            hide_rejected,
            age_group,
            risk_category,
            json,
        } => {
            let records = loader::load_or_empty(&url, file.as_deref()).await;
            let criteria = FilterCriteria {
                show_approved: !hide_approved,
                show_rejected: !hide_rejected,
                age_group,
                risk_category,
            };
            let summary = aggregate::build_summary(&records, &criteria);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }
        Commands::Report {
            url,
            file,
            hide_approved,
            hide_rejected,
            age_group,
            risk_category,
            id,
            out,
        } => {
            let records = loader::load_or_empty(&url, file.as_deref()).await;
            let criteria = FilterCriteria {
                show_approved: !hide_approved,
                show_rejected: !hide_rejected,
                age_group,
                risk_category,
            };
            let report =
                report::build_report(&records, &criteria, &id, Utc::now().date_naive());
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
        Commands::Profile { url, file, id, json } => {
            let records = loader::load_or_empty(&url, file.as_deref()).await;
            match profile::build_profile(&records, &id) {
                Some(profile) if json => {
                    println!("{}", serde_json::to_string_pretty(&profile)?);
                }
                Some(profile) => print_profile(&profile),
                None => println!("No applicant found with id {id}."),
            }
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn print_summary(summary: &DashboardSummary) {
    println!(
        "Applications: {} total ({} approved / {} rejected)",
        summary.total_applications, summary.approved, summary.rejected
    );

    println!();
    println!("Approval by risk category:");
    for row in &summary.risk_by_status {
        println!(
            "- {}: {} approved, {} rejected",
            row.risk, row.approved, row.rejected
        );
    }

    println!();
    println!("Safe driving:");
    for row in &summary.safe_driving {
        println!("- {}: {}", row.name, row.value);
    }

    if !summary.credit_score_bins.is_empty() {
        println!();
        println!("Credit score bins:");
        for bucket in &summary.credit_score_bins {
            println!("- {}: {}", bucket.range, bucket.count);
        }
    }

    if !summary.claims_by_status.is_empty() {
        println!();
        println!("Claims by status:");
        for row in &summary.claims_by_status {
            println!(
                "- {}: {} approved, {} rejected",
                row.claim_status, row.approved, row.rejected
            );
        }
    }

    if !summary.experience_averages.is_empty() {
        println!();
        println!("Averages by driving experience:");
        for row in &summary.experience_averages {
            println!(
                "- {}: {:.2} accidents, {:.2} speeding violations",
                row.driving_experience, row.avg_past_accidents, row.avg_speeding_violations
            );
        }
    }

    println!();
    println!("Annual mileage distribution (all applications):");
    for row in &summary.mileage_distribution {
        println!("- {}: {}", row.name, row.value);
    }

    if !summary.mileage_by_vehicle_year.is_empty() {
        println!();
        println!("Average mileage by vehicle year (all applications):");
        for row in &summary.mileage_by_vehicle_year {
            println!("- {}: {} miles", row.vehicle_year, row.avg_annual_mileage);
        }
    }
}

fn print_profile(profile: &ApplicantProfile) {
    println!("Applicant {}", profile.id);
    println!("- Vehicle type: {}", profile.vehicle_type);
    println!("- Annual mileage: {}", profile.mileage_label);
    println!(
        "- Credit score: {} ({})",
        profile.credit_score, profile.risk_level
    );
    println!("- Violations:");
    for violation in &profile.violations {
        println!("  - {}: {}", violation.name, violation.value);
    }
}
