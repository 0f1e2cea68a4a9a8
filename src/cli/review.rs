use std::sync::Arc;

use console::style;

use crate::cli::commands::ReviewArgs;
use crate::db::Database;
use crate::engine;
use crate::errors::WardenError;
use crate::inspector::FixtureInspector;
use crate::models::{ReviewRecord, ReviewStatus, Severity};
use crate::pipeline::{AnalysisPipeline, ReviewTask};

/// One-shot review: create the record, run the pipeline inline against a
/// fixture inventory, and print the outcome. No queue or worker involved.
pub async fn handle_review(args: ReviewArgs) -> Result<(), WardenError> {
    let db = Database::new(&args.db)?;

    let pillars = parse_pillars(args.pillars.as_deref());
    let review_id = uuid::Uuid::new_v4().to_string();
    let record = ReviewRecord::new(&review_id, &args.account, &args.region, pillars.clone());
    db.create_review(&record)?;

    let api_key = args
        .api_key
        .clone()
        .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
        .unwrap_or_default();
    let inspector = Arc::new(FixtureInspector::new(&args.fixture));
    let engine = engine::create_engine(
        &args.provider,
        &api_key,
        args.model.as_deref(),
        args.base_url.as_deref(),
    )?;
    let pipeline = AnalysisPipeline::new(db.clone(), inspector, engine);

    let task = ReviewTask {
        review_id: review_id.clone(),
        aws_account_id: args.account.clone(),
        region: args.region.clone(),
        pillars,
    };
    pipeline.run(&task).await?;

    let finished = db
        .latest_review(&review_id)?
        .ok_or_else(|| WardenError::Internal("Review record disappeared".into()))?;
    print_summary(&finished);
    Ok(())
}

fn parse_pillars(raw: Option<&str>) -> Vec<String> {
    let parsed: Vec<String> = raw
        .unwrap_or("all")
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    if parsed.is_empty() {
        vec!["all".to_string()]
    } else {
        parsed
    }
}

fn print_summary(record: &ReviewRecord) {
    let status = match record.status {
        ReviewStatus::Completed => style(record.status.as_str()).green().bold(),
        ReviewStatus::Failed => style(record.status.as_str()).red().bold(),
        _ => style(record.status.as_str()).yellow().bold(),
    };

    println!();
    println!(
        "{} {}  account {}  region {}",
        style("Review").bold(),
        style(&record.review_id).cyan(),
        record.aws_account_id,
        record.region
    );
    println!("  status: {}", status);
    if let Some(score) = record.score {
        println!("  score:  {}", style(format!("{:.1}", score)).bold());
    }
    if let Some(error) = &record.error_message {
        println!("  error:  {}", style(error).red());
    }

    if !record.findings.is_empty() {
        println!();
        println!("{}", style("Findings").bold());
        for finding in &record.findings {
            let severity = match finding.severity {
                Severity::Critical => style(finding.severity.as_str()).red().bold(),
                Severity::High => style(finding.severity.as_str()).red(),
                Severity::Medium => style(finding.severity.as_str()).yellow(),
                Severity::Low => style(finding.severity.as_str()).dim(),
            };
            println!(
                "  {} [{}] {} ({})",
                severity,
                finding.pillar.as_str(),
                finding.title,
                finding.resource_arn
            );
        }
    }

    if !record.recommendations.is_empty() {
        println!();
        println!("{}", style("Recommendations").bold());
        for rec in &record.recommendations {
            println!("  {} {}", style("->").dim(), rec.title);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pillars() {
        assert_eq!(parse_pillars(None), vec!["all".to_string()]);
        assert_eq!(
            parse_pillars(Some("Security, COST")),
            vec!["security".to_string(), "cost".to_string()]
        );
        assert_eq!(parse_pillars(Some(" , ")), vec!["all".to_string()]);
    }
}
