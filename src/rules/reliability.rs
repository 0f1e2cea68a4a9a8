use super::RuleOutcome;
use crate::inspector::snapshot::ResourceSnapshot;
use crate::models::{Finding, Pillar, Severity};

/// Reliability pillar: every database instance without multi-AZ redundancy is
/// a MEDIUM finding. No recommendation is emitted for this rule.
pub fn evaluate(snapshot: &ResourceSnapshot) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for instance in &snapshot.services.database.items {
        if instance.multi_az {
            continue;
        }
        outcome.findings.push(Finding {
            id: format!("rds-multiaz-{}", instance.identifier),
            pillar: Pillar::Reliability,
            title: "RDS Instance Not Multi-AZ".to_string(),
            description: format!(
                "RDS instance {} is not configured for Multi-AZ deployment",
                instance.identifier
            ),
            severity: Severity::Medium,
            resource_arn: format!(
                "arn:aws:rds:{}:{}:db:{}",
                snapshot.region, snapshot.account_id, instance.identifier
            ),
            service: "RDS".to_string(),
        });
    }

    outcome
}
