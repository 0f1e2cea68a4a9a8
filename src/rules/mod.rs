pub mod cost;
pub mod performance;
pub mod reliability;
pub mod security;

use crate::inspector::snapshot::ResourceSnapshot;
use crate::models::pillar::pillar_enabled;
use crate::models::{Finding, Pillar, Recommendation};

/// Findings and recommendations produced by one or more pillar rule sets.
#[derive(Debug, Default)]
pub struct RuleOutcome {
    pub findings: Vec<Finding>,
    pub recommendations: Vec<Recommendation>,
}

impl RuleOutcome {
    pub fn extend(&mut self, other: RuleOutcome) {
        self.findings.extend(other.findings);
        self.recommendations.extend(other.recommendations);
    }
}

/// A pillar's rule set: a pure function over the snapshot.
pub type PillarEvaluator = fn(&ResourceSnapshot) -> RuleOutcome;

/// All four pillars stay dispatchable, including the placeholder ones, so
/// selection is set membership rather than structure.
pub fn evaluators() -> [(Pillar, PillarEvaluator); 4] {
    [
        (Pillar::Security, security::evaluate),
        (Pillar::Reliability, reliability::evaluate),
        (Pillar::Performance, performance::evaluate),
        (Pillar::Cost, cost::evaluate),
    ]
}

/// Run the rule sets enabled by `requested` (pillar tags or the `all`
/// sentinel) in fixed pillar order and concatenate their output.
pub fn evaluate(snapshot: &ResourceSnapshot, requested: &[String]) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();
    for (pillar, evaluator) in evaluators() {
        if pillar_enabled(requested, pillar) {
            outcome.extend(evaluator(snapshot));
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::snapshot::{
        CategoryReport, DatabaseInstance, ServiceInventory, StorageBucket,
    };

    fn snapshot_with_issues() -> ResourceSnapshot {
        let services = ServiceInventory {
            storage: CategoryReport::loaded(vec![StorageBucket {
                name: "open-bucket".to_string(),
                encryption: None,
                versioning_enabled: false,
            }]),
            database: CategoryReport::loaded(vec![DatabaseInstance {
                identifier: "orders-db".to_string(),
                instance_class: "db.t3.medium".to_string(),
                engine: "postgres".to_string(),
                storage_encrypted: true,
                multi_az: false,
                backup_retention_days: 7,
            }]),
            ..Default::default()
        };
        ResourceSnapshot::new("123456789012", "us-east-1", services)
    }

    #[test]
    fn test_all_sentinel_runs_every_pillar() {
        let outcome = evaluate(&snapshot_with_issues(), &["all".to_string()]);
        // One security finding, one reliability finding.
        assert_eq!(outcome.findings.len(), 2);
        assert_eq!(outcome.findings[0].pillar, Pillar::Security);
        assert_eq!(outcome.findings[1].pillar, Pillar::Reliability);
        assert_eq!(outcome.recommendations.len(), 1);
    }

    #[test]
    fn test_explicit_pillar_selection() {
        let outcome = evaluate(&snapshot_with_issues(), &["reliability".to_string()]);
        assert_eq!(outcome.findings.len(), 1);
        assert_eq!(outcome.findings[0].pillar, Pillar::Reliability);
        assert!(outcome.recommendations.is_empty());
    }

    #[test]
    fn test_placeholder_pillars_stay_callable() {
        let outcome = evaluate(
            &snapshot_with_issues(),
            &["performance".to_string(), "cost".to_string()],
        );
        assert!(outcome.findings.is_empty());
        assert!(outcome.recommendations.is_empty());
    }

    #[test]
    fn test_no_matching_pillar_yields_nothing() {
        let outcome = evaluate(&snapshot_with_issues(), &["sustainability".to_string()]);
        assert!(outcome.findings.is_empty());
    }
}
