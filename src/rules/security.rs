use super::RuleOutcome;
use crate::inspector::snapshot::ResourceSnapshot;
use crate::models::{Effort, Finding, Pillar, Priority, Recommendation, Severity};

/// Security pillar: every storage bucket without server-side encryption is a
/// HIGH finding with a matching Low-effort recommendation.
pub fn evaluate(snapshot: &ResourceSnapshot) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for bucket in &snapshot.services.storage.items {
        if bucket.encryption.is_some() {
            continue;
        }
        outcome.findings.push(Finding {
            id: format!("s3-encryption-{}", bucket.name),
            pillar: Pillar::Security,
            title: "S3 Bucket Not Encrypted".to_string(),
            description: format!(
                "S3 bucket {} does not have server-side encryption enabled",
                bucket.name
            ),
            severity: Severity::High,
            resource_arn: format!("arn:aws:s3:::{}", bucket.name),
            service: "S3".to_string(),
        });
        outcome.recommendations.push(Recommendation {
            id: format!("s3-encryption-rec-{}", bucket.name),
            title: "Enable S3 Bucket Encryption".to_string(),
            description: format!(
                "Enable server-side encryption for S3 bucket {}",
                bucket.name
            ),
            priority: Priority::High,
            effort: Effort::Low,
            implementation_guide: "Use AWS KMS or AES-256 server-side encryption for the bucket"
                .to_string(),
        });
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::snapshot::{CategoryReport, ServiceInventory, StorageBucket};

    fn bucket(name: &str, encryption: Option<&str>) -> StorageBucket {
        StorageBucket {
            name: name.to_string(),
            encryption: encryption.map(str::to_string),
            versioning_enabled: false,
        }
    }

    fn snapshot(buckets: Vec<StorageBucket>) -> ResourceSnapshot {
        let services = ServiceInventory {
            storage: CategoryReport::loaded(buckets),
            ..Default::default()
        };
        ResourceSnapshot::new("123456789012", "us-east-1", services)
    }

    #[test]
    fn test_unencrypted_bucket_flagged() {
        let outcome = evaluate(&snapshot(vec![
            bucket("plain", None),
            bucket("sealed", Some("aws:kms")),
        ]));

        assert_eq!(outcome.findings.len(), 1);
        let finding = &outcome.findings[0];
        assert_eq!(finding.id, "s3-encryption-plain");
        assert_eq!(finding.severity, Severity::High);
        assert_eq!(finding.resource_arn, "arn:aws:s3:::plain");
        assert_eq!(finding.service, "S3");

        assert_eq!(outcome.recommendations.len(), 1);
        let rec = &outcome.recommendations[0];
        assert_eq!(rec.id, "s3-encryption-rec-plain");
        assert_eq!(rec.effort, Effort::Low);
    }

    #[test]
    fn test_one_finding_per_unencrypted_bucket_with_unique_ids() {
        let outcome = evaluate(&snapshot(vec![
            bucket("a", None),
            bucket("b", None),
            bucket("c", Some("AES256")),
        ]));

        assert_eq!(outcome.findings.len(), 2);
        assert_ne!(outcome.findings[0].id, outcome.findings[1].id);
        assert_eq!(outcome.recommendations.len(), 2);
    }

    #[test]
    fn test_rerun_produces_same_ids() {
        let snap = snapshot(vec![bucket("stable", None)]);
        let first = evaluate(&snap);
        let second = evaluate(&snap);
        assert_eq!(first.findings[0].id, second.findings[0].id);
    }

    #[test]
    fn test_all_encrypted_is_clean() {
        let outcome = evaluate(&snapshot(vec![bucket("sealed", Some("aws:kms"))]));
        assert!(outcome.findings.is_empty());
        assert!(outcome.recommendations.is_empty());
    }
}
