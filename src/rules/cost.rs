use super::RuleOutcome;
use crate::inspector::snapshot::ResourceSnapshot;

/// Cost optimization pillar. No automated checks ship yet; the pillar stays
/// dispatchable so selection treats all four pillars uniformly.
pub fn evaluate(_snapshot: &ResourceSnapshot) -> RuleOutcome {
    RuleOutcome::default()
}
