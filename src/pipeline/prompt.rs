use crate::errors::WardenError;
use crate::inspector::snapshot::ResourceSnapshot;
use crate::utils::truncation::truncate_output;

use super::analysis::ReviewTask;

pub const SYSTEM_PROMPT: &str = "\
You are an AWS Well-Architected Framework expert reviewing a cloud account. \
Evaluate the supplied resource inventory against the requested pillars and \
report specific findings with actionable remediation. Every finding must name \
the affected service and resource and carry a severity of LOW, MEDIUM, HIGH \
or CRITICAL. Respond with a single JSON object.";

/// Build the review task prompt from the job parameters and the inventory.
pub fn review_prompt(task: &ReviewTask, snapshot: &ResourceSnapshot) -> Result<String, WardenError> {
    let inventory = serde_json::to_string_pretty(&snapshot.services)?;
    Ok(format!(
        "Perform a Well-Architected review for AWS account {} in region {}, \
         focusing on pillars: {}.\n\n\
         Resource inventory:\n{}\n\n\
         Return a JSON object with \"findings\", \"recommendations\" and \"score\" (0-100).\n\
         Each finding needs: id, pillar, title, description, severity \
         (LOW|MEDIUM|HIGH|CRITICAL), resourceArn, service.\n\
         Each recommendation needs: id, title, description, priority, effort \
         (Low|Medium|High), implementationGuide.\n\
         Return ONLY the JSON, no other text.",
        task.aws_account_id,
        task.region,
        task.pillars.join(", "),
        truncate_output(&inventory),
    ))
}
