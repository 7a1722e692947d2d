use serde::{Deserialize, Serialize};

use super::{RuleId, RuleResult, Severity};

/// Roll-up of a batch of rule results for triage views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSummary {
    pub evaluated: usize,
    pub passed: usize,
    pub failed: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_severity: Option<Severity>,
    pub failed_rules: Vec<RuleId>,
}

impl RuleSummary {
    pub fn from_results(results: &[RuleResult]) -> Self {
        let mut summary = RuleSummary {
            evaluated: results.len(),
            ..RuleSummary::default()
        };

        for result in results {
            if result.passed {
                summary.passed += 1;
                continue;
            }

            summary.failed += 1;
            summary.failed_rules.push(result.rule_id);
            summary.highest_severity = summary.highest_severity.max(result.severity);
        }

        summary
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}
