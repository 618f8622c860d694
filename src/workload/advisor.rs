use super::aggregator::WorkloadEntry;
use super::status::WorkloadStatus;

pub const ALL_AVAILABLE: &str =
    "All team members are available. Start assigning tasks to see workload distribution!";
pub const WELL_BALANCED: &str = "Team workload is well balanced. Great job!";

pub type Predicate = fn(&[WorkloadEntry]) -> bool;
pub type MessageBuilder = fn(&[WorkloadEntry]) -> String;

/// One step of the suggestion precedence chain.
pub struct AdvisorRule {
    pub name: &'static str,
    pub applies: Predicate,
    pub message: MessageBuilder,
}

/// Evaluated top to bottom; the first rule whose predicate holds produces
/// the suggestion. The last rule always applies.
pub static RULES: [AdvisorRule; 6] = [
    AdvisorRule {
        name: "no_tasks",
        applies: |team| total_tasks(team) == 0,
        message: |_| ALL_AVAILABLE.to_string(),
    },
    AdvisorRule {
        name: "overloaded_and_available",
        applies: |team| {
            has(team, WorkloadStatus::Overloaded) && has(team, WorkloadStatus::Available)
        },
        message: |team| {
            format!(
                "{} has a high workload. Consider reassigning some tasks to {} to balance the team.",
                first_name(team, WorkloadStatus::Overloaded),
                first_name(team, WorkloadStatus::Available)
            )
        },
    },
    AdvisorRule {
        name: "overloaded_and_in_focus",
        applies: |team| {
            has(team, WorkloadStatus::Overloaded) && has(team, WorkloadStatus::InFocus)
        },
        message: |team| {
            format!(
                "{} is overloaded. Consider redistributing tasks to {} or other team members.",
                first_name(team, WorkloadStatus::Overloaded),
                first_name(team, WorkloadStatus::InFocus)
            )
        },
    },
    AdvisorRule {
        name: "overloaded",
        applies: |team| has(team, WorkloadStatus::Overloaded),
        message: |team| {
            format!(
                "{} is overloaded. Consider redistributing tasks among team members.",
                first_name(team, WorkloadStatus::Overloaded)
            )
        },
    },
    AdvisorRule {
        name: "available",
        applies: |team| has(team, WorkloadStatus::Available),
        message: |team| {
            format!(
                "{} is available and can take on more tasks to help balance the team workload.",
                first_name(team, WorkloadStatus::Available)
            )
        },
    },
    AdvisorRule {
        name: "balanced",
        applies: |_| true,
        message: |_| WELL_BALANCED.to_string(),
    },
];

fn total_tasks(team: &[WorkloadEntry]) -> usize {
    team.iter().map(|entry| entry.tasks).sum()
}

fn has(team: &[WorkloadEntry], status: WorkloadStatus) -> bool {
    team.iter().any(|entry| entry.status == status)
}

/// Earliest member in roster order with `status`.
fn first_with(team: &[WorkloadEntry], status: WorkloadStatus) -> Option<&WorkloadEntry> {
    team.iter().find(|entry| entry.status == status)
}

fn first_name(team: &[WorkloadEntry], status: WorkloadStatus) -> &str {
    first_with(team, status)
        .map(|entry| entry.name.as_str())
        .unwrap_or_default()
}

/// The rule that decides the suggestion for `team`.
pub fn matching_rule(team: &[WorkloadEntry]) -> &'static AdvisorRule {
    RULES
        .iter()
        .find(|rule| (rule.applies)(team))
        .unwrap_or(&RULES[RULES.len() - 1])
}

pub fn suggest(team: &[WorkloadEntry]) -> String {
    (matching_rule(team).message)(team)
}
