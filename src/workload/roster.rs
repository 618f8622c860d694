use serde::{Deserialize, Serialize};

/// Ordered set of people whose workload is tracked.
///
/// Membership is configuration, not derived from task data: a member with
/// no tasks still gets an entry, and owners outside the roster get none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    members: Vec<String>,
}

impl Roster {
    /// Keeps the first occurrence of each name and drops blank ones.
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for member in members {
            let member = member.into().trim().to_string();
            if !member.is_empty() && !unique.contains(&member) {
                unique.push(member);
            }
        }
        Self { members: unique }
    }

    /// Parses a comma-separated list; an empty result falls back to the default roster.
    pub fn parse(list: &str) -> Self {
        let roster = Self::new(list.split(','));
        if roster.is_empty() {
            Self::default()
        } else {
            roster
        }
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new((1..=5).map(|n| format!("User {}", n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let roster = Roster::default();
        assert_eq!(roster.members().len(), 5);
        assert_eq!(roster.members()[0], "User 1");
        assert_eq!(roster.members()[4], "User 5");
    }

    #[test]
    fn test_parse_trims_and_dedupes() {
        let roster = Roster::parse(" Ana , Ben,,Ana, Cy ");
        assert_eq!(roster.members(), &["Ana", "Ben", "Cy"]);
    }

    #[test]
    fn test_parse_empty_falls_back_to_default() {
        assert_eq!(Roster::parse(" , "), Roster::default());
        assert_eq!(Roster::parse(""), Roster::default());
    }
}
