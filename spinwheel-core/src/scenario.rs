//! Scenario rules: small headcount/sentinel predicates that force a fixed
//! predetermined order while they match.
use serde::{Deserialize, Serialize};

/// Matches a list of exactly `headcount` names that contains `sentinel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRule {
    pub headcount: usize,
    pub sentinel: String,
    /// Order forced while the rule matches. Empty means `[sentinel]`.
    #[serde(default)]
    pub forced_order: Vec<String>,
}

impl ScenarioRule {
    /// Rule whose forced order is just the sentinel.
    #[must_use]
    pub fn new(headcount: usize, sentinel: impl Into<String>) -> Self {
        Self {
            headcount,
            sentinel: sentinel.into(),
            forced_order: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_forced_order(mut self, order: Vec<String>) -> Self {
        self.forced_order = order;
        self
    }

    #[must_use]
    pub fn matches(&self, names: &[String]) -> bool {
        names.len() == self.headcount && names.iter().any(|name| name == &self.sentinel)
    }

    /// Predetermined order applied while the rule is active.
    #[must_use]
    pub fn forced_order(&self) -> &[String] {
        if self.forced_order.is_empty() {
            std::slice::from_ref(&self.sentinel)
        } else {
            &self.forced_order
        }
    }
}

/// Ordered rule list; the first matching rule wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioSet {
    rules: Vec<ScenarioRule>,
}

impl ScenarioSet {
    #[must_use]
    pub const fn new(rules: Vec<ScenarioRule>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &[ScenarioRule] {
        &self.rules
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule matching `names`, if any.
    #[must_use]
    pub fn active(&self, names: &[String]) -> Option<&ScenarioRule> {
        self.rules.iter().find(|rule| rule.matches(names))
    }

    #[must_use]
    pub fn is_active(&self, names: &[String]) -> bool {
        self.active(names).is_some()
    }
}

impl From<Vec<ScenarioRule>> for ScenarioSet {
    fn from(rules: Vec<ScenarioRule>) -> Self {
        Self::new(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn rule_requires_exact_headcount_and_sentinel() {
        let rule = ScenarioRule::new(4, "An");
        assert!(rule.matches(&names(&["A", "B", "C", "An"])));
        assert!(!rule.matches(&names(&["A", "B", "An"])));
        assert!(!rule.matches(&names(&["A", "B", "C", "D"])));
        assert!(!rule.matches(&names(&["A", "B", "C", "D", "An"])));
    }

    #[test]
    fn forced_order_defaults_to_sentinel() {
        let rule = ScenarioRule::new(4, "An");
        assert_eq!(rule.forced_order(), ["An"]);
        let custom = rule.with_forced_order(names(&["B", "An"]));
        assert_eq!(custom.forced_order(), ["B", "An"]);
    }

    #[test]
    fn first_matching_rule_wins() {
        let set = ScenarioSet::new(vec![
            ScenarioRule::new(3, "Zed"),
            ScenarioRule::new(3, "Amy").with_forced_order(names(&["Bo"])),
            ScenarioRule::new(3, "Bo"),
        ]);
        let list = names(&["Amy", "Bo", "Cy"]);
        let rule = set.active(&list).expect("rule matches");
        assert_eq!(rule.sentinel, "Amy");
        assert!(!set.is_active(&names(&["Amy"])));
    }

    #[test]
    fn rules_deserialize_from_json() {
        let set: ScenarioSet =
            serde_json::from_str(r#"[{"headcount":4,"sentinel":"An"}]"#).expect("parse rules");
        assert_eq!(set.rules().len(), 1);
        assert!(set.rules()[0].forced_order.is_empty());
    }
}
