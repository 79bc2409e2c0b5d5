//! Reactive rule table
//!
//! Visibility effects are level-triggered: they are re-evaluated whenever
//! their condition field changes and whenever the panel is (re)filled.
//! Value effects are edit-triggered: they only run after the user edits the
//! condition field, so loading a stored config never rewrites it.

use super::field::{FieldId, FieldValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// A bool field is on
    Checked(FieldId),
    /// A URL list field is empty
    Emptied(FieldId),
}

impl Condition {
    pub fn field(&self) -> FieldId {
        match self {
            Condition::Checked(id) | Condition::Emptied(id) => *id,
        }
    }

    pub fn holds(&self, value: &FieldValue) -> bool {
        match self {
            Condition::Checked(_) => value.as_bool().unwrap_or(false),
            Condition::Emptied(_) => value.as_urls().map(|urls| urls.is_empty()).unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Target is visible exactly while the condition holds
    Show(FieldId),
    /// Target bool is set once the condition holds after an edit
    SetChecked(FieldId, bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub when: Condition,
    pub then: Effect,
}

impl Rule {
    pub const fn new(when: Condition, then: Effect) -> Self {
        Self { when, then }
    }

    pub fn is_level_triggered(&self) -> bool {
        matches!(self.then, Effect::Show(_))
    }
}

/// Rules of the connection settings page
pub fn connect_rules() -> Vec<Rule> {
    vec![
        // post URLs only matter while posting is on
        Rule::new(
            Condition::Checked(FieldId::HttpEnablePost),
            Effect::Show(FieldId::HttpPostUrls),
        ),
        Rule::new(
            Condition::Checked(FieldId::ReverseWsEnable),
            Effect::Show(FieldId::ReverseWsUrls),
        ),
        // reverse WS without targets cannot stay on
        Rule::new(
            Condition::Emptied(FieldId::ReverseWsUrls),
            Effect::SetChecked(FieldId::ReverseWsEnable, false),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conditions() {
        let checked = Condition::Checked(FieldId::WsEnable);
        assert!(checked.holds(&FieldValue::Bool(true)));
        assert!(!checked.holds(&FieldValue::Bool(false)));
        assert!(!checked.holds(&FieldValue::Text("true".to_string())));

        let emptied = Condition::Emptied(FieldId::ReverseWsUrls);
        assert!(emptied.holds(&FieldValue::Urls(vec![])));
        assert!(!emptied.holds(&FieldValue::Urls(vec!["ws://a/".to_string()])));
    }

    #[test]
    fn test_connect_rules_shape() {
        let rules = connect_rules();
        assert_eq!(rules.iter().filter(|r| r.is_level_triggered()).count(), 2);
        assert_eq!(rules[2].when.field(), FieldId::ReverseWsUrls);
    }
}
