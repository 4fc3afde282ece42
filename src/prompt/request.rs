//! Prompt request and response types.
//!
//! These are the whole contract between the engine and a decision
//! source. Options carry opaque string ids, so a decision source never
//! needs engine types to answer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::PromptError;

/// Shape of the answer a prompt expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromptKind {
    /// Pick one target.
    Target,
    /// Pick one option.
    Choice,
    /// Pick between `min_choices` and `max_choices` options.
    MultiChoice,
    /// Free text.
    Text,
    /// Boolean.
    YesNo,
    /// Pick one card.
    CardChoice,
    /// An integer, optionally bounded.
    Number,
}

impl PromptKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PromptKind::Target => "target",
            PromptKind::Choice => "choice",
            PromptKind::MultiChoice => "multi_choice",
            PromptKind::Text => "text",
            PromptKind::YesNo => "yes_no",
            PromptKind::CardChoice => "card_choice",
            PromptKind::Number => "number",
        }
    }

    /// Kinds answered with exactly one selected id.
    #[must_use]
    pub const fn is_single_select(self) -> bool {
        matches!(self, PromptKind::Target | PromptKind::Choice | PromptKind::CardChoice)
    }
}

/// One selectable option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptOption {
    /// Opaque id echoed back in the response.
    pub id: String,
    /// Display text.
    pub label: String,
}

impl PromptOption {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A decision the engine needs from a player.
///
/// ## Example
///
/// ```
/// use mtg_rules::prompt::{PromptKind, PromptRequest, PromptResponse};
///
/// let request = PromptRequest::new(PromptKind::MultiChoice, "Choose cards to bottom")
///     .with_option("card-1", "Plains")
///     .with_option("card-2", "Island")
///     .with_option("card-3", "Forest")
///     .with_choices(2, 2);
///
/// assert!(request.validate(&PromptResponse::select(["card-1", "card-3"])).is_ok());
/// assert!(request.validate(&PromptResponse::select(["card-1"])).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    pub kind: PromptKind,
    pub title: String,
    pub description: String,
    pub options: Vec<PromptOption>,
    pub min_choices: usize,
    pub max_choices: usize,
    pub min_number: Option<i64>,
    pub max_number: Option<i64>,
    /// Used when the player has no responder or the response is unusable.
    pub default: Option<PromptResponse>,
    /// Extra integer facts for the decision source (hand size, etc.).
    pub context: BTreeMap<String, i64>,
}

impl PromptRequest {
    #[must_use]
    pub fn new(kind: PromptKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: String::new(),
            options: Vec::new(),
            min_choices: 1,
            max_choices: 1,
            min_number: None,
            max_number: None,
            default: None,
            context: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_option(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(PromptOption::new(id, label));
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = PromptOption>) -> Self {
        self.options.extend(options);
        self
    }

    #[must_use]
    pub fn with_choices(mut self, min: usize, max: usize) -> Self {
        self.min_choices = min;
        self.max_choices = max;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, min: i64, max: i64) -> Self {
        self.min_number = Some(min);
        self.max_number = Some(max);
        self
    }

    #[must_use]
    pub fn with_default(mut self, response: PromptResponse) -> Self {
        self.default = Some(response);
        self
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: i64) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn option(&self, id: &str) -> Option<&PromptOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Check a response against this request.
    pub fn validate(&self, response: &PromptResponse) -> Result<(), PromptError> {
        let invalid = |reason: String| Err(PromptError::InvalidResponse(reason));

        match self.kind {
            PromptKind::YesNo => {
                if response.confirmed.is_none() {
                    return invalid("a yes/no answer is required".into());
                }
            }
            PromptKind::Text => {
                if response.text.is_none() {
                    return invalid("a text answer is required".into());
                }
            }
            PromptKind::Number => {
                let Some(value) = response.number else {
                    return invalid("a number is required".into());
                };
                if self.min_number.is_some_and(|min| value < min)
                    || self.max_number.is_some_and(|max| value > max)
                {
                    return invalid(format!("{} is out of bounds", value));
                }
            }
            PromptKind::Target | PromptKind::Choice | PromptKind::CardChoice => {
                if response.selected.len() != 1 {
                    return invalid(format!(
                        "exactly one option must be selected, got {}",
                        response.selected.len()
                    ));
                }
            }
            PromptKind::MultiChoice => {
                let count = response.selected.len();
                if count < self.min_choices || count > self.max_choices {
                    return invalid(format!(
                        "between {} and {} options must be selected, got {}",
                        self.min_choices, self.max_choices, count
                    ));
                }
            }
        }

        for (i, id) in response.selected.iter().enumerate() {
            if self.option(id).is_none() {
                return invalid(format!("unknown option {:?}", id));
            }
            if response.selected[..i].contains(id) {
                return invalid(format!("option {:?} selected twice", id));
            }
        }

        Ok(())
    }
}

/// A decision source's answer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptResponse {
    /// Selected option ids.
    pub selected: Vec<String>,
    pub text: Option<String>,
    pub number: Option<i64>,
    /// Yes/no answer.
    pub confirmed: Option<bool>,
}

impl PromptResponse {
    /// Select options by id.
    #[must_use]
    pub fn select<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn select_one(id: impl Into<String>) -> Self {
        Self::select([id.into()])
    }

    /// Select nothing (for optional multi-choice prompts).
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn number(value: i64) -> Self {
        Self {
            number: Some(value),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn yes_no(value: bool) -> Self {
        Self {
            confirmed: Some(value),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice() -> PromptRequest {
        PromptRequest::new(PromptKind::Choice, "Pick one")
            .with_option("a", "Alpha")
            .with_option("b", "Beta")
    }

    #[test]
    fn test_yes_no_requires_boolean() {
        let request = PromptRequest::new(PromptKind::YesNo, "Mulligan?");
        assert!(request.validate(&PromptResponse::yes_no(false)).is_ok());
        assert!(request.validate(&PromptResponse::text("no")).is_err());
    }

    #[test]
    fn test_single_select_requires_exactly_one() {
        let request = choice();
        assert!(request.validate(&PromptResponse::select_one("a")).is_ok());
        assert!(request.validate(&PromptResponse::none()).is_err());
        assert!(request.validate(&PromptResponse::select(["a", "b"])).is_err());
    }

    #[test]
    fn test_ids_must_name_options() {
        let request = choice();
        let err = request.validate(&PromptResponse::select_one("z")).unwrap_err();
        assert!(matches!(err, PromptError::InvalidResponse(_)));
    }

    #[test]
    fn test_multi_choice_bounds_and_duplicates() {
        let request = PromptRequest::new(PromptKind::MultiChoice, "Scry")
            .with_option("a", "Alpha")
            .with_option("b", "Beta")
            .with_choices(0, 2);

        assert!(request.validate(&PromptResponse::none()).is_ok());
        assert!(request.validate(&PromptResponse::select(["a", "b"])).is_ok());
        assert!(request.validate(&PromptResponse::select(["a", "a"])).is_err());
    }

    #[test]
    fn test_number_bounds() {
        let request = PromptRequest::new(PromptKind::Number, "How many?").with_bounds(1, 3);
        assert!(request.validate(&PromptResponse::number(3)).is_ok());
        assert!(request.validate(&PromptResponse::number(0)).is_err());
        assert!(request.validate(&PromptResponse::number(4)).is_err());

        let unbounded = PromptRequest::new(PromptKind::Number, "Any number");
        assert!(unbounded.validate(&PromptResponse::number(-50)).is_ok());
    }

    #[test]
    fn test_text() {
        let request = PromptRequest::new(PromptKind::Text, "Name a creature type");
        assert!(request.validate(&PromptResponse::text("Elf")).is_ok());
        assert!(request.validate(&PromptResponse::number(1)).is_err());
    }

    #[test]
    fn test_json_contract() {
        let request = choice()
            .with_context("hand_size", 7)
            .with_default(PromptResponse::select_one("a"));
        let json = serde_json::to_string(&request).unwrap();
        let back: PromptRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, back);
    }
}
