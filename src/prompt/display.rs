//! Plain-text rendering of prompts, for terminals and text agents.

use std::fmt::Write;

use super::request::{PromptKind, PromptRequest};

/// Render a prompt as plain text.
///
/// ```
/// use mtg_rules::prompt::{format_prompt, PromptKind, PromptRequest};
///
/// let request = PromptRequest::new(PromptKind::Choice, "Pick a land")
///     .with_option("card-1", "Plains")
///     .with_option("card-2", "Island");
///
/// let text = format_prompt(&request);
/// assert!(text.starts_with("Pick a land"));
/// assert!(text.contains("[card-2] Island"));
/// ```
#[must_use]
pub fn format_prompt(request: &PromptRequest) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", request.title);
    if !request.description.is_empty() {
        let _ = writeln!(out, "{}", request.description);
    }

    for (i, option) in request.options.iter().enumerate() {
        let _ = writeln!(out, "  {}. [{}] {}", i + 1, option.id, option.label);
    }

    let hint = match request.kind {
        PromptKind::YesNo => "Answer yes or no.".to_string(),
        PromptKind::Text => "Enter text.".to_string(),
        PromptKind::Number => match (request.min_number, request.max_number) {
            (Some(min), Some(max)) => format!("Enter a number from {} to {}.", min, max),
            (Some(min), None) => format!("Enter a number of at least {}.", min),
            (None, Some(max)) => format!("Enter a number of at most {}.", max),
            (None, None) => "Enter a number.".to_string(),
        },
        PromptKind::MultiChoice if request.min_choices == request.max_choices => {
            format!("Select exactly {}.", request.min_choices)
        }
        PromptKind::MultiChoice => format!(
            "Select between {} and {}.",
            request.min_choices, request.max_choices
        ),
        PromptKind::Target | PromptKind::Choice | PromptKind::CardChoice => "Select one.".to_string(),
    };
    let _ = write!(out, "{}", hint);

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints() {
        let scry = PromptRequest::new(PromptKind::MultiChoice, "Scry 2").with_choices(0, 2);
        assert!(format_prompt(&scry).ends_with("Select between 0 and 2."));

        let number = PromptRequest::new(PromptKind::Number, "X").with_bounds(0, 3);
        assert!(format_prompt(&number).ends_with("Enter a number from 0 to 3."));
    }
}
