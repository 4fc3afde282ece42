/// Prompt failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    #[error("no responder registered and no default for {title:?}")]
    NoResponder { title: String },

    #[error("responder failed: {0}")]
    ResponderFailed(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
