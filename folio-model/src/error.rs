use thiserror::Error;

/// Errors produced when decoding or validating site content.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("content decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("card at position {position} has an empty id")]
    EmptyCardId { position: usize },

    #[error("card '{card}' links to an invalid url '{target}'")]
    InvalidLink {
        card: String,
        target: String,
        #[source]
        source: url::ParseError,
    },

    #[error("navigation item at position {position} has an empty id")]
    EmptySectionId { position: usize },

    #[error("navigation section '{0}' is declared more than once")]
    DuplicateSection(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
