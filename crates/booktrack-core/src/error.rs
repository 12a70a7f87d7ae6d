use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{usage}")]
    InsufficientArguments { usage: String },

    #[error("First argument must end with {suffix}")]
    InvalidFileName { suffix: &'static str },

    #[error("{0}")]
    MalformedBookEntry(String),

    /// A catalog line that failed shape or type checks. Recovered by the
    /// store; never surfaces as a run failure.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("A book with ISBN {isbn} already exists in the catalog")]
    DuplicateIsbn { isbn: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Returns `true` for failures caused by what the user typed or by the
    /// catalog contents, reported as `Error: ...`. Everything else is an
    /// unexpected failure.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }

    /// Short name of the error kind, used by the error log.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientArguments { .. } => "InsufficientArguments",
            Self::InvalidFileName { .. } => "InvalidFileName",
            Self::MalformedBookEntry(_) => "MalformedBookEntry",
            Self::MalformedRecord(_) => "MalformedRecord",
            Self::DuplicateIsbn { .. } => "DuplicateIsbn",
            Self::Io(_) => "Unexpected",
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
