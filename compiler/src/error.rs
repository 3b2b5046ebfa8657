use thiserror::Error;

#[derive(Debug, Error)]
pub enum FbsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}, column {column}: {msg}")]
    ParseError {
        msg:    String,
        line:   usize,
        column: usize,
    },

    #[error("Include error: {0}")]
    IncludeError(String),

    #[error("Schema encode error: {0}")]
    EncodeError(String),
}
