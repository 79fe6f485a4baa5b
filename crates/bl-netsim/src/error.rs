use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetsimError {
    #[error("delay dataset parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetsimResult<T> = Result<T, NetsimError>;
