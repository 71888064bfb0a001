use crate::InputId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown clause index: {0}")]
    UnknownClause(usize),

    #[error("No clause owns input {0}")]
    UnknownInput(InputId),

    #[error("Invalid table: {0}")]
    Table(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T = ()> = std::result::Result<T, Error>;

impl From<confique::Error> for Error {
    fn from(value: confique::Error) -> Self {
        Error::Config(value.to_string())
    }
}
