use thiserror::Error;

/// Failure taxonomy for the client core.
///
/// `Validation` never reaches the network; `Backend` carries whatever the
/// server put in its `detail`/`message` body field. An infeasible
/// generation run is *not* an error; see
/// [`crate::models::GenerationOutcome`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("invalid or expired login code")]
    InvalidCode,

    #[error("{message}")]
    Backend {
        status: Option<u16>,
        message: String,
    },

    #[error("invalid artifact payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn backend(status: Option<u16>, message: impl Into<String>) -> Self {
        Error::Backend {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Backend { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Backend {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
