#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<time::error::Parse> for Error {
    fn from(value: time::error::Parse) -> Self {
        Self::Validate(format!("invalid date: {value}"))
    }
}

/// Returns early with [`Error::NotFound`].
#[macro_export]
macro_rules! not_found {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::NotFound(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::NotFound(format!($fmt, $($arg)*)))
    };
}

/// Returns early with [`Error::Validate`].
#[macro_export]
macro_rules! invalid {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Validate(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Validate(format!($fmt, $($arg)*)))
    };
}
