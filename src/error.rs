use std::io;
pub type Result<T> = std::result::Result<T, Error>;
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration cannot drive a scan. Reported before any byte is read.
    #[error("invalid configuration: `{message}`")]
    InvalidConfiguration { message: String },
    /// The byte source failed mid stream.
    #[error("reading input error: `{err}`")]
    IoInputRead { err: io::Error },
}
impl Error {
    pub(crate) fn invalid<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}
