use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WhoisError>;

/// Terminal outcomes of a lookup. None of them are retried.
#[derive(Error, Debug)]
pub enum WhoisError {
    #[error("No whois server found for '{0}'")]
    NoServerFound(String),

    #[error("Invalid whois server address: {0}")]
    InvalidServer(String),

    #[error("Connection to {server} failed: {source}")]
    Connection {
        server: String,
        #[source]
        source: io::Error,
    },

    #[error("Connection timed out")]
    Timeout,
}

impl WhoisError {
    pub fn connection(server: impl Into<String>, source: io::Error) -> Self {
        Self::Connection {
            server: server.into(),
            source,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
