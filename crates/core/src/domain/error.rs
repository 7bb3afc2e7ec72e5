// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Failed to scan stanza at line {line}: {source}")]
    StanzaScan {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DomainError>;
