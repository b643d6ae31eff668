//! Mail delivery error types.

use thiserror::Error;

/// Errors that can occur while building or sending the report mail.
#[derive(Debug, Error)]
pub enum MailError {
    /// An address could not be parsed.
    #[error("Invalid email address '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    /// The message could not be assembled.
    #[error("Failed to build email: {0}")]
    Build(#[from] lettre::error::Error),

    /// The SMTP exchange failed.
    #[error("SMTP delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}
