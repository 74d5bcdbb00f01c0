use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failures a visitor or staff member can cause. Messages are shown as-is.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid CPF. Enter 11 digits.")]
    InvalidIdentifier,

    #[error("CPF is not on the participant list. Please talk to a staff member.")]
    NotEligible,

    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("Invalid user data.")]
    InvalidUser,

    #[error("This CPF is already on the authorized list.")]
    DuplicateParticipant,

    #[error("User already exists.")]
    DuplicateUser,

    #[error("The stored draw for this CPF could not be read. Please talk to a staff member.")]
    UnreadableRecord,

    #[error(transparent)]
    Store(#[from] StoreError),
}
