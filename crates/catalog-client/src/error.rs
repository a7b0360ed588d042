// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Operation family a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Search,
    Lookup,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Search => f.write_str("search"),
            Operation::Lookup => f.write_str("lookup"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{operation} failed with http error: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} failed to parse JSON response: {source}")]
    Decode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    /// Operation family the error is tagged with.
    pub fn operation(&self) -> Operation {
        match self {
            CatalogError::Transport { operation, .. } | CatalogError::Decode { operation, .. } => {
                *operation
            }
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, CatalogError::Transport { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, CatalogError::Decode { .. })
    }
}

/// Errors raised while building a [`CatalogClient`](crate::CatalogClient).
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to initialise HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
