//! Error types for subnet calculations and cost estimates.
//!
//! Every validation failure names the input field it belongs to so a front end
//! can attach the message to the right control.

use serde::Serialize;
use thiserror::Error;

/// Upper bound for the requested host count (a /8 worth of hosts).
pub const MAX_HOSTS_REQUIRED: u64 = 16_777_214;

/// Failure of a single subnet calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubnetError {
    /// Empty input, wrong segment count or a non-numeric segment.
    #[error("{0}")]
    InvalidIpFormat(String),
    /// A segment outside 0-255. `octet` is 1-based.
    #[error("Octet {octet} must be between 0 and 255 (got {value})")]
    OctetOutOfRange { octet: usize, value: String },
    #[error("{0}")]
    InvalidPrefixLength(String),
    #[error("{0}")]
    InvalidHostCount(String),
    #[error("Network length /{0} is too long")]
    PrefixTooLong(u8),
    #[error("Address calculation overflowed past 255.255.255.255")]
    AddressOverflow,
    #[error("Tier '{tier}' needs a /{prefix} but {parent} has no room left")]
    TierDoesNotFit {
        tier: String,
        prefix: u8,
        parent: String,
    },
}

impl SubnetError {
    /// Name of the input field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            SubnetError::InvalidIpFormat(_)
            | SubnetError::OctetOutOfRange { .. }
            | SubnetError::AddressOverflow => "ipAddress",
            SubnetError::InvalidPrefixLength(_) | SubnetError::PrefixTooLong(_) => "prefixLength",
            SubnetError::InvalidHostCount(_) => "hostsRequired",
            SubnetError::TierDoesNotFit { .. } => "tiers",
        }
    }

    /// Structured form of the error, ready to serialize for a caller.
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            error_field: self.field().to_string(),
            error_message: self.to_string(),
        }
    }
}

/// `{ errorField, errorMessage }` as returned to a front end.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub error_field: String,
    pub error_message: String,
}

/// Failure of a cost estimate or of loading a rate table.
#[derive(Debug, Error)]
pub enum CostError {
    #[error("No rates configured for provider {0}")]
    UnknownProvider(String),
    #[error("Data transfer must be a non-negative number of GB (got {0})")]
    InvalidDataTransfer(f64),
    #[error("Error reading rate table {path}: {source}")]
    RateTableIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Error parsing rate table {path}: path={json_path} error={message}")]
    RateTableParse {
        path: String,
        json_path: String,
        message: String,
    },
}

impl CostError {
    /// Name of the input the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            CostError::UnknownProvider(_) => "provider",
            CostError::InvalidDataTransfer(_) => "dataTransfer",
            CostError::RateTableIo { .. } | CostError::RateTableParse { .. } => "rates",
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            error_field: self.field().to_string(),
            error_message: self.to_string(),
        }
    }
}
