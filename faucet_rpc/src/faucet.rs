//! Faucet HTTP API bodies and the mapping from HTTP responses to user-facing
//! request outcomes.

use {
    crate::{
        domain::Address,
        serde_helpers::{lenient, lenient_number, lenient_or_default, non_empty},
    },
    serde::{Deserialize, Serialize},
    serde_aux::prelude::deserialize_string_from_number,
    std::fmt,
};

#[cfg(test)]
mod tests;

/// Path of the drip endpoint relative to the API base URL.
pub const FAUCET_REQUEST_PATH: &str = "faucet/request";

/// Symbol used in the success message.
pub const TOKEN_SYMBOL: &str = "AZE";

/// Amount dispensed per request. Fixed by the faucet backend.
pub const DRIP_AMOUNT: &str = "0.5";

pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_TOO_MANY_REQUESTS: u16 = 429;
pub const STATUS_SERVICE_UNAVAILABLE: u16 = 503;

const MSG_NOT_CONNECTED: &str = "Please connect your wallet first";
const MSG_INVALID_ADDRESS: &str = "Invalid wallet address";
const MSG_UNAVAILABLE: &str = "Faucet temporarily unavailable. Please try again later.";
const MSG_REQUEST_FAILED: &str = "Request failed";
const MSG_NETWORK: &str = "Network error, please try again";
const MSG_RETRY_LATER: &str = "You can request tokens again later";

/// Body of `POST <base>/faucet/request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetRequest {
    pub wallet_address: Address,
}

impl FaucetRequest {
    pub fn new(wallet_address: Address) -> Self {
        Self { wallet_address }
    }
}

/// Transfer details returned on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(deserialize_with = "deserialize_string_from_number")]
    pub amount: String,

    pub hash: String,

    /// Informational only, never decides whether the transfer succeeded.
    #[serde(default, deserialize_with = "lenient_number")]
    pub block_number: Option<u64>,
}

/// Union of the success and failure bodies the faucet API sends. Every field
/// is optional since each status code carries a different subset, and each
/// is decoded on its own: a field of an unexpected shape reads as absent
/// without affecting the others.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetResponse {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub success: bool,

    #[serde(default, deserialize_with = "lenient")]
    pub transaction: Option<Transaction>,

    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub details: Option<String>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub hours_remaining: Option<f64>,
}

impl FaucetResponse {
    /// Decodes a response body. Bodies that aren't valid JSON objects decode
    /// as an empty response, so the status code alone decides the outcome.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// A completed faucet transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drip {
    pub amount: String,
    pub hash: String,
    pub block_number: Option<u64>,
}

impl Drip {
    pub fn message(&self) -> String {
        format!("Successfully sent {} {TOKEN_SYMBOL} to your wallet!", self.amount)
    }
}

impl From<Transaction> for Drip {
    fn from(tx: Transaction) -> Self {
        Self {
            amount: tx.amount,
            hash: tx.hash,
            block_number: tx.block_number,
        }
    }
}

/// Classified faucet request failures.
#[derive(Debug, Clone, PartialEq)]
pub enum FaucetError {
    /// No wallet session. Raised locally, no request is sent.
    NotConnected,

    /// 429: the address is in its cooldown window.
    RateLimited {
        message: Option<String>,
        hours_remaining: Option<f64>,
    },

    /// 400: the server rejected the address.
    Validation { message: Option<String> },

    /// 503: the faucet is out of funds or down for maintenance.
    Unavailable,

    /// Any other failed response.
    Failed {
        status: u16,
        message: Option<String>,
    },

    /// A successful status without the transfer details.
    InvalidResponse,

    /// The request never completed.
    Network,
}

impl FaucetError {
    /// Curated user-facing message.
    pub fn message(&self) -> String {
        match self {
            Self::NotConnected => MSG_NOT_CONNECTED.to_owned(),

            Self::RateLimited {
                message: Some(message),
                ..
            } => message.clone(),

            Self::RateLimited {
                message: None,
                hours_remaining: Some(hours),
            } => format!("You can request tokens again in {hours} hours"),

            Self::RateLimited { .. } => MSG_RETRY_LATER.to_owned(),

            Self::Validation { message } => message
                .clone()
                .unwrap_or_else(|| MSG_INVALID_ADDRESS.to_owned()),

            Self::Unavailable => MSG_UNAVAILABLE.to_owned(),

            Self::Failed { message, .. } => message
                .clone()
                .unwrap_or_else(|| MSG_REQUEST_FAILED.to_owned()),

            Self::InvalidResponse => MSG_REQUEST_FAILED.to_owned(),

            Self::Network => MSG_NETWORK.to_owned(),
        }
    }

    /// Remaining cooldown reported with a rate-limit error.
    pub fn retry_after_hours(&self) -> Option<f64> {
        match self {
            Self::RateLimited {
                hours_remaining, ..
            } => *hours_remaining,
            _ => None,
        }
    }
}

impl fmt::Display for FaucetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for FaucetError {}

/// Maps an HTTP status and decoded body to the drip result.
pub fn classify_response(status: u16, body: FaucetResponse) -> Result<Drip, FaucetError> {
    let is_success = (200..300).contains(&status);

    if is_success && body.success {
        return body
            .transaction
            .map(Drip::from)
            .ok_or(FaucetError::InvalidResponse);
    }

    let err = match status {
        STATUS_TOO_MANY_REQUESTS => FaucetError::RateLimited {
            message: non_empty(&body.message).map(ToOwned::to_owned),
            hours_remaining: body.hours_remaining,
        },

        STATUS_BAD_REQUEST => FaucetError::Validation {
            message: non_empty(&body.details)
                .or_else(|| non_empty(&body.error))
                .map(ToOwned::to_owned),
        },

        STATUS_SERVICE_UNAVAILABLE => FaucetError::Unavailable,

        _ => FaucetError::Failed {
            status,
            message: non_empty(&body.message)
                .or_else(|| non_empty(&body.error))
                .map(ToOwned::to_owned),
        },
    };

    Err(err)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    Error,
}

/// What the UI shows after a faucet request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Success(Drip),
    Failure(FaucetError),
}

impl RequestOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Success(_) => OutcomeKind::Success,
            Self::Failure(_) => OutcomeKind::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Success(drip) => drip.message(),
            Self::Failure(err) => err.message(),
        }
    }

    pub fn amount(&self) -> Option<&str> {
        match self {
            Self::Success(drip) => Some(&drip.amount),
            Self::Failure(_) => None,
        }
    }

    pub fn tx_hash(&self) -> Option<&str> {
        match self {
            Self::Success(drip) => Some(&drip.hash),
            Self::Failure(_) => None,
        }
    }

    pub fn retry_after_hours(&self) -> Option<f64> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => err.retry_after_hours(),
        }
    }
}

impl From<Result<Drip, FaucetError>> for RequestOutcome {
    fn from(result: Result<Drip, FaucetError>) -> Self {
        match result {
            Ok(drip) => Self::Success(drip),
            Err(err) => Self::Failure(err),
        }
    }
}
