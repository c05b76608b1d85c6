//! Types for the injected wallet provider surface (EIP-1193): request
//! arguments, provider errors and the events the client subscribes to.

use {
    crate::{domain::Address, network::NetworkDescriptor},
    serde::{Deserialize, Serialize, Serializer},
    serde_json::Value,
};


/// The user rejected the request.
pub const CODE_USER_REJECTED_REQUEST: i64 = 4001;

/// The requested method and/or account has not been authorized by the user.
pub const CODE_UNAUTHORIZED: i64 = 4100;

/// The provider does not support the requested method.
pub const CODE_UNSUPPORTED_METHOD: i64 = 4200;

/// The provider is disconnected from all chains.
pub const CODE_DISCONNECTED: i64 = 4900;

/// The provider is not connected to the requested chain.
pub const CODE_CHAIN_DISCONNECTED: i64 = 4901;

/// Invalid method parameter(s). Standard JSON-RPC code.
pub const CODE_INVALID_PARAMS: i64 = -32602;

/// Internal JSON-RPC error.
pub const CODE_INTERNAL: i64 = -32603;

/// Wallet RPC methods used by the faucet client.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::IntoStaticStr, strum::Display,
)]
pub enum WalletMethod {
    /// Lists already authorized accounts without prompting the user.
    #[strum(serialize = "eth_accounts")]
    Accounts,

    /// Prompts the user to authorize the page.
    #[strum(serialize = "eth_requestAccounts")]
    RequestAccounts,

    /// Asks the wallet to register a custom network (EIP-3085).
    #[strum(serialize = "wallet_addEthereumChain")]
    AddEthereumChain,
}

impl Serialize for WalletMethod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.into())
    }
}

/// Argument of the provider's `request()` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestArguments {
    pub method: WalletMethod,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl RequestArguments {
    pub fn new(method: WalletMethod) -> Self {
        Self {
            method,
            params: None,
        }
    }

    pub fn with_params(mut self, params: impl Into<Option<Value>>) -> Self {
        self.params = params.into();
        self
    }

    pub fn accounts() -> Self {
        Self::new(WalletMethod::Accounts)
    }

    pub fn request_accounts() -> Self {
        Self::new(WalletMethod::RequestAccounts)
    }

    pub fn add_ethereum_chain(network: &NetworkDescriptor) -> Result<Self, serde_json::Error> {
        let params = serde_json::to_value([network])?;

        Ok(Self::new(WalletMethod::AddEthereumChain).with_params(params))
    }
}

/// Classification of [`ProviderError`] codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    UserRejected,
    Unauthorized,
    UnsupportedMethod,
    Disconnected,
    ChainDisconnected,
    InvalidParams,
    Internal,
    Other,
}

/// Error object rejected by the provider's `request()` promise
/// (`ProviderRpcError`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("Provider error ({code}): {message}")]
pub struct ProviderError {
    pub code: i64,

    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ProviderError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn user_rejected() -> Self {
        Self::new(CODE_USER_REJECTED_REQUEST, "User rejected the request.")
    }

    pub fn kind(&self) -> ProviderErrorKind {
        match self.code {
            CODE_USER_REJECTED_REQUEST => ProviderErrorKind::UserRejected,
            CODE_UNAUTHORIZED => ProviderErrorKind::Unauthorized,
            CODE_UNSUPPORTED_METHOD => ProviderErrorKind::UnsupportedMethod,
            CODE_DISCONNECTED => ProviderErrorKind::Disconnected,
            CODE_CHAIN_DISCONNECTED => ProviderErrorKind::ChainDisconnected,
            CODE_INVALID_PARAMS => ProviderErrorKind::InvalidParams,
            CODE_INTERNAL => ProviderErrorKind::Internal,
            _ => ProviderErrorKind::Other,
        }
    }

    #[inline]
    pub fn is_user_rejection(&self) -> bool {
        self.kind() == ProviderErrorKind::UserRejected
    }
}

/// Provider events the session tracker listens to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::IntoStaticStr, strum::Display,
)]
pub enum ProviderEventKind {
    #[strum(serialize = "accountsChanged")]
    AccountsChanged,

    #[strum(serialize = "chainChanged")]
    ChainChanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// The set of exposed accounts changed. Empty when the user disconnected
    /// the page or locked the wallet.
    AccountsChanged(Vec<Address>),

    /// The wallet switched chains. Carries the raw chain ID string.
    ChainChanged(String),
}

impl ProviderEvent {
    pub fn kind(&self) -> ProviderEventKind {
        match self {
            Self::AccountsChanged(_) => ProviderEventKind::AccountsChanged,
            Self::ChainChanged(_) => ProviderEventKind::ChainChanged,
        }
    }

    /// Decodes the JSON payload delivered with an event of the given kind.
    pub fn from_payload(kind: ProviderEventKind, payload: Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            ProviderEventKind::AccountsChanged => Self::AccountsChanged(parse_accounts(payload)?),
            ProviderEventKind::ChainChanged => Self::ChainChanged(serde_json::from_value(payload)?),
        })
    }
}

/// Decodes an account list returned by `eth_accounts`/`eth_requestAccounts` or
/// carried by `accountsChanged`. Blank entries are dropped.
pub fn parse_accounts(payload: Value) -> Result<Vec<Address>, serde_json::Error> {
    let accounts: Vec<String> = serde_json::from_value(payload)?;

    Ok(accounts
        .iter()
        .filter_map(|account| account.parse().ok())
        .collect())
}
