pub use {
    controller::*,
    error::*,
    http::FaucetClient,
    notification::*,
    outcome::*,
    provider::*,
    session::*,
};
use {
    faucet_rpc::{faucet::FAUCET_REQUEST_PATH, network::NetworkDescriptor},
    url::Url,
};

pub mod controller;
pub mod error;
pub mod http;
pub mod network;
pub mod notification;
pub mod outcome;
pub mod provider;
pub mod session;
#[cfg(test)]
mod test_helpers;
#[cfg(feature = "wasm")]
pub mod wasm;

pub const DEFAULT_RPC_URL: &str = "https://rpc-testnet.azore.technology";
pub const DEFAULT_BLOCK_EXPLORER_URL: &str = "https://floripa.azorescan.com";
pub const DEFAULT_API_BASE_URL: &str = "https://faucet.azorescan.com/api";

pub const ENV_RPC_URL: &str = "FAUCET_RPC_URL";
pub const ENV_BLOCK_EXPLORER_URL: &str = "FAUCET_BLOCK_EXPLORER_URL";
pub const ENV_API_BASE_URL: &str = "FAUCET_API_BASE_URL";

/// Faucet client configuration.
///
/// URLs are kept verbatim (no normalization) since they are shown to the user
/// and handed to the wallet as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// RPC endpoint of the testnet, registered with the wallet. The default is
    /// `https://rpc-testnet.azore.technology`.
    pub rpc_url: String,

    /// Block explorer registered with the wallet. The default is
    /// `https://floripa.azorescan.com`.
    pub block_explorer_url: String,

    /// Base URL of the faucet API. Requests go to `<base>/faucet/request`.
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.into(),
            block_explorer_url: DEFAULT_BLOCK_EXPLORER_URL.into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

impl Config {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, falling back to
    /// the defaults for missing or empty values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_RPC_URL) {
            config = config.with_rpc_url(url);
        }

        if let Some(url) = lookup(ENV_BLOCK_EXPLORER_URL) {
            config = config.with_block_explorer_url(url);
        }

        if let Some(url) = lookup(ENV_API_BASE_URL) {
            config = config.with_api_base_url(url);
        }

        config.validate()?;

        Ok(config)
    }

    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    pub fn with_block_explorer_url(mut self, url: impl Into<String>) -> Self {
        self.block_explorer_url = url.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_url(ENV_RPC_URL, &self.rpc_url)?;
        parse_url(ENV_BLOCK_EXPLORER_URL, &self.block_explorer_url)?;
        self.faucet_request_url()?;

        Ok(())
    }

    /// The network registered with the wallet.
    pub fn network(&self) -> NetworkDescriptor {
        NetworkDescriptor::azore_testnet(&self.rpc_url, &self.block_explorer_url)
    }

    pub fn faucet_request_url(&self) -> Result<Url, ConfigError> {
        let base = self.api_base_url.trim_end_matches('/');

        parse_url(ENV_API_BASE_URL, &format!("{base}/{FAUCET_REQUEST_PATH}"))
    }
}

fn parse_url(key: &'static str, url: &str) -> Result<Url, ConfigError> {
    Url::parse(url).map_err(|source| ConfigError::InvalidUrl { key, source })
}

#[cfg(test)]
mod tests {
    use {super::*, std::collections::HashMap};

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();

        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(
            config.faucet_request_url().unwrap().as_str(),
            "https://faucet.azorescan.com/api/faucet/request"
        );

        let network = config.network();

        assert_eq!(network.rpc_url(), Some(DEFAULT_RPC_URL));
        assert_eq!(network.block_explorer_url(), Some(DEFAULT_BLOCK_EXPLORER_URL));
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(lookup(&[
            (ENV_RPC_URL, "http://localhost:8545"),
            (ENV_BLOCK_EXPLORER_URL, ""),
            (ENV_API_BASE_URL, "http://localhost:3001/api/"),
        ]))
        .unwrap();

        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.block_explorer_url, DEFAULT_BLOCK_EXPLORER_URL);
        assert_eq!(
            config.faucet_request_url().unwrap().as_str(),
            "http://localhost:3001/api/faucet/request"
        );
    }

    #[test]
    fn invalid_url() {
        let err = Config::from_lookup(lookup(&[(ENV_RPC_URL, "not a url")])).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidUrl {
                key: ENV_RPC_URL,
                ..
            }
        ));
    }
}
