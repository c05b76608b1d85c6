//! Network configuration passed to the wallet's `wallet_addEthereumChain`
//! capability (EIP-3085).

use {
    crate::domain::ChainId,
    serde::{Deserialize, Serialize},
};

/// Azore testnet chain ID (`0x157c1`).
pub const AZORE_TESTNET_CHAIN_ID: ChainId = ChainId::new(88001);

pub const AZORE_TESTNET_NAME: &str = "Azore Testnet";

pub const AZORE_TESTNET_SYMBOL: &str = "AZE-t";

pub const NATIVE_CURRENCY_DECIMALS: u8 = 18;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    pub chain_id: ChainId,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl NetworkDescriptor {
    /// Builds the Azore testnet descriptor for the given RPC and block explorer
    /// endpoints.
    pub fn azore_testnet(rpc_url: impl Into<String>, block_explorer_url: impl Into<String>) -> Self {
        Self {
            chain_id: AZORE_TESTNET_CHAIN_ID,
            chain_name: AZORE_TESTNET_NAME.to_owned(),
            native_currency: NativeCurrency {
                name: AZORE_TESTNET_NAME.to_owned(),
                symbol: AZORE_TESTNET_SYMBOL.to_owned(),
                decimals: NATIVE_CURRENCY_DECIMALS,
            },
            rpc_urls: vec![rpc_url.into()],
            block_explorer_urls: vec![block_explorer_url.into()],
        }
    }

    pub fn rpc_url(&self) -> Option<&str> {
        self.rpc_urls.first().map(String::as_str)
    }

    pub fn block_explorer_url(&self) -> Option<&str> {
        self.block_explorer_urls.first().map(String::as_str)
    }

    /// Step-by-step text for adding the network by hand, for wallets without
    /// `wallet_addEthereumChain` support.
    pub fn manual_instructions(&self) -> String {
        let rpc_url = self.rpc_url().unwrap_or_default();
        let explorer_url = self.block_explorer_url().unwrap_or_default();

        format!(
            "Add Network Manually:\n\
             1. Open MetaMask → Settings → Networks\n\
             2. Click \"Add Network\"\n\
             3. Enter these details:\n\
             \n\
             Network Name: {}\n\
             RPC URL: {rpc_url}\n\
             Chain ID: {}\n\
             Symbol: {}\n\
             Explorer: {explorer_url}",
            self.chain_name, self.chain_id, self.native_currency.symbol,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> NetworkDescriptor {
        NetworkDescriptor::azore_testnet(
            "https://rpc-testnet.azore.technology",
            "https://floripa.azorescan.com",
        )
    }

    #[test]
    fn serialization() {
        let serialized = serde_json::to_string(&descriptor()).unwrap();

        assert_eq!(
            serialized,
            r#"{"chainId":"0x157c1","chainName":"Azore Testnet","nativeCurrency":{"name":"Azore Testnet","symbol":"AZE-t","decimals":18},"rpcUrls":["https://rpc-testnet.azore.technology"],"blockExplorerUrls":["https://floripa.azorescan.com"]}"#
        );

        let deserialized: NetworkDescriptor = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized, descriptor());
    }

    #[test]
    fn manual_instructions() {
        let text = descriptor().manual_instructions();

        assert!(text.starts_with("Add Network Manually:\n1. Open MetaMask"));
        assert!(text.contains("Network Name: Azore Testnet\n"));
        assert!(text.contains("RPC URL: https://rpc-testnet.azore.technology\n"));
        assert!(text.contains("Chain ID: 88001\n"));
        assert!(text.contains("Symbol: AZE-t\n"));
        assert!(text.ends_with("Explorer: https://floripa.azorescan.com"));
    }
}
