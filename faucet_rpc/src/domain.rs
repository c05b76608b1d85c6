use {
    crate::new_type,
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr, sync::Arc},
};


/// Number of leading characters kept by [`Address::short`], including the
/// `0x` prefix.
const SHORT_ADDRESS_HEAD: usize = 6;

/// Number of trailing characters kept by [`Address::short`].
const SHORT_ADDRESS_TAIL: usize = 4;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address is empty")]
    Empty,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ChainIdError {
    #[error("Chain ID is empty")]
    Empty,

    #[error("Invalid chain ID: {0}")]
    Invalid(String),
}

new_type!(
    #[doc = "Account address as reported by the wallet provider."]
    #[as_ref(forward)]
    Address: Arc<str>
);

impl Address {
    /// Shortened form used in notifications and the connected-wallet badge,
    /// e.g. `0xABCD...1234`.
    pub fn short(&self) -> String {
        let chars = self.0.chars().collect::<Vec<_>>();

        if chars.len() <= SHORT_ADDRESS_HEAD + SHORT_ADDRESS_TAIL {
            return self.0.to_string();
        }

        let head = chars.iter().take(SHORT_ADDRESS_HEAD).collect::<String>();
        let tail = chars
            .iter()
            .skip(chars.len() - SHORT_ADDRESS_TAIL)
            .collect::<String>();

        format!("{head}...{tail}")
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() {
            return Err(AddressError::Empty);
        }

        Ok(Self(s.into()))
    }
}

impl TryFrom<&str> for Address {
    type Error = AddressError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Numeric chain identifier. Wallets exchange it as a `0x`-prefixed hex
/// string.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChainId(#[serde(with = "crate::serde_helpers::u64_as_hex")] pub u64);

impl ChainId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Lowercase `0x`-prefixed hex form, as expected by EIP-3085.
    #[inline]
    pub fn to_hex(&self) -> String {
        format!("{:#x}", self.0)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for ChainId {
    type Err = ChainIdError;

    /// Accepts both `0x`-prefixed hex (any case) and plain decimal input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() {
            return Err(ChainIdError::Empty);
        }

        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => s.parse::<u64>(),
        };

        parsed
            .map(Self)
            .map_err(|_| ChainIdError::Invalid(s.to_owned()))
    }
}
