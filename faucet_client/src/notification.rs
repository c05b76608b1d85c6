//! Transient user notifications (toasts).

use {faucet_rpc::domain::Address, std::time::Duration};

/// Default time a toast stays on screen.
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(4);

/// Time the manual network instructions stay on screen.
pub const INSTRUCTIONS_DURATION: Duration = Duration::from_secs(15);

pub(crate) const MSG_NOT_INSTALLED: &str = "MetaMask is not installed";
pub(crate) const MSG_CONNECTED: &str = "Wallet connected successfully!";
pub(crate) const MSG_CONNECT_REJECTED: &str = "User rejected the connection";
pub(crate) const MSG_CONNECT_FAILED: &str = "Failed to connect wallet";
pub(crate) const MSG_DISCONNECTED: &str = "Wallet disconnected";
pub(crate) const MSG_NETWORK_NOT_INSTALLED: &str = "MetaMask is not installed.";
pub(crate) const MSG_NETWORK_REJECTED: &str = "User rejected the request to add the network.";
pub(crate) const MSG_NETWORK_INVALID_PARAMS: &str =
    "Error with network parameters. Please check the configuration.";
pub(crate) const MSG_NETWORK_FAILED: &str = "Failed to add the network.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub duration: Duration,
}

impl Notification {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            duration: NOTIFICATION_DURATION,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub(crate) fn switched_account(address: &Address) -> Self {
        Self::success(format!("Switched to account: {}", address.short()))
    }
}
