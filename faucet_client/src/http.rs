use {
    crate::{error::Error, Config},
    faucet_rpc::{
        domain::Address,
        faucet::{classify_response, Drip, FaucetError, FaucetRequest, FaucetResponse},
    },
    reqwest::StatusCode,
    tracing::{debug, error, warn},
    url::Url,
};

#[cfg(test)]
mod tests;

pub type TransportError = reqwest::Error;

#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] TransportError),
}

/// The faucet HTTP API client.
///
/// Every call sends exactly one request. There is no retry and no timeout
/// beyond the transport's own.
#[derive(Debug, Clone)]
pub struct FaucetClient {
    client: reqwest::Client,
    url: Url,
}

impl FaucetClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let url = config.faucet_request_url()?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(HttpClientError::Transport)?;

        Ok(Self { client, url })
    }

    /// The drip endpoint, `<base>/faucet/request`.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Posts the drip request and returns the raw status and decoded body.
    pub async fn send(
        &self,
        address: &Address,
    ) -> Result<(StatusCode, FaucetResponse), HttpClientError> {
        let result = self
            .client
            .post(self.url.clone())
            .json(&FaucetRequest::new(address.clone()))
            .send()
            .await?;

        let status = result.status();
        let body = result.bytes().await?;

        Ok((status, FaucetResponse::from_body(&body)))
    }

    /// Requests a drip for `address` and classifies the response.
    pub async fn request_tokens(&self, address: &Address) -> Result<Drip, FaucetError> {
        let (status, body) = self.send(address).await.map_err(|err| {
            error!("Error requesting tokens: {err}");
            FaucetError::Network
        })?;

        let result = classify_response(status.as_u16(), body);

        match &result {
            Ok(drip) => debug!(
                hash = %drip.hash,
                block_number = ?drip.block_number,
                "faucet transfer sent"
            ),

            Err(err) => warn!(%status, "faucet request failed: {err}"),
        }

        result
    }
}
