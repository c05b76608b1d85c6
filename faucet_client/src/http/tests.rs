use {
    super::*,
    crate::test_helpers::{address, spawn_faucet, spawn_faucet_raw, unreachable_config},
    serde_json::json,
};

#[tokio::test]
async fn request_body() {
    let server = spawn_faucet(
        200,
        json!({
            "success": true,
            "transaction": { "amount": "0.5", "hash": "0xdead", "blockNumber": 42 },
        }),
    );
    let client = FaucetClient::new(&server.config).unwrap();

    assert!(client.url().as_str().ends_with("/api/faucet/request"));

    let drip = client.request_tokens(&address("0xABCD1234")).await.unwrap();

    assert_eq!(drip.message(), "Successfully sent 0.5 AZE to your wallet!");
    assert_eq!(drip.hash, "0xdead");
    assert_eq!(drip.block_number, Some(42));
    assert_eq!(server.hits(), 1);
    assert_eq!(server.bodies(), vec![json!({ "walletAddress": "0xABCD1234" })]);
}

#[tokio::test]
async fn status_mapping() {
    let cases = [
        (
            429,
            json!({ "hoursRemaining": 3 }),
            "You can request tokens again in 3 hours",
        ),
        (
            400,
            json!({ "error": "Invalid address format" }),
            "Invalid address format",
        ),
        (
            503,
            json!({ "message": "Out of funds" }),
            "Faucet temporarily unavailable. Please try again later.",
        ),
        (500, json!({ "message": "Database down" }), "Database down"),
        (404, json!({}), "Request failed"),
    ];

    for (status, body, message) in cases {
        let server = spawn_faucet(status, body);
        let client = FaucetClient::new(&server.config).unwrap();

        let err = client.request_tokens(&address("0xabc")).await.unwrap_err();

        assert_eq!(err.message(), message, "status {status}");
        assert_eq!(server.hits(), 1);
    }
}

#[tokio::test]
async fn raw_status_and_body() {
    let server = spawn_faucet_raw(502, "Bad Gateway".to_owned());
    let client = FaucetClient::new(&server.config).unwrap();

    let (status, body) = client.send(&address("0xabc")).await.unwrap();

    assert_eq!(status.as_u16(), 502);
    assert_eq!(body, FaucetResponse::default());
}

#[tokio::test]
async fn transport_failure() {
    let client = FaucetClient::new(&unreachable_config()).unwrap();

    assert_eq!(
        client.request_tokens(&address("0xabc")).await,
        Err(FaucetError::Network)
    );
}
