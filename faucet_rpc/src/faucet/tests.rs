use {super::*, serde_json::json};

fn classify(status: u16, body: serde_json::Value) -> Result<Drip, FaucetError> {
    classify_response(status, FaucetResponse::from_body(body.to_string().as_bytes()))
}

fn message(status: u16, body: serde_json::Value) -> String {
    RequestOutcome::from(classify(status, body)).message()
}

#[test]
fn request_body() {
    let request = FaucetRequest::new("0xabc".parse().unwrap());

    assert_eq!(
        serde_json::to_string(&request).unwrap(),
        r#"{"walletAddress":"0xabc"}"#
    );
}

#[test]
fn success() {
    let outcome = RequestOutcome::from(classify(
        200,
        json!({
            "success": true,
            "transaction": { "amount": "0.5", "hash": "0xdead", "blockNumber": 42 },
        }),
    ));

    assert_eq!(outcome.kind(), OutcomeKind::Success);
    assert_eq!(outcome.message(), "Successfully sent 0.5 AZE to your wallet!");
    assert_eq!(outcome.amount(), Some("0.5"));
    assert_eq!(outcome.tx_hash(), Some("0xdead"));
    assert_eq!(
        outcome,
        RequestOutcome::Success(Drip {
            amount: "0.5".to_owned(),
            hash: "0xdead".to_owned(),
            block_number: Some(42),
        })
    );
}

#[test]
fn success_with_numeric_amount() {
    let drip = classify(
        201,
        json!({
            "success": true,
            "transaction": { "amount": 0.5, "hash": "0xbeef", "blockNumber": "7" },
        }),
    )
    .unwrap();

    assert_eq!(drip.amount, "0.5");
    assert_eq!(drip.block_number, Some(7));
}

#[test]
fn success_without_transaction() {
    assert_eq!(
        classify(200, json!({ "success": true })),
        Err(FaucetError::InvalidResponse)
    );
    assert_eq!(message(200, json!({ "success": true })), "Request failed");
}

#[test]
fn ok_status_without_success_flag() {
    assert_eq!(
        message(200, json!({ "success": false, "message": "Nope" })),
        "Nope"
    );
    assert_eq!(message(200, json!({})), "Request failed");
}

#[test]
fn rate_limited() {
    assert_eq!(
        message(429, json!({ "hoursRemaining": 3 })),
        "You can request tokens again in 3 hours"
    );
    assert_eq!(
        message(429, json!({ "hoursRemaining": "2.5" })),
        "You can request tokens again in 2.5 hours"
    );
    assert_eq!(
        message(429, json!({ "message": "Slow down", "hoursRemaining": 3 })),
        "Slow down"
    );
    assert_eq!(
        message(429, json!({ "message": "", "hoursRemaining": 1 })),
        "You can request tokens again in 1 hours"
    );
    assert_eq!(message(429, json!({})), "You can request tokens again later");

    let outcome = RequestOutcome::from(classify(429, json!({ "hoursRemaining": 3 })));

    assert_eq!(outcome.kind(), OutcomeKind::Error);
    assert_eq!(outcome.retry_after_hours(), Some(3.0));
    assert_eq!(outcome.tx_hash(), None);
}

#[test]
fn validation() {
    assert_eq!(
        message(400, json!({ "details": "Bad checksum", "error": "Invalid" })),
        "Bad checksum"
    );
    assert_eq!(message(400, json!({ "error": "Invalid" })), "Invalid");
    assert_eq!(
        message(400, json!({ "message": "ignored" })),
        "Invalid wallet address"
    );
}

#[test]
fn unavailable() {
    assert_eq!(
        message(503, json!({ "message": "ignored" })),
        "Faucet temporarily unavailable. Please try again later."
    );
    assert_eq!(classify(503, json!({})), Err(FaucetError::Unavailable));
}

#[test]
fn other_failures() {
    assert_eq!(
        message(500, json!({ "message": "Boom", "error": "Internal" })),
        "Boom"
    );
    assert_eq!(message(500, json!({ "error": "Internal" })), "Internal");
    assert_eq!(message(404, json!({})), "Request failed");
    assert_eq!(
        classify(502, json!({})),
        Err(FaucetError::Failed {
            status: 502,
            message: None,
        })
    );
}

#[test]
fn non_json_body() {
    let body = FaucetResponse::from_body(b"<html>Bad Gateway</html>");

    assert_eq!(body, FaucetResponse::default());
    assert_eq!(
        classify_response(503, body).unwrap_err().message(),
        "Faucet temporarily unavailable. Please try again later."
    );
}

#[test]
fn local_errors() {
    assert_eq!(
        FaucetError::NotConnected.to_string(),
        "Please connect your wallet first"
    );
    assert_eq!(
        FaucetError::Network.to_string(),
        "Network error, please try again"
    );
}

#[test]
fn odd_block_number_keeps_success() {
    let drip = classify(
        200,
        json!({
            "success": true,
            "transaction": { "amount": "0.5", "hash": "0xdead", "blockNumber": "pending" },
        }),
    )
    .unwrap();

    assert_eq!(drip.hash, "0xdead");
    assert_eq!(drip.block_number, None);
    assert_eq!(drip.message(), "Successfully sent 0.5 AZE to your wallet!");

    let drip = classify(
        200,
        json!({
            "success": true,
            "transaction": { "amount": "0.5", "hash": "0xdead", "blockNumber": { "n": 1 } },
            "details": [1, 2],
        }),
    )
    .unwrap();

    assert_eq!(drip.amount, "0.5");
}

#[test]
fn unexpected_fields_keep_server_messages() {
    assert_eq!(
        message(
            400,
            json!({ "error": "Validation failed", "details": [{ "field": "walletAddress" }] })
        ),
        "Validation failed"
    );
    assert_eq!(
        message(500, json!({ "message": "Internal", "error": { "code": 7 } })),
        "Internal"
    );
    assert_eq!(
        message(502, json!({ "message": 12, "error": "Upstream down" })),
        "Upstream down"
    );
    assert_eq!(
        message(429, json!({ "message": "Cooldown active", "hoursRemaining": "about 3" })),
        "Cooldown active"
    );
    assert_eq!(
        message(429, json!({ "hoursRemaining": "about 3" })),
        "You can request tokens again later"
    );
}

#[test]
fn malformed_transaction_is_invalid() {
    assert_eq!(
        classify(
            200,
            json!({ "success": true, "transaction": { "amount": "0.5" } })
        ),
        Err(FaucetError::InvalidResponse)
    );
    assert_eq!(
        classify(200, json!({ "success": "true", "message": "Odd" })),
        Err(FaucetError::Failed {
            status: 200,
            message: Some("Odd".to_owned()),
        })
    );
}
