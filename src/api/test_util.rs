use axum::body;
use serde::de::DeserializeOwned;

/// Collects an HTTP response body and parses it as JSON, panicking on
/// unreadable or malformed bodies so the offending test fails loudly
pub async fn deserialize_body<T: DeserializeOwned>(response_body: body::Body) -> T {
    let bytes = body::to_bytes(response_body, usize::MAX)
        .await
        .expect("response body was unreadable");

    serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        panic!(
            "response body did not match the expected shape ({err}), raw body: {:?}",
            bytes
        )
    })
}
