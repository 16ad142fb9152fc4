//! Shared HTTP plumbing: send a request, map the outcome into the raw
//! failure classification input.

use serde_json::Value;

use crate::llm::retry::VendorFailure;

pub(crate) async fn post_json(
    client: &reqwest::Client,
    url: &str,
    bearer: Option<&str>,
    body: &Value,
) -> Result<Value, VendorFailure> {
    let mut request = client
        .post(url)
        .header("Content-Type", "application/json")
        .json(body);
    if let Some(key) = bearer {
        request = request.header("Authorization", format!("Bearer {}", key));
    }
    into_json(request.send().await).await
}

pub(crate) async fn get_json(
    client: &reqwest::Client,
    url: &str,
    bearer: Option<&str>,
) -> Result<Value, VendorFailure> {
    let mut request = client.get(url);
    if let Some(key) = bearer {
        request = request.header("Authorization", format!("Bearer {}", key));
    }
    into_json(request.send().await).await
}

pub(crate) async fn into_json(
    sent: Result<reqwest::Response, reqwest::Error>,
) -> Result<Value, VendorFailure> {
    let response = sent.map_err(|e| VendorFailure::Transport(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(VendorFailure::Api {
            status: status.as_u16(),
            body,
        });
    }
    response
        .json()
        .await
        .map_err(|e| VendorFailure::Malformed(e.to_string()))
}
