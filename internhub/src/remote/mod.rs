//! Remote collaborators
//!
//! HTTP clients for the auth backend and the page extraction service.
//! Both share one failure mapping: a non-2xx response carrying a server
//! message becomes `Validation` with that message verbatim, anything else
//! (no body, unreadable body, network failure) becomes `Transport` with the
//! generic fallback message.

pub mod extraction;
pub mod gateway;

pub use extraction::{ExtractedHackathon, ExtractedInternship, ExtractionClient};
pub use gateway::{AuthGateway, ProfileUpdate, RegisterRequest};

use crate::config::{GENERIC_FAILURE_MESSAGE, USER_AGENT};
use crate::error::{AppError, Result};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "error", alias = "detail")]
    message: Option<String>,
}

/// Server-provided message from an error body, if any
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Send a request and hand back the response only if it succeeded
pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Request failed: {}", e);
            return Err(AppError::Transport(GENERIC_FAILURE_MESSAGE.to_string()));
        }
    };

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    match server_message(&body) {
        Some(message) => {
            tracing::debug!("Server rejected request ({}): {}", status, message);
            Err(AppError::Validation(message))
        }
        None => {
            tracing::warn!("Server returned {} without a message", status);
            Err(AppError::Transport(GENERIC_FAILURE_MESSAGE.to_string()))
        }
    }
}

/// Send a request and decode its JSON body
pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = send(request).await?;
    response.json::<T>().await.map_err(|e| {
        tracing::warn!("Failed to parse response body: {}", e);
        AppError::Transport(GENERIC_FAILURE_MESSAGE.to_string())
    })
}
