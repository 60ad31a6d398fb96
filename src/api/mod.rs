//! HTTP Service Layer
//!
//! Typed wrappers over the remote REST API, organized by domain. Every
//! authenticated call attaches `Authorization: Bearer <token>` from the
//! session cookie. Errors propagate unchanged to the caller; there is no
//! retry or backoff anywhere in this layer.

mod auth;
mod checklist;
mod master;
mod movements;

pub use auth::*;
pub use checklist::*;
pub use master::*;
pub use movements::*;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never completed (offline, DNS, CORS)
    #[error("la petición no llegó al servidor: {0}")]
    Network(String),
    /// Non-2xx answer; `message` is the server's JSON `{message}` when present
    #[error("el servidor respondió {code}")]
    Status { code: u16, message: Option<String> },
    /// The body did not match the expected shape
    #[error("respuesta con formato inesperado: {0}")]
    Decode(String),
    /// A manual race against a fixed deadline expired
    #[error("la operación excedió el tiempo de espera")]
    Timeout,
}

impl ApiError {
    /// Server-supplied message when there is one, else the given fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message: Some(message), .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match crate::session::token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        leptos::logging::warn!("API {} {}", response.status(), response.url());
        let message = response.json::<ErrorBody>().await.ok().and_then(|body| body.message);
        return Err(ApiError::Status { code: response.status(), message });
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

pub(crate) async fn get_json<T: DeserializeOwned>(
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, ApiError> {
    let response = authorized(Request::get(url).query(query.iter().copied()))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    decode_json(response).await
}

pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
    url: &str,
    query: &[(&str, &str)],
    body: &B,
) -> Result<T, ApiError> {
    let request = authorized(Request::post(url).query(query.iter().copied()))
        .json(body)
        .map_err(|err| ApiError::Network(err.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    decode_json(response).await
}
