//! Login Call
//!
//! Session cookies are written by the caller; this only talks to the API.

use super::{get_json, ApiError};
use crate::config;
use crate::models::LoginResponse;

pub async fn login(username: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let url = format!("{}/AuthReport/IniciarSesion", config::api_base());
    get_json(&url, &[("usuario", username), ("clave", password)]).await
}
