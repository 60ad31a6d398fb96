//! Runtime Configuration
//!
//! The API base URL can be fixed at compile time; everything else the
//! backend needs (document numbering, auth) lives server-side.

/// Base URL of the vehicle-management API.
///
/// Defaults to a same-origin reverse proxy; override at build time with
/// `VEHICULOS_API_BASE`.
pub fn api_base() -> &'static str {
    option_env!("VEHICULOS_API_BASE").unwrap_or("/api")
}

/// Workshop whose production orders feed the work-order checkout form.
pub const WORKSHOP_ID: &str = "001";

/// Company id stamped on every vehicle-reception payload.
pub const COMPANY_ID: &str = "001";
