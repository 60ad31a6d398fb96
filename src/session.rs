//! Cookie-Backed Session Store
//!
//! Presence of the token cookie is the whole authentication check on the
//! client; stale tokens are only discovered when the server rejects a call.

use wasm_bindgen::JsCast;

const TOKEN_COOKIE: &str = "token";
const USER_COOKIE: &str = "usuario";
/// 24 hours, matching the server-side token lifetime
const SESSION_MAX_AGE_SECS: u32 = 60 * 60 * 24;

fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}

fn raw_cookies() -> String {
    html_document()
        .and_then(|doc| doc.cookie().ok())
        .unwrap_or_default()
}

fn write_cookie(name: &str, value: &str, max_age: u32) {
    if let Some(doc) = html_document() {
        let _ = doc.set_cookie(&format!("{name}={value}; path=/; max-age={max_age}"));
    }
}

/// Value of `name` within a `;`-separated cookie string.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| {
            pair.trim()
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .next()
        .map(str::to_string)
}

pub fn token() -> Option<String> {
    cookie_value(&raw_cookies(), TOKEN_COOKIE)
}

pub fn username() -> Option<String> {
    cookie_value(&raw_cookies(), USER_COOKIE)
}

pub fn set_session(token: &str, username: &str) {
    write_cookie(TOKEN_COOKIE, token, SESSION_MAX_AGE_SECS);
    write_cookie(USER_COOKIE, username, SESSION_MAX_AGE_SECS);
}

pub fn clear() {
    write_cookie(TOKEN_COOKIE, "", 0);
    write_cookie(USER_COOKIE, "", 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value_single_pair() {
        assert_eq!(
            cookie_value("token=abc123", "token"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_cookie_value_among_many() {
        let cookies = "theme=dark; token=abc123; usuario=jperez";
        assert_eq!(cookie_value(cookies, "token"), Some("abc123".to_string()));
        assert_eq!(cookie_value(cookies, "usuario"), Some("jperez".to_string()));
    }

    #[test]
    fn test_cookie_value_ignores_prefix_names() {
        // "tokenx" must not satisfy a lookup for "token"
        assert_eq!(cookie_value("tokenx=no; token=yes", "token"), Some("yes".to_string()));
    }

    #[test]
    fn test_cookie_value_missing() {
        assert_eq!(cookie_value("usuario=jperez", "token"), None);
        assert_eq!(cookie_value("", "token"), None);
    }

    #[test]
    fn test_cookie_value_empty_after_clear() {
        assert_eq!(cookie_value("token=", "token"), Some(String::new()));
    }
}
