//! Auth cookie helpers
//!
//! The credential travels as an HttpOnly cookie; parsing and formatting are
//! done on the raw headers.

use http::HeaderMap;
use http::header::{AUTHORIZATION, COOKIE};

use super::JwtService;

/// Value of cookie `name` from the `Cookie` header(s)
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}

/// Credential from the auth cookie, falling back to `Authorization: Bearer`
pub fn extract_token<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    read_cookie(headers, cookie_name).or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(JwtService::extract_from_header)
    })
}

/// `Set-Cookie` value carrying a fresh token
pub fn session_cookie(name: &str, token: &str, max_age_seconds: i64, secure: bool) -> String {
    let mut cookie =
        format!("{name}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_seconds}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the auth cookie
pub fn clear_cookie(name: &str, secure: bool) -> String {
    session_cookie(name, "", 0, secure)
}
