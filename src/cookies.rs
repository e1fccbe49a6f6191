//! Credential Accessor
//!
//! Reads the CSRF token the server drops into `document.cookie`.

use percent_encoding::percent_decode_str;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// First cookie named `name` in a `k=v; k2=v2` string, percent-decoded
pub fn get_cookie(cookies: &str, name: &str) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }
    let prefix = format!("{}=", name);
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
        .map(|value| percent_decode_str(value).decode_utf8_lossy().into_owned())
}

/// Same lookup against the live document; no document means no cookies
pub fn document_cookie(name: &str) -> Option<String> {
    let document = web_sys::window()?
        .document()?
        .dyn_into::<HtmlDocument>()
        .ok()?;
    let raw = document.cookie().ok()?;
    get_cookie(&raw, name)
}
