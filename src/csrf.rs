use actix_web::cookie::Cookie;
use actix_web::cookie::SameSite;
use actix_web::HttpRequest;
use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;
use uuid::Uuid;

/// Double-submit token: the same value travels as a cookie and as the hidden
/// `csrf_token` form field; a cross-site form can set the latter but cannot
/// read the former.
pub const CSRF_COOKIE: &str = "csrftoken";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CsrfError {
    #[error("no csrftoken cookie in request")]
    MissingCookie,
    #[error("no csrf_token in form")]
    MissingToken,
    #[error("csrf_token does not match the csrftoken cookie")]
    Mismatch,
}

fn cookie_value(req: &HttpRequest) -> Option<String> {
    req.cookie(CSRF_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Token to render in the form: the one the client already holds, or a fresh
/// one (generated per client, not per request).
pub fn token_for(req: &HttpRequest) -> String {
    cookie_value(req).unwrap_or_else(|| Uuid::new_v4().simple().to_string())
}

pub fn cookie(token: &str) -> Cookie<'static> {
    Cookie::build(CSRF_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

pub fn verify(
    req: &HttpRequest,
    submitted: &str,
) -> Result<(), CsrfError> {
    let expected = cookie_value(req).ok_or(CsrfError::MissingCookie)?;
    if submitted.is_empty() {
        return Err(CsrfError::MissingToken);
    }
    // `verify_slice` compares in constant time; `==` on the raw strings would
    // return at the first differing byte
    let expected = tag(&expected)?.finalize().into_bytes();
    tag(submitted)?
        .verify_slice(&expected)
        .map_err(|_| CsrfError::Mismatch)
}

/// MAC of a fixed message, keyed by the token itself
fn tag(token: &str) -> Result<Hmac<Sha256>, CsrfError> {
    // hmac accepts keys of any length, so this never fails in practice
    let mut mac =
        Hmac::<Sha256>::new_from_slice(token.as_bytes()).map_err(|_| CsrfError::Mismatch)?;
    mac.update(CSRF_COOKIE.as_bytes());
    Ok(mac)
}
