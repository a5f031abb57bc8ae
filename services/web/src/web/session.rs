//! services/web/src/web/session.rs
//!
//! Per-client session state, held entirely in signed cookies: a `session`
//! cookie carrying the logged-in flag and a one-shot `flash` cookie for
//! confirmation messages. A cookie whose signature does not verify never
//! appears in the jar, so a tampered or forged value reads as anonymous.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};

const SESSION_COOKIE: &str = "session";
const FLASH_COOKIE: &str = "flash";
const LOGGED_IN: &str = "logged_in";

/// True iff the signed session cookie is present and carries the flag.
pub fn is_authenticated(jar: &SignedCookieJar) -> bool {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value() == LOGGED_IN)
        .unwrap_or(false)
}

/// Marks the session as logged in.
pub fn log_in(jar: SignedCookieJar) -> SignedCookieJar {
    jar.add(build_cookie(SESSION_COOKIE, LOGGED_IN.to_string()))
}

/// Removes the logged-in flag. A no-op when the client was already
/// anonymous, so calling it repeatedly is harmless.
pub fn log_out(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(removal_cookie(SESSION_COOKIE))
}

/// Queues a one-shot message for the next rendered page.
pub fn set_flash(jar: SignedCookieJar, message: &str) -> SignedCookieJar {
    jar.add(build_cookie(FLASH_COOKIE, message.to_string()))
}

/// Takes the pending flash message, clearing it so it shows exactly once.
pub fn take_flash(jar: SignedCookieJar) -> (SignedCookieJar, Option<String>) {
    match jar.get(FLASH_COOKIE) {
        Some(cookie) => {
            let message = cookie.value().to_string();
            (jar.remove(removal_cookie(FLASH_COOKIE)), Some(message))
        }
        None => (jar, None),
    }
}

fn build_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

// Removal must carry the same path as the original cookie.
fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Key;

    fn jar() -> SignedCookieJar {
        SignedCookieJar::new(Key::generate())
    }

    #[test]
    fn fresh_session_is_anonymous() {
        assert!(!is_authenticated(&jar()));
    }

    #[test]
    fn login_then_logout_round_trip() {
        let jar = log_in(jar());
        assert!(is_authenticated(&jar));
        let jar = log_out(jar);
        assert!(!is_authenticated(&jar));
    }

    #[test]
    fn logout_is_idempotent() {
        let jar = log_out(log_out(jar()));
        assert!(!is_authenticated(&jar));
    }

    #[test]
    fn flash_shows_exactly_once() {
        let jar = set_flash(jar(), "You were logged in");
        let (jar, message) = take_flash(jar);
        assert_eq!(message.as_deref(), Some("You were logged in"));
        let (_, again) = take_flash(jar);
        assert!(again.is_none());
    }
}
