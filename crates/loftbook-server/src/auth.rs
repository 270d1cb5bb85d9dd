//! Session cookie handling
//!
//! The admin session is a single HTTP-only cookie flag: no per-user
//! identity, no rotation, no revocation list. Logout overwrites the flag
//! with an immediately-expired cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use loftbook_core::constants::session::{ADMIN_COOKIE, ADMIN_FLAG, SESSION_TTL_DAYS};

/// True iff the request carries the session cookie with the exact admin
/// flag value. Pure predicate; any other value (including absent) is
/// not admin.
pub fn is_admin(jar: &CookieJar) -> bool {
    jar.get(ADMIN_COOKIE)
        .map(|cookie| cookie.value() == ADMIN_FLAG)
        .unwrap_or(false)
}

/// Cookie issued on successful authentication.
///
/// HTTP-only so page scripts cannot read it; Secure only in production
/// so local development over plain HTTP keeps working.
pub fn session_cookie() -> Cookie<'static> {
    Cookie::build((ADMIN_COOKIE, ADMIN_FLAG))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(production())
        .path("/")
        .max_age(Duration::days(SESSION_TTL_DAYS))
        .build()
}

/// Immediately-expired cookie issued on logout, regardless of current
/// session state.
pub fn expired_cookie() -> Cookie<'static> {
    Cookie::build((ADMIN_COOKIE, "0"))
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

fn production() -> bool {
    std::env::var("LOFTBOOK_ENV")
        .map(|v| v == "production")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_exact_flag_value_counts_as_admin() {
        let jar = CookieJar::new();
        assert!(!is_admin(&jar));

        let jar = jar.add(Cookie::new(ADMIN_COOKIE, "0"));
        assert!(!is_admin(&jar));

        let jar = jar.add(Cookie::new(ADMIN_COOKIE, ADMIN_FLAG));
        assert!(is_admin(&jar));
    }

    #[test]
    fn session_cookie_is_scoped_and_http_only() {
        let cookie = session_cookie();
        assert_eq!(cookie.name(), ADMIN_COOKIE);
        assert_eq!(cookie.value(), ADMIN_FLAG);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::days(SESSION_TTL_DAYS)));
    }

    #[test]
    fn logout_cookie_expires_immediately() {
        let cookie = expired_cookie();
        assert_eq!(cookie.value(), "0");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
