use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};

pub const ACCESS_TOKEN: &str = "access_token";
pub const REFRESH_TOKEN: &str = "refresh_token";
pub const USER_ID: &str = "user_id";
pub const ROLE: &str = "role";
pub const TOKEN_EXPIRY: &str = "token_expiry";

const SESSION_COOKIES: [&str; 5] = [ACCESS_TOKEN, REFRESH_TOKEN, TOKEN_EXPIRY, USER_ID, ROLE];

pub fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    let http_only = matches!(name, ACCESS_TOKEN | REFRESH_TOKEN);
    Cookie::build((name, value))
        .path("/")
        .http_only(http_only)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Stores a fresh access token and its expiry.
pub fn store_access_token(
    jar: CookieJar,
    access_token: String,
    expires_at: DateTime<Utc>,
    secure: bool,
) -> CookieJar {
    jar.add(session_cookie(ACCESS_TOKEN, access_token, secure))
        .add(session_cookie(TOKEN_EXPIRY, expires_at.to_rfc3339(), secure))
}

pub fn clear_session_cookies(mut jar: CookieJar) -> CookieJar {
    for name in SESSION_COOKIES {
        jar = jar.remove(Cookie::build(name).path("/"));
    }
    jar
}

/// `Cookie` request header reflecting the jar after any additions.
pub fn cookie_header(jar: &CookieJar) -> String {
    jar.iter()
        .map(|c| format!("{}={}", c.name(), c.value()))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};

    fn jar_with_session() -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static(
                "access_token=a; refresh_token=r; token_expiry=t; user_id=42; role=manager",
            ),
        );
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn test_token_cookies_are_http_only() {
        assert_eq!(session_cookie(ACCESS_TOKEN, "a".into(), true).http_only(), Some(true));
        assert_eq!(session_cookie(ROLE, "manager".into(), true).http_only(), Some(false));
        assert_eq!(session_cookie(ROLE, "manager".into(), true).secure(), Some(true));
    }

    #[test]
    fn test_clear_removes_every_session_cookie() {
        let jar = clear_session_cookies(jar_with_session());
        for name in SESSION_COOKIES {
            assert!(jar.get(name).is_none(), "{} still present", name);
        }
    }

    #[test]
    fn test_cookie_header_reflects_new_token() {
        let jar = store_access_token(jar_with_session(), "fresh".into(), Utc::now(), false);
        let header = cookie_header(&jar);
        assert!(header.contains("access_token=fresh"));
        assert!(header.contains("refresh_token=r"));
        assert!(!header.contains("access_token=a;"));
    }
}
