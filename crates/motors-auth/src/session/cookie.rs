//! Session and notice cookie handling.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use motors_core::config::AuthConfig;

use super::flash;

/// Sets, reads and clears the token and notice cookies.
///
/// Both cookies are `HttpOnly`, `Path=/` and `SameSite=Lax`; `Secure`
/// follows `auth.cookie_secure`. The token cookie's `Max-Age` equals the
/// token TTL. The notice cookie lives for the browser session only and is
/// removed as soon as it is read.
#[derive(Debug, Clone)]
pub struct SessionCookies {
    /// Name of the token cookie.
    token_name: String,
    /// Name of the notice cookie.
    flash_name: String,
    /// Whether cookies carry the `Secure` attribute.
    secure: bool,
    /// Lifetime of the token cookie.
    max_age: time::Duration,
}

impl SessionCookies {
    /// Creates the cookie carrier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            token_name: config.cookie_name.clone(),
            flash_name: config.flash_cookie_name.clone(),
            secure: config.cookie_secure,
            max_age: time::Duration::seconds(
                i64::try_from(config.token_ttl_seconds).unwrap_or(i64::MAX),
            ),
        }
    }

    /// Name of the token cookie.
    pub fn token_name(&self) -> &str {
        &self.token_name
    }

    /// Name of the notice cookie.
    pub fn flash_name(&self) -> &str {
        &self.flash_name
    }

    /// The token presented with the request, if any.
    pub fn token<'a>(&self, jar: &'a CookieJar) -> Option<&'a str> {
        jar.get(&self.token_name)
            .map(|c| c.value())
            .filter(|v| !v.is_empty())
    }

    /// Stores a freshly issued token.
    pub fn set_token(&self, jar: CookieJar, token: String) -> CookieJar {
        let cookie = Cookie::build((self.token_name.clone(), token))
            .http_only(true)
            .secure(self.secure)
            .path("/")
            .same_site(SameSite::Lax)
            .max_age(self.max_age);
        jar.add(cookie)
    }

    /// Removes the token cookie.
    pub fn clear_token(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build((self.token_name.clone(), "")).path("/"))
    }

    /// Queues a notice for the next rendered page.
    pub fn set_flash(&self, jar: CookieJar, message: &str) -> CookieJar {
        let cookie = Cookie::build((self.flash_name.clone(), flash::encode(message)))
            .http_only(true)
            .secure(self.secure)
            .path("/")
            .same_site(SameSite::Lax);
        jar.add(cookie)
    }

    /// Reads the pending notice and removes its cookie.
    pub fn take_flash(&self, jar: CookieJar) -> (CookieJar, Option<String>) {
        let Some(cookie) = jar.get(&self.flash_name) else {
            return (jar, None);
        };
        let message = flash::decode(cookie.value());
        let jar = jar.remove(Cookie::build((self.flash_name.clone(), "")).path("/"));
        (jar, message)
    }

    /// Removes every client-side session artifact.
    pub fn clear_all(&self, jar: CookieJar) -> CookieJar {
        let jar = self.clear_token(jar);
        jar.remove(Cookie::build((self.flash_name.clone(), "")).path("/"))
    }
}
