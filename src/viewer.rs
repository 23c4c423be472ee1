//! Viewer identification.
//!
//! A viewer is one browser, recognised by a random cookie. It is not an
//! authenticated user: the quiz core never sees an identity, only the
//! session store keys its machines by viewer ID.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use std::convert::Infallible;

use crate::config::VIEWER_COOKIE_NAME;
use crate::session::{generate_session_id, is_valid_session_id};

/// Viewer extractor.
///
/// Issues a fresh ID when the cookie is missing or malformed. Handlers must
/// return [`Viewer::into_jar`] with their response so a new cookie reaches
/// the browser.
pub struct Viewer {
    pub id: String,
    jar: CookieJar,
}

impl Viewer {
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        if let Some(id) = jar
            .get(VIEWER_COOKIE_NAME)
            .map(|c| c.value().to_string())
            .filter(|id| is_valid_session_id(id))
        {
            return Ok(Viewer { id, jar });
        }

        let id = generate_session_id();
        let cookie = Cookie::build((VIEWER_COOKIE_NAME, id.clone()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        tracing::debug!("Issued new viewer id");

        Ok(Viewer {
            id,
            jar: jar.add(cookie),
        })
    }
}
