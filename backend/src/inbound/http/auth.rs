//! Identity extraction from trusted proxy headers.
//!
//! Authentication itself is an external collaborator: the service runs
//! behind an identity-aware proxy that verifies the caller and forwards the
//! owner id and verified email addresses as headers. The extractor turns
//! those headers into a domain [`Identity`]; a missing or empty owner header
//! is `401 Unauthorized`.

use actix_web::http::header::HeaderMap;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::warn;

use crate::domain::{EmailAddress, Error, Identity, OwnerId};

/// Header carrying the verified owner id.
pub const AUTH_USER_HEADER: &str = "X-Auth-User";
/// Header carrying the comma-separated verified email addresses.
pub const AUTH_EMAILS_HEADER: &str = "X-Auth-Emails";

/// Authenticated request context, extracted once per request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    identity: Identity,
}

impl AuthContext {
    /// The verified identity of the caller.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

fn parse_identity(headers: &HeaderMap) -> Result<Identity, Error> {
    let raw_user = headers
        .get(AUTH_USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    let owner_id = OwnerId::new(raw_user)
        .map_err(|_| Error::unauthorized("authentication required"))?;

    // Unparseable addresses are skipped rather than failing the request; the
    // proxy vouched for the caller, the emails only widen shared access.
    let emails = headers
        .get(AUTH_EMAILS_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .filter_map(|raw| match EmailAddress::new(raw) {
            Ok(email) => Some(email),
            Err(error) => {
                warn!(%error, "discarding malformed email header entry");
                None
            }
        });

    Ok(Identity::new(owner_id, emails))
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(parse_identity(req.headers()).map(|identity| Self { identity }))
    }
}
