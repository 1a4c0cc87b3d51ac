//! Shared-secret header check gating every notes route.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::InvalidHeaderName, request::Parts, HeaderMap, HeaderName},
};

use crate::error::ApiError;
use crate::AppState;

/// Default request header carrying the API key.
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-header";

/// Compares one configured header against a fixed secret.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    header: HeaderName,
    secret: String,
}

impl AccessGuard {
    pub fn new(header: &str, secret: impl Into<String>) -> Result<Self, InvalidHeaderName> {
        Ok(Self {
            header: HeaderName::try_from(header)?,
            secret: secret.into(),
        })
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    /// True iff the header is present and its bytes equal the secret exactly.
    pub fn allows(&self, headers: &HeaderMap) -> bool {
        headers
            .get(&self.header)
            .is_some_and(|value| value.as_bytes() == self.secret.as_bytes())
    }
}

/// Extractor proving the request passed the [`AccessGuard`].
///
/// List it before any body extractor so a denied request is rejected before
/// its body is read.
#[derive(Debug, Clone, Copy)]
pub struct Authorized;

impl FromRequestParts<Arc<AppState>> for Authorized {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if state.guard.allows(&parts.headers) {
            Ok(Authorized)
        } else {
            tracing::debug!("Rejected {} {}: bad or missing API key", parts.method, parts.uri.path());
            Err(ApiError::AccessDenied)
        }
    }
}
