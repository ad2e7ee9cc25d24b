//! Client identity extraction
//!
//! The render label can echo who asked for the image. The client IP is the
//! first entry of `X-Forwarded-For` (entries separated by `", "`), falling
//! back to the transport peer address. The header is taken at face value;
//! this is a provenance hint, not an authentication signal.

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{header, request::Parts, HeaderMap};
use std::convert::Infallible;
use std::net::SocketAddr;

const FORWARDED_FOR: &str = "x-forwarded-for";
const UNKNOWN: &str = "unknown";

/// Requester IP and user agent, as far as the request reveals them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub ip: String,
    pub user_agent: String,
}

impl ClientIdentity {
    pub fn from_headers(headers: &HeaderMap, socket_addr: Option<&SocketAddr>) -> Self {
        Self {
            ip: extract_client_ip(headers, socket_addr),
            user_agent: headers
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string(),
        }
    }
}

impl<S> FromRequestParts<S> for ClientIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let socket_addr = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(Self::from_headers(&parts.headers, socket_addr.as_ref()))
    }
}

/// First `X-Forwarded-For` entry, else the peer IP, else `"unknown"`.
pub fn extract_client_ip(headers: &HeaderMap, socket_addr: Option<&SocketAddr>) -> String {
    if let Some(forwarded_for) = headers.get(FORWARDED_FOR).and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded_for.split(", ").next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(addr) = socket_addr {
        return addr.ip().to_string();
    }

    UNKNOWN.to_string()
}
