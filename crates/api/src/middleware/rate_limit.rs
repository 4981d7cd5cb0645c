//! Rate limiting middleware.
//!
//! Per-client-IP request limiting for the public function endpoints.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::{Clock, DefaultClock},
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter as GovRateLimiter,
};
use serde_json::json;
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    num::NonZeroU32,
};

use crate::app::AppState;

type ClientRateLimiter = GovRateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// Rate limiter shared across all requests, keyed by client IP.
///
/// Keys whose quota has fully replenished are dropped by [`retain_recent`],
/// which the `rate_limiter_cleanup` job calls every minute.
///
/// [`retain_recent`]: RateLimiterState::retain_recent
pub struct RateLimiterState {
    limiter: ClientRateLimiter,
    rate_limit_per_minute: u32,
    trust_forwarded_headers: bool,
}

impl RateLimiterState {
    /// `rate_limit_per_minute` of 0 is treated as 1; callers disable limiting
    /// by not constructing a state at all.
    pub fn new(rate_limit_per_minute: u32, trust_forwarded_headers: bool) -> Self {
        let per_minute = NonZeroU32::new(rate_limit_per_minute).unwrap_or(NonZeroU32::MIN);
        Self::with_quota(
            Quota::per_minute(per_minute),
            rate_limit_per_minute,
            trust_forwarded_headers,
        )
    }

    fn with_quota(quota: Quota, rate_limit_per_minute: u32, trust_forwarded_headers: bool) -> Self {
        Self {
            limiter: GovRateLimiter::keyed(quota),
            rate_limit_per_minute,
            trust_forwarded_headers,
        }
    }

    pub fn trusts_forwarded_headers(&self) -> bool {
        self.trust_forwarded_headers
    }

    /// `Err` carries the number of seconds to wait, at least 1.
    pub fn check(&self, key: &IpAddr) -> Result<(), u64> {
        self.limiter.check_key(key).map_err(|not_until| {
            not_until
                .wait_time_from(DefaultClock::default().now())
                .as_secs()
                .max(1)
        })
    }

    /// Forgets clients whose quota is back to full.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("trust_forwarded_headers", &self.trust_forwarded_headers)
            .field("tracked_clients", &self.tracked_clients())
            .finish()
    }
}

fn header_ip(headers: &HeaderMap, name: &str) -> Option<IpAddr> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse().ok())
}

/// Client key: the peer address, or when running behind a trusted proxy the
/// first `X-Forwarded-For` hop, else `X-Real-IP`, else the peer.
///
/// Requests without a known peer share the unspecified address.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>, trust_forwarded: bool) -> IpAddr {
    let forwarded = trust_forwarded
        .then(|| header_ip(headers, "x-forwarded-for").or_else(|| header_ip(headers, "x-real-ip")))
        .flatten();

    forwarded
        .or_else(|| peer.map(|addr| addr.ip()))
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(ref rate_limiter) = state.rate_limiter {
        let peer = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        let key = client_key(req.headers(), peer, rate_limiter.trusts_forwarded_headers());

        if let Err(retry_after) = rate_limiter.check(&key) {
            tracing::warn!(client = %key, retry_after, "Client rate limit exceeded");
            return rate_limited_response(state.config.security.rate_limit_per_minute, retry_after);
        }
    }

    next.run(req).await
}

fn rate_limited_response(limit: u32, retry_after: u64) -> Response {
    let body = json!({
        "success": false,
        "error": format!("Rate limit of {} requests/minute exceeded", limit),
        "retry_after_secs": retry_after
    });

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
    response
}
