//! Client address resolution for visit records.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Forwarding headers consulted behind a trusted proxy, in priority order.
const FORWARDING_HEADERS: &[&str] = &["cf-connecting-ip", "x-forwarded-for", "x-real-ip"];

/// Resolves the client IP of a request.
///
/// Without a proxy the peer socket address is used. With `behind_proxy` the
/// first hop of the first present forwarding header wins, falling back to the
/// peer address. Enable only behind a proxy that overwrites these headers.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        for name in FORWARDING_HEADERS {
            let first_hop = headers
                .get(*name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty());

            if let Some(ip) = first_hop {
                return ip.to_string();
            }
        }
    }

    peer.ip().to_string()
}
