use axum::extract::{ConnectInfo, Request};
use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

/// Label used when neither a peer address nor a trusted header is available.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Resolves the client IP for logging and per-IP counting.
///
/// The peer address comes from `ConnectInfo`, which is only present when
/// the router is served with `into_make_service_with_connect_info`.
/// Forwarding headers are consulted first when `trust_proxy_headers` is
/// set; values that do not parse as an IP address are ignored.
pub fn client_ip(request: &Request, trust_proxy_headers: bool) -> String {
    // ---
    if trust_proxy_headers {
        if let Some(ip) = forwarded_ip(request.headers()) {
            return ip.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    // ---
    let first_hop = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .and_then(|value| value.trim().parse::<IpAddr>().ok())
    };

    first_hop("x-forwarded-for").or_else(|| first_hop("x-real-ip"))
}
