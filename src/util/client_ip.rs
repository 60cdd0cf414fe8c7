use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

/// Headers consulted for the original client address, first match wins.
const IP_HEADERS: [&str; 2] = ["client-ip", "x-forwarded-for"];

/// Derive the submission source address: the first well-formed public IP
/// found in the proxy headers (comma-separated lists are split and trimmed),
/// falling back to the raw connection address.
pub fn client_ip(headers: &HeaderMap, remote: SocketAddr) -> String {
    for header in IP_HEADERS {
        if let Some(value) = headers.get(header).and_then(|v| v.to_str().ok()) {
            for candidate in value.split(',') {
                if let Ok(ip) = candidate.trim().parse::<IpAddr>() {
                    if is_public(ip) {
                        return ip.to_string();
                    }
                }
            }
        }
    }
    remote.ip().to_string()
}

fn is_public(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            !(v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_broadcast()
                || v4.is_documentation()
                || v4.is_unspecified())
        }
        IpAddr::V6(v6) => {
            !(v6.is_loopback()
                || v6.is_unspecified()
                // fc00::/7 unique local, fe80::/10 link local
                || (v6.segments()[0] & 0xfe00) == 0xfc00
                || (v6.segments()[0] & 0xffc0) == 0xfe80)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn remote() -> SocketAddr {
        "10.0.0.9:44122".parse().unwrap()
    }

    #[test]
    fn test_forwarded_header_first_public_ip_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.5, 93.184.216.34, 8.8.8.8"),
        );
        assert_eq!(client_ip(&headers, remote()), "93.184.216.34");
    }

    #[test]
    fn test_client_ip_header_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert("client-ip", HeaderValue::from_static("8.8.8.8"));
        headers.insert("x-forwarded-for", HeaderValue::from_static("93.184.216.34"));
        assert_eq!(client_ip(&headers, remote()), "8.8.8.8");
    }

    #[test]
    fn test_private_and_malformed_candidates_skipped() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("not-an-ip, 127.0.0.1, 10.1.2.3"),
        );
        assert_eq!(client_ip(&headers, remote()), "10.0.0.9");
    }

    #[test]
    fn test_no_headers_falls_back_to_connection_address() {
        let headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, remote()), "10.0.0.9");
    }
}
