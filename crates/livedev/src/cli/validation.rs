use std::net::{IpAddr, Ipv4Addr, SocketAddr, ToSocketAddrs};

/// Parse a listen address.
///
/// Accepted forms:
/// - `HOST:PORT` with an IP literal, e.g. `127.0.0.1:8080` or `[::1]:8080`
/// - `localhost:PORT`, mapped to 127.0.0.1
/// - `:PORT`, listening on all interfaces
/// - `PORT`, listening on loopback
/// - `NAME:PORT`, resolved through the system resolver
///
/// # Errors
///
/// Returns an error message if the address cannot be parsed.
pub fn parse_addr(s: &str) -> Result<SocketAddr, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Address cannot be empty".to_string());
    }

    if let Ok(addr) = s.parse::<SocketAddr>() {
        return Ok(addr);
    }

    if let Ok(port) = s.parse::<u16>() {
        return Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port));
    }

    let Some((host, port)) = s.rsplit_once(':') else {
        return Err(format!("Address must be HOST:PORT or :PORT: '{}'", s));
    };

    let port: u16 = port
        .parse()
        .map_err(|_| format!("Invalid port in address: '{}'", s))?;

    match host {
        "" => Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port)),
        "localhost" => Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port)),
        _ => (host, port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| format!("Cannot resolve host in address: '{}'", s)),
    }
}
