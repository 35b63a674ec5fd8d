//! Network listener configuration.

use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};

/// Port used when neither the config, the command line nor `PORT` name one.
pub const DEFAULT_PORT: u16 = 4000;

/// Network listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to bind to (e.g., "0.0.0.0:4000").
    #[serde(default = "default_address")]
    pub address: SocketAddr,
}

impl ListenConfig {
    /// Keep the bind address but listen on `port`.
    pub fn set_port(&mut self, port: u16) {
        self.address.set_port(port);
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

fn default_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binds_all_interfaces_on_4000() {
        let listen = ListenConfig::default();
        assert_eq!(listen.address.to_string(), "0.0.0.0:4000");
    }

    #[test]
    fn set_port_keeps_ip() {
        let mut listen = ListenConfig {
            address: "127.0.0.1:1".parse().unwrap(),
        };
        listen.set_port(7000);
        assert_eq!(listen.address.to_string(), "127.0.0.1:7000");
    }
}
