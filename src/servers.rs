use std::fmt;
use std::net::IpAddr;

use tracing::debug;

use crate::directory::ServerDirectory;
use crate::error::{Result, WhoisError};
use crate::options::QueryOptions;

pub const DEFAULT_WHOIS_PORT: u16 = 43;
/// Used when no suffix of a domain has a directory entry.
pub const FALLBACK_WHOIS_SERVER: &str = "whois.ripe.net";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhoisServer {
    pub host: String,
    pub port: u16,
}

impl WhoisServer {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn fallback() -> Self {
        Self::new(FALLBACK_WHOIS_SERVER, DEFAULT_WHOIS_PORT)
    }

    /// Parse `host` or `host:port`, splitting on the first `:`.
    /// A missing port leaves `default_port` in place. A bare IP literal
    /// (including IPv6) is taken whole as the host.
    pub fn parse(server: &str, default_port: u16) -> Result<Self> {
        let server = server.trim();
        if server.parse::<IpAddr>().is_ok() {
            return Ok(Self::new(server, default_port));
        }
        match server.split_once(':') {
            Some((host, port)) => {
                let port = port
                    .trim()
                    .parse::<u16>()
                    .map_err(|_| WhoisError::InvalidServer(server.to_string()))?;
                Ok(Self::new(host.trim(), port))
            }
            None => Ok(Self::new(server.trim(), default_port)),
        }
    }

    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Whether `other` names the same endpoint. Hostnames compare case-insensitively.
    pub fn same_endpoint(&self, other: &WhoisServer) -> bool {
        self.port == other.port && self.host.eq_ignore_ascii_case(&other.host)
    }
}

impl fmt::Display for WhoisServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.port == DEFAULT_WHOIS_PORT {
            f.write_str(&self.host)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

pub struct ServerSelector;

impl ServerSelector {
    /// Pick the first server to ask about `target`.
    ///
    /// An explicit `options.server` always wins. Otherwise IP literals go to the
    /// directory's wildcard entry and domains go through suffix lookup, ending at
    /// [`FALLBACK_WHOIS_SERVER`] when nothing matches.
    pub fn select_server(
        target: &str,
        options: &QueryOptions,
        directory: &ServerDirectory,
    ) -> Result<WhoisServer> {
        if let Some(server) = options.server() {
            let server = WhoisServer::parse(server, options.port)?;
            return Self::non_empty(target, server);
        }

        if target.parse::<IpAddr>().is_ok() {
            let server = directory
                .lookup_by_ip_wildcard()
                .ok_or_else(|| WhoisError::NoServerFound(target.to_string()))?;
            debug!(query = target, server = %server, "using IP wildcard server");
            return Self::non_empty(target, server);
        }

        match directory.lookup_by_suffix(target) {
            Some(server) => {
                debug!(query = target, server = %server, "matched domain suffix");
                Self::non_empty(target, server)
            }
            None => {
                debug!(query = target, "no suffix matched, using fallback server");
                Ok(WhoisServer::fallback())
            }
        }
    }

    fn non_empty(target: &str, server: WhoisServer) -> Result<WhoisServer> {
        if server.host.is_empty() {
            return Err(WhoisError::NoServerFound(target.to_string()));
        }
        Ok(server)
    }
}
