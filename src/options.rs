use std::time::Duration;

use crate::servers::DEFAULT_WHOIS_PORT;

/// Placeholder in the query template that is replaced by the lookup target.
pub const QUERY_ADDR_PLACEHOLDER: &str = "%{addr}";
pub const DEFAULT_QUERY_TEMPLATE: &str = "%{addr}\r\n";
pub const DEFAULT_FOLLOW: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    pub timeout: Option<Duration>,
    /// Referrals still allowed to be followed.
    pub follow: u32,
    pub server: Option<String>,
    pub port: u16,
    pub query: String,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            follow: DEFAULT_FOLLOW,
            server: None,
            port: DEFAULT_WHOIS_PORT,
            query: DEFAULT_QUERY_TEMPLATE.to_string(),
        }
    }
}

impl QueryOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_timeout_ms(self, millis: u64) -> Self {
        self.with_timeout(Duration::from_millis(millis))
    }

    pub fn with_follow(mut self, follow: u32) -> Self {
        self.follow = follow;
        self
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_query(mut self, template: impl Into<String>) -> Self {
        self.query = template.into();
        self
    }

    /// The configured timeout, with zero meaning "no timeout".
    pub fn effective_timeout(&self) -> Option<Duration> {
        self.timeout.filter(|t| !t.is_zero())
    }

    /// The explicit server override, ignoring an empty string.
    pub fn server(&self) -> Option<&str> {
        self.server.as_deref().filter(|s| !s.is_empty())
    }

    /// Options for the next hop: defaults plus the inherited timeout,
    /// one less follow, and the referral as server.
    pub fn for_referral(&self, referral: &str) -> Self {
        Self {
            timeout: self.timeout,
            follow: self.follow.saturating_sub(1),
            server: Some(referral.to_string()),
            ..Self::default()
        }
    }

    pub fn render_query(&self, target: &str) -> String {
        render_query(&self.query, target)
    }
}

/// Substitute `target` for the first placeholder in `template`.
pub fn render_query(template: &str, target: &str) -> String {
    template.replacen(QUERY_ADDR_PLACEHOLDER, target, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = QueryOptions::default();
        assert_eq!(options.timeout, None);
        assert_eq!(options.follow, 2);
        assert_eq!(options.server, None);
        assert_eq!(options.port, 43);
        assert_eq!(options.render_query("example.com"), "example.com\r\n");
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let options = QueryOptions::default().with_timeout_ms(0);
        assert_eq!(options.effective_timeout(), None);

        let options = QueryOptions::default().with_timeout_ms(250);
        assert_eq!(options.effective_timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_empty_server_is_unset() {
        let options = QueryOptions::default().with_server("");
        assert_eq!(options.server(), None);
    }

    #[test]
    fn test_render_replaces_first_placeholder_only() {
        let options = QueryOptions::default().with_query("n + %{addr} %{addr}\r\n");
        assert_eq!(options.render_query("192.0.2.1"), "n + 192.0.2.1 %{addr}\r\n");
    }

    #[test]
    fn test_referral_inherits_only_timeout() {
        let options = QueryOptions::default()
            .with_timeout_ms(500)
            .with_follow(3)
            .with_server("whois.verisign-grs.com")
            .with_port(4343)
            .with_query("domain %{addr}\r\n");

        let next = options.for_referral("whois.markmonitor.com");
        assert_eq!(next.timeout, Some(Duration::from_millis(500)));
        assert_eq!(next.follow, 2);
        assert_eq!(next.server(), Some("whois.markmonitor.com"));
        assert_eq!(next.port, DEFAULT_WHOIS_PORT);
        assert_eq!(next.query, DEFAULT_QUERY_TEMPLATE);
        // the source options are left untouched
        assert_eq!(options.follow, 3);
    }
}
