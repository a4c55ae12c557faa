use std::time::Duration;

use clap::Parser;

use crate::options::{QueryOptions, DEFAULT_FOLLOW, DEFAULT_QUERY_TEMPLATE};
use crate::servers::DEFAULT_WHOIS_PORT;

#[derive(Parser)]
#[command(
    author = "Pysio",
    version = env!("CARGO_PKG_VERSION"),
    about = "A WHOIS query tool that follows registry referrals"
)]
pub struct Cli {
    /// Domain name or IP address to query
    pub target: String,

    /// WHOIS server to use, as host or host:port (bypasses directory lookup)
    #[arg(short, long, env = "WHOIS_SERVER")]
    pub server: Option<String>,

    /// Port number to use when the server has none
    #[arg(short, long, default_value_t = DEFAULT_WHOIS_PORT)]
    pub port: u16,

    /// Timeout in milliseconds (0 disables it)
    #[arg(short, long, default_value_t = 0)]
    pub timeout: u64,

    /// Maximum number of referrals to follow
    #[arg(short, long, default_value_t = DEFAULT_FOLLOW)]
    pub follow: u32,

    /// Query template; %{addr} is replaced by the target
    #[arg(short, long, default_value = DEFAULT_QUERY_TEMPLATE)]
    pub query: String,

    /// Display verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color
    }

    pub fn query_options(&self) -> QueryOptions {
        let mut options = QueryOptions::default()
            .with_follow(self.follow)
            .with_port(self.port)
            .with_query(self.query.clone());
        if self.timeout > 0 {
            options = options.with_timeout(Duration::from_millis(self.timeout));
        }
        if let Some(server) = &self.server {
            options = options.with_server(server.clone());
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_cli(target: &str) -> Cli {
        Cli {
            target: target.to_string(),
            server: None,
            port: 43,
            timeout: 0,
            follow: DEFAULT_FOLLOW,
            query: DEFAULT_QUERY_TEMPLATE.to_string(),
            verbose: false,
            no_color: false,
        }
    }

    #[test]
    fn test_use_color_default() {
        let cli = create_test_cli("example.com");
        assert!(cli.use_color());
    }

    #[test]
    fn test_use_color_disabled() {
        let mut cli = create_test_cli("example.com");
        cli.no_color = true;
        assert!(!cli.use_color());
    }

    #[test]
    fn test_default_options() {
        let cli = create_test_cli("example.com");
        assert_eq!(cli.query_options(), QueryOptions::default());
    }

    #[test]
    fn test_options_from_flags() {
        let mut cli = create_test_cli("example.com");
        cli.server = Some("rwhois.example.org:4321".to_string());
        cli.timeout = 1500;
        cli.follow = 0;

        let options = cli.query_options();
        assert_eq!(options.server(), Some("rwhois.example.org:4321"));
        assert_eq!(options.timeout, Some(Duration::from_millis(1500)));
        assert_eq!(options.follow, 0);
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "whois-referral",
            "192.0.2.1",
            "--follow",
            "1",
            "-t",
            "200",
            "-q",
            "n + %{addr}\r\n",
        ])
        .unwrap();

        assert_eq!(cli.target, "192.0.2.1");
        assert_eq!(cli.follow, 1);
        assert_eq!(cli.timeout, 200);
        assert_eq!(cli.query_options().render_query("192.0.2.1"), "n + 192.0.2.1\r\n");
    }
}
