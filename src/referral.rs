use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::directory::ServerDirectory;

/// Response fields that name the next WHOIS server to ask.
pub const REFERRAL_FIELDS: &[&str] = &[
    "ReferralServer",
    "Registrar Whois",
    "Whois Server",
    "WHOIS Server",
    "Registrar WHOIS Server",
];

static RE_REFERRAL_FIELD: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?:{}):[^\S\n]*(?:r?whois://)?(\S*)",
        REFERRAL_FIELDS.join("|")
    );
    Regex::new(&pattern).unwrap()
});

/// `Registrar:` block whose indented body contains a `Name:` line.
static RE_REGISTRAR_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^Registrar:[^\S\n]*\n(?:[ \t]+[^\n]*\n)*?[ \t]+Name:[^\S\n]*([^\n]*)").unwrap()
});

pub struct ReferralExtractor<'a> {
    directory: &'a ServerDirectory,
}

impl<'a> ReferralExtractor<'a> {
    pub fn new(directory: &'a ServerDirectory) -> Self {
        Self { directory }
    }

    /// Find a referral server in a raw response, as `host` or `host:port`.
    ///
    /// A direct server field is preferred; a registrar name known to the
    /// directory is used only when no such field is present.
    pub fn extract(&self, response: &str) -> Option<String> {
        let response = response.replace('\r', "");

        if let Some(server) = Self::from_server_field(&response) {
            debug!(referral = %server, "found referral server field");
            return Some(server);
        }

        let server = self.from_registrar_name(&response)?;
        debug!(referral = %server, "resolved referral from registrar name");
        Some(server)
    }

    fn from_server_field(response: &str) -> Option<String> {
        let caps = RE_REFERRAL_FIELD.captures(response)?;
        let server = caps.get(1)?.as_str();
        (!server.is_empty()).then(|| server.to_string())
    }

    fn from_registrar_name(&self, response: &str) -> Option<String> {
        let caps = RE_REGISTRAR_NAME.captures(response)?;
        let name = caps.get(1)?.as_str().trim();
        if name.is_empty() {
            return None;
        }
        let server = self.directory.lookup_by_registrar_name(name)?;
        (!server.host.is_empty()).then(|| server.to_string())
    }
}
