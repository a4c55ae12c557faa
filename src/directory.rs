use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::servers::{WhoisServer, DEFAULT_WHOIS_PORT};

/// Directory key reserved for IP address targets.
pub const IP_WILDCARD_KEY: &str = "_";

/// Suffix entries are bare hosts (port 43) or `host:port`.
const SUFFIX_SERVERS: &[(&str, &str)] = &[
    (IP_WILDCARD_KEY, "whois.arin.net"),
    ("com", "whois.verisign-grs.com"),
    ("net", "whois.verisign-grs.com"),
    ("org", "whois.pir.org"),
    ("info", "whois.afilias.net"),
    ("biz", "whois.biz"),
    ("name", "whois.nic.name"),
    ("mobi", "whois.afilias.net"),
    ("pro", "whois.registrypro.pro"),
    ("aero", "whois.aero"),
    ("asia", "whois.nic.asia"),
    ("cat", "whois.nic.cat"),
    ("coop", "whois.nic.coop"),
    ("edu", "whois.educause.edu"),
    ("gov", "whois.dotgov.gov"),
    ("int", "whois.iana.org"),
    ("jobs", "whois.nic.jobs"),
    ("mil", "whois.nic.mil"),
    ("museum", "whois.museum"),
    ("tel", "whois.nic.tel"),
    ("travel", "whois.nic.travel"),
    ("xxx", "whois.nic.xxx"),
    ("app", "whois.nic.google"),
    ("dev", "whois.nic.google"),
    ("page", "whois.nic.google"),
    ("io", "whois.nic.io"),
    ("co", "whois.nic.co"),
    ("me", "whois.nic.me"),
    ("tv", "whois.nic.tv"),
    ("cc", "ccwhois.verisign-grs.com"),
    ("xyz", "whois.nic.xyz"),
    ("online", "whois.nic.online"),
    ("site", "whois.nic.site"),
    ("tech", "whois.nic.tech"),
    ("ai", "whois.nic.ai"),
    ("arpa", "whois.iana.org"),
    ("ac", "whois.nic.ac"),
    ("at", "whois.nic.at"),
    ("au", "whois.auda.org.au"),
    ("be", "whois.dns.be"),
    ("br", "whois.registro.br"),
    ("ca", "whois.cira.ca"),
    ("ch", "whois.nic.ch"),
    ("cn", "whois.cnnic.cn"),
    ("cz", "whois.nic.cz"),
    ("de", "whois.denic.de"),
    ("dk", "whois.punktum.dk"),
    ("es", "whois.nic.es"),
    ("eu", "whois.eu"),
    ("fi", "whois.fi"),
    ("fr", "whois.nic.fr"),
    ("hk", "whois.hkirc.hk"),
    ("ie", "whois.weare.ie"),
    ("in", "whois.registry.in"),
    ("it", "whois.nic.it"),
    ("jp", "whois.jprs.jp"),
    ("kr", "whois.kr"),
    ("li", "whois.nic.li"),
    ("nl", "whois.domain-registry.nl"),
    ("no", "whois.norid.no"),
    ("nz", "whois.irs.net.nz"),
    ("pl", "whois.dns.pl"),
    ("pt", "whois.dns.pt"),
    ("ru", "whois.tcinet.ru"),
    ("se", "whois.iis.se"),
    ("sg", "whois.sgnic.sg"),
    ("tw", "whois.twnic.net.tw"),
    ("uk", "whois.nic.uk"),
    ("us", "whois.nic.us"),
    ("za", "whois.registry.net.za"),
    ("ac.uk", "whois.ja.net"),
    ("gov.uk", "whois.ja.net"),
];

const REGISTRAR_SERVERS: &[(&str, &str)] = &[
    ("GoDaddy.com, LLC", "whois.godaddy.com"),
    ("MarkMonitor Inc.", "whois.markmonitor.com"),
    ("NameCheap, Inc.", "whois.namecheap.com"),
    ("Network Solutions, LLC", "whois.networksolutions.com"),
    ("Tucows Domains Inc.", "whois.tucows.com"),
    ("eNom, LLC", "whois.enom.com"),
    ("Gandi SAS", "whois.gandi.net"),
    ("OVH sas", "whois.ovh.com"),
    ("Key-Systems GmbH", "whois.rrpproxy.net"),
    ("Google LLC", "whois.google.com"),
    ("Squarespace Domains II LLC", "whois.squarespace.domains"),
    ("CSC Corporate Domains, Inc.", "whois.corporatedomains.com"),
    ("Amazon Registrar, Inc.", "whois.registrar.amazon.com"),
    ("Cloudflare, Inc.", "whois.cloudflare.com"),
    ("Dynadot Inc", "whois.dynadot.com"),
    ("Porkbun LLC", "whois.porkbun.com"),
    ("Hostinger Operations, UAB", "whois.hostinger.com"),
    ("IONOS SE", "whois.ionos.com"),
    ("Alibaba Cloud Computing (Beijing) Co., Ltd.", "grs-whois.hichina.com"),
    ("PDR Ltd. d/b/a PublicDomainRegistry.com", "whois.publicdomainregistry.com"),
];

static BUILTIN: Lazy<ServerDirectory> = Lazy::new(|| {
    let mut builder = ServerDirectory::builder();
    for (suffix, server) in SUFFIX_SERVERS {
        builder = builder.suffix(*suffix, entry(server));
    }
    for (name, server) in REGISTRAR_SERVERS {
        builder = builder.registrar(*name, entry(server));
    }
    builder.build()
});

/// Table entries are compile-time constants; an unparsable port keeps the default.
fn entry(server: &str) -> WhoisServer {
    WhoisServer::parse(server, DEFAULT_WHOIS_PORT)
        .unwrap_or_else(|_| WhoisServer::new(server, DEFAULT_WHOIS_PORT))
}

/// Read-only lookup tables mapping domain suffixes and registrar names to servers.
#[derive(Debug, Clone, Default)]
pub struct ServerDirectory {
    suffixes: HashMap<String, WhoisServer>,
    registrars: HashMap<String, WhoisServer>,
}

impl ServerDirectory {
    /// The process-wide directory shipped with the crate.
    pub fn builtin() -> &'static ServerDirectory {
        &BUILTIN
    }

    pub fn builder() -> ServerDirectoryBuilder {
        ServerDirectoryBuilder::default()
    }

    /// Try `target` as a whole, then drop one leading label at a time.
    pub fn lookup_by_suffix(&self, target: &str) -> Option<WhoisServer> {
        let mut lookup = target;
        while !lookup.is_empty() {
            if let Some(server) = self.suffixes.get(lookup) {
                return Some(server.clone());
            }
            lookup = match lookup.find('.') {
                Some(dot) => &lookup[dot + 1..],
                None => "",
            };
        }
        None
    }

    pub fn lookup_by_ip_wildcard(&self) -> Option<WhoisServer> {
        self.suffixes.get(IP_WILDCARD_KEY).cloned()
    }

    pub fn lookup_by_registrar_name(&self, name: &str) -> Option<WhoisServer> {
        self.registrars.get(name).cloned()
    }
}

#[derive(Debug, Default)]
pub struct ServerDirectoryBuilder {
    directory: ServerDirectory,
}

impl ServerDirectoryBuilder {
    pub fn suffix(mut self, suffix: impl Into<String>, server: WhoisServer) -> Self {
        self.directory.suffixes.insert(suffix.into(), server);
        self
    }

    pub fn ip_wildcard(self, server: WhoisServer) -> Self {
        self.suffix(IP_WILDCARD_KEY, server)
    }

    pub fn registrar(mut self, name: impl Into<String>, server: WhoisServer) -> Self {
        self.directory.registrars.insert(name.into(), server);
        self
    }

    pub fn build(self) -> ServerDirectory {
        self.directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_ip_wildcard() {
        let server = ServerDirectory::builtin().lookup_by_ip_wildcard().unwrap();
        assert_eq!(server.host, "whois.arin.net");
        assert_eq!(server.port, DEFAULT_WHOIS_PORT);
    }

    #[test]
    fn test_builtin_suffix_lookup() {
        let directory = ServerDirectory::builtin();
        assert_eq!(
            directory.lookup_by_suffix("example.com").unwrap().host,
            "whois.verisign-grs.com"
        );
        assert_eq!(
            directory.lookup_by_suffix("www.example.org").unwrap().host,
            "whois.pir.org"
        );
    }

    #[test]
    fn test_longest_suffix_wins() {
        let directory = ServerDirectory::builtin();
        assert_eq!(directory.lookup_by_suffix("ox.ac.uk").unwrap().host, "whois.ja.net");
        assert_eq!(directory.lookup_by_suffix("bbc.co.uk").unwrap().host, "whois.nic.uk");
    }

    #[test]
    fn test_full_target_is_tried_first() {
        let directory = ServerDirectory::builder()
            .suffix("example.com", WhoisServer::new("whois.exact.example", 43))
            .suffix("com", WhoisServer::new("whois.verisign-grs.com", 43))
            .build();
        assert_eq!(
            directory.lookup_by_suffix("example.com").unwrap().host,
            "whois.exact.example"
        );
        assert_eq!(
            directory.lookup_by_suffix("other.com").unwrap().host,
            "whois.verisign-grs.com"
        );
    }

    #[test]
    fn test_suffix_lookup_exhausts_labels() {
        let directory = ServerDirectory::builder().build();
        assert!(directory.lookup_by_suffix("a.b.example.unknownintltld").is_none());
        assert!(directory.lookup_by_suffix("").is_none());
        assert!(directory.lookup_by_suffix("trailing.").is_none());
    }

    #[test]
    fn test_explicit_port_entry() {
        let directory = ServerDirectory::builder()
            .suffix("lab", entry("whois.lab.example:4343"))
            .build();
        let server = directory.lookup_by_suffix("host.lab").unwrap();
        assert_eq!(server, WhoisServer::new("whois.lab.example", 4343));
    }

    #[test]
    fn test_registrar_lookup_is_exact() {
        let directory = ServerDirectory::builtin();
        assert_eq!(
            directory.lookup_by_registrar_name("MarkMonitor Inc.").unwrap().host,
            "whois.markmonitor.com"
        );
        assert!(directory.lookup_by_registrar_name("markmonitor inc.").is_none());
    }
}
