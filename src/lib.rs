pub mod cli;
pub mod directory;
pub mod error;
pub mod options;
pub mod query;
pub mod referral;
pub mod servers;

pub use cli::Cli;
pub use directory::{ServerDirectory, ServerDirectoryBuilder};
pub use error::WhoisError;
pub use options::QueryOptions;
pub use query::{whois_lookup, QueryResult, WhoisQuery};
pub use referral::ReferralExtractor;
pub use servers::{ServerSelector, WhoisServer};
