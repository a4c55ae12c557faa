use std::future::Future;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::directory::ServerDirectory;
use crate::error::{Result, WhoisError};
use crate::options::{render_query, QueryOptions};
use crate::referral::ReferralExtractor;
use crate::servers::{ServerSelector, WhoisServer, DEFAULT_WHOIS_PORT};

const READ_CHUNK_SIZE: usize = 4096;

#[derive(Debug, Clone)]
pub struct QueryResult {
    /// Response of the last hop only.
    pub response: String,
    pub server_used: WhoisServer,
    /// Every server queried, in order.
    pub servers_queried: Vec<WhoisServer>,
}

impl QueryResult {
    pub fn new(response: String, server_used: WhoisServer, servers_queried: Vec<WhoisServer>) -> Self {
        Self {
            response,
            server_used,
            servers_queried,
        }
    }
}

pub struct WhoisQuery<'a> {
    directory: &'a ServerDirectory,
}

impl Default for WhoisQuery<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl WhoisQuery<'static> {
    pub fn new() -> Self {
        Self::with_directory(ServerDirectory::builtin())
    }
}

impl<'a> WhoisQuery<'a> {
    pub fn with_directory(directory: &'a ServerDirectory) -> Self {
        Self { directory }
    }

    /// One query/response exchange over a fresh connection.
    ///
    /// The server marks the end of its answer by closing the connection, so
    /// everything read until EOF is the response, even when that is nothing.
    /// `timeout` bounds the connect and each wait for inbound data.
    pub async fn query_direct(
        &self,
        server: &WhoisServer,
        target: &str,
        template: &str,
        timeout: Option<Duration>,
    ) -> Result<String> {
        let address = server.address();
        debug!(server = %address, "connecting");

        let mut stream = within(timeout, TcpStream::connect((server.host.as_str(), server.port)))
            .await?
            .map_err(|e| WhoisError::connection(&address, e))?;

        let query = render_query(template, target);
        debug!(server = %address, query = query.trim_end(), "sending query");
        within(timeout, stream.write_all(query.as_bytes()))
            .await?
            .map_err(|e| WhoisError::connection(&address, e))?;

        let mut response = Vec::new();
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        loop {
            let read = within(timeout, stream.read(&mut chunk))
                .await?
                .map_err(|e| WhoisError::connection(&address, e))?;
            if read == 0 {
                break;
            }
            response.extend_from_slice(&chunk[..read]);
        }
        drop(stream);

        debug!(server = %address, bytes = response.len(), "connection closed by server");
        Ok(String::from_utf8_lossy(&response).into_owned())
    }

    /// Query the server chosen for `target` and chase referrals until none is
    /// left, a server refers to itself, or `options.follow` runs out.
    pub async fn query(&self, target: &str, options: QueryOptions) -> Result<QueryResult> {
        let extractor = ReferralExtractor::new(self.directory);
        let mut options = options;
        let mut servers_queried = Vec::new();

        loop {
            let server = ServerSelector::select_server(target, &options, self.directory)?;
            let response = self
                .query_direct(&server, target, &options.query, options.effective_timeout())
                .await?;
            servers_queried.push(server.clone());

            if options.follow == 0 {
                debug!(server = %server, "follow budget exhausted");
                return Ok(QueryResult::new(response, server, servers_queried));
            }

            let Some(referral) = extractor.extract(&response) else {
                return Ok(QueryResult::new(response, server, servers_queried));
            };

            let Some(next) = Self::next_hop(&referral) else {
                return Ok(QueryResult::new(response, server, servers_queried));
            };

            if Self::is_self_referral(&referral, &next, &server, &options) {
                debug!(server = %server, "server refers to itself");
                return Ok(QueryResult::new(response, server, servers_queried));
            }

            info!(from = %server, to = %referral, "following referral");
            options = options.for_referral(&referral);
        }
    }

    /// The server a referral points at, or `None` when it cannot be parsed.
    fn next_hop(referral: &str) -> Option<WhoisServer> {
        match WhoisServer::parse(referral, DEFAULT_WHOIS_PORT) {
            Ok(next) if !next.host.is_empty() => Some(next),
            _ => {
                debug!(referral = referral, "ignoring unusable referral");
                None
            }
        }
    }

    fn is_self_referral(
        referral: &str,
        next: &WhoisServer,
        server: &WhoisServer,
        options: &QueryOptions,
    ) -> bool {
        options.server() == Some(referral) || next.same_endpoint(server)
    }
}

/// Look up `target` with the built-in directory and return the final response text.
pub async fn whois_lookup(target: &str, options: QueryOptions) -> Result<String> {
    let result = WhoisQuery::new().query(target, options).await?;
    Ok(result.response)
}

async fn within<F: Future>(timeout: Option<Duration>, future: F) -> Result<F::Output> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, future)
            .await
            .map_err(|_| WhoisError::Timeout),
        None => Ok(future.await),
    }
}
