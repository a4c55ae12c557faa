use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

use whois_referral::{Cli, WhoisQuery};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    init_logging(args.verbose);

    if !args.use_color() {
        colored::control::set_override(false);
    }

    if args.verbose {
        println!("{}: {}", "Query".bright_green(), args.target.bright_white());
    }

    let query_handler = WhoisQuery::new();
    let result = match query_handler
        .query(&args.target, args.query_options())
        .await
        .with_context(|| format!("lookup of '{}' failed", args.target))
    {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{}: {:#}", "Query failed".bright_red(), err);
            std::process::exit(1);
        }
    };

    if args.verbose {
        let chain: Vec<String> = result.servers_queried.iter().map(|s| s.to_string()).collect();
        println!("{}: {}", "Servers queried".bright_cyan(), chain.join(" -> ").yellow());
        println!("{}: {}", "Final server used".bright_cyan(), result.server_used.to_string().yellow());
    }

    if result.response.trim().is_empty() {
        eprintln!("{}", "Empty response received. Please check if your query is correct.".bright_red());
        std::process::exit(1);
    }

    println!("{}", result.response);
    Ok(())
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
