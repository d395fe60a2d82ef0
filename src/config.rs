//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::error::Error;

/// newsdesk: a server-rendered news site
#[derive(Parser, Debug, Clone)]
#[command(name = "newsdesk")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "NEWSDESK_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// JSON file of `{"title", "body"}` objects loaded at startup
    #[arg(long, env = "NEWSDESK_SEED")]
    pub seed: Option<PathBuf>,

    /// Accept form posts without a CSRF token
    #[arg(long, env = "NEWSDESK_NO_CSRF")]
    pub no_csrf: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "NEWSDESK_LOG", default_value = "info")]
    pub log: String,
}

/// One entry of the seed file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedItem {
    pub title: String,
    pub body: String,
}

/// Reads the seed file at `path`.
pub fn load_seed(path: &Path) -> Result<Vec<SeedItem>, Error> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|source| Error::SeedFormat {
        path: path.to_owned(),
        source,
    })
}
