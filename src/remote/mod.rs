//! Remote side of the client.
//!
//! RemoteRequests  - the four operations the command parser drives
//! NumberType      - integer | decimal, argument of `generate`
//! parse_target    - "tcp://host:port" or "host:port" -> TargetSpec
//! RemoteClient    - TCP / JSON-lines implementation (client.rs)
//!
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::cmd::names::Named;

pub mod client;
pub mod protocol;

pub use client::RemoteClient;

/// Default port of the numeric-processing service.
pub const DEFAULT_PORT: u16 = 7878;

/// Operations exposed by the remote service.
///
/// Failures (network, file, server-side) are returned untouched; the command
/// parser only forwards them.
pub trait RemoteRequests {
    fn ping(&self) -> Result<()>;
    fn echo(&self, text: &str) -> Result<()>;
    fn generate(
        &self,
        path: &str,
        count: u64,
        number_type: NumberType,
        min: i64,
        max: i64,
    ) -> Result<()>;
    fn sort(&self, input_path: &str, output_path: &str) -> Result<()>;
}

impl<T: RemoteRequests + ?Sized> RemoteRequests for &T {
    fn ping(&self) -> Result<()> {
        (**self).ping()
    }
    fn echo(&self, text: &str) -> Result<()> {
        (**self).echo(text)
    }
    fn generate(
        &self,
        path: &str,
        count: u64,
        number_type: NumberType,
        min: i64,
        max: i64,
    ) -> Result<()> {
        (**self).generate(path, count, number_type, min, max)
    }
    fn sort(&self, input_path: &str, output_path: &str) -> Result<()> {
        (**self).sort(input_path, output_path)
    }
}

/// Kind of numbers the server should generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberType {
    Integer,
    Decimal,
}

impl Named for NumberType {
    const KIND: &'static str = "number type";

    fn variants() -> &'static [NumberType] {
        &[NumberType::Integer, NumberType::Decimal]
    }

    fn name(&self) -> &'static str {
        match self {
            NumberType::Integer => "integer",
            NumberType::Decimal => "decimal",
        }
    }
}

impl fmt::Display for NumberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed server address; keeps the user's spelling for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub original: String,
    pub host: String,
    pub port: u16,
}

impl TargetSpec {
    /// `host:port` form accepted by `TcpStream::connect`.
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tcp://{}", self.address())
    }
}

/// Parse a `--target` value.
///
/// Parsing Strategy:
/// 1. Reject blank input.
/// 2. Prefix `tcp://` when no scheme is given, then parse as URL.
/// 3. Only the `tcp` scheme is accepted; a host is required.
/// 4. A missing port falls back to `DEFAULT_PORT`.
///
/// Examples:
/// - "tcp://10.0.0.5:9000" -> 10.0.0.5, 9000
/// - "localhost:7878"      -> localhost, 7878
/// - "server"              -> server, 7878
pub fn parse_target(raw: &str) -> Result<TargetSpec> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("Target string is empty");
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("tcp://{trimmed}")
    };

    let url = Url::parse(&with_scheme)
        .map_err(|e| anyhow::anyhow!("Invalid target '{raw}': {e}"))?;
    if url.scheme() != "tcp" {
        bail!("Unsupported target scheme '{}' (expected tcp)", url.scheme());
    }
    let host = match url.host_str() {
        Some(h) if !h.is_empty() => h.trim_start_matches('[').trim_end_matches(']'),
        _ => bail!("Target '{raw}' has no host"),
    };
    if !(url.path().is_empty() || url.path() == "/") {
        bail!("Target '{raw}' must not contain a path");
    }

    Ok(TargetSpec {
        original: raw.to_string(),
        host: host.to_string(),
        port: url.port().unwrap_or(DEFAULT_PORT),
    })
}
