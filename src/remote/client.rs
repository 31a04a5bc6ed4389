/*!
`client.rs`

TCP implementation of `RemoteRequests`.

Each operation:
  - opens one connection to the target
  - writes one JSON request line
  - reads one JSON response line
  - closes the connection

The command parser is synchronous, so the client owns a small
current-thread Tokio runtime and blocks on each exchange. Every exchange is
bounded by the configured timeout.

File handling:
  - generate: numbers returned by the server are written one per line
  - sort:     numbers are read one per non-blank line (integer or decimal),
              the sorted result is written one per line
*/

use anyhow::{Context, Result, anyhow, bail};
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use super::protocol::{Request, Response, numbers_from};
use super::{NumberType, RemoteRequests, TargetSpec};
use crate::{log_debug, log_info, log_trace};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct RemoteClient {
    target: TargetSpec,
    timeout: Duration,
    rt: tokio::runtime::Runtime,
}

impl RemoteClient {
    pub fn new(target: TargetSpec, timeout: Duration) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to create Tokio runtime")?;
        Ok(Self {
            target,
            timeout,
            rt,
        })
    }

    pub fn target(&self) -> &TargetSpec {
        &self.target
    }

    /// Send one request and return the `result` payload of an ok response.
    fn request(&self, req: &Request) -> Result<serde_json::Value> {
        let addr = self.target.address();
        log_trace!("-> {} {}", addr, req.op());

        let outcome = self
            .rt
            .block_on(async { tokio::time::timeout(self.timeout, roundtrip(&addr, req)).await });
        let response = match outcome {
            Ok(r) => r?,
            Err(_) => bail!(
                "{} request to {} timed out after {} ms",
                req.op(),
                self.target,
                self.timeout.as_millis()
            ),
        };

        log_trace!("<- {} {:?}", addr, response);
        response.into_result()
    }
}

async fn roundtrip(addr: &str, req: &Request) -> Result<Response> {
    let mut stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("Failed to connect to {addr}"))?;

    let line = req.to_line()?;
    stream
        .write_all(line.as_bytes())
        .await
        .context("Failed to send request")?;
    stream.flush().await.context("Failed to send request")?;

    let mut reader = BufReader::new(stream);
    let mut buf = String::new();
    let n = reader
        .read_line(&mut buf)
        .await
        .context("Failed to read response")?;
    if n == 0 {
        bail!("server closed the connection without a response");
    }
    Response::from_line(&buf)
}

impl RemoteRequests for RemoteClient {
    fn ping(&self) -> Result<()> {
        let started = Instant::now();
        self.request(&Request::Ping)?;
        log_info!(
            "Ping to {} succeeded ({} ms)",
            self.target,
            started.elapsed().as_millis()
        );
        Ok(())
    }

    fn echo(&self, text: &str) -> Result<()> {
        let result = self.request(&Request::Echo {
            text: text.to_string(),
        })?;
        let echoed = match result {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        log_info!("Server echoed: {echoed}");
        Ok(())
    }

    fn generate(
        &self,
        path: &str,
        count: u64,
        number_type: NumberType,
        min: i64,
        max: i64,
    ) -> Result<()> {
        if min > max {
            bail!("min ({min}) must not be greater than max ({max})");
        }
        let result = self.request(&Request::Generate {
            count,
            number_type,
            min,
            max,
        })?;
        let numbers = numbers_from(result)?;
        if numbers.len() as u64 != count {
            log_debug!(
                "server returned {} numbers, {} requested",
                numbers.len(),
                count
            );
        }
        write_numbers(path, &numbers)?;
        log_info!(
            "Saved {} {} numbers to {}",
            numbers.len(),
            number_type,
            path
        );
        Ok(())
    }

    fn sort(&self, input_path: &str, output_path: &str) -> Result<()> {
        let numbers = read_numbers(input_path)?;
        let count = numbers.len();
        let result = self.request(&Request::Sort { numbers })?;
        let sorted = numbers_from(result)?;
        write_numbers(output_path, &sorted)?;
        log_info!(
            "Sorted {} numbers from {} into {}",
            count,
            input_path,
            output_path
        );
        Ok(())
    }
}

/* -------------------------------------------------------------------------- */
/* Number files                                                               */
/* -------------------------------------------------------------------------- */

fn read_numbers(path: &str) -> Result<Vec<serde_json::Number>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file: {path}"))?;
    raw.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| {
            parse_number(l.trim())
                .ok_or_else(|| anyhow!("{path}:{}: '{}' is not a number", i + 1, l.trim()))
        })
        .collect()
}

fn parse_number(raw: &str) -> Option<serde_json::Number> {
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n.into());
    }
    raw.parse::<f64>().ok().and_then(serde_json::Number::from_f64)
}

fn write_numbers(path: &str, numbers: &[serde_json::Number]) -> Result<()> {
    let mut out = String::with_capacity(numbers.len() * 8);
    for n in numbers {
        out.push_str(&n.to_string());
        out.push('\n');
    }
    std::fs::write(path, out).with_context(|| format!("failed to write output file: {path}"))
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                      */
/* -------------------------------------------------------------------------- */
