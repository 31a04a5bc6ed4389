/*!
Line loop: read commands from a reader (stdin in the binary), one per line,
and run each through `CommandParser::call_safe` so a bad line never ends
the session. Blank lines are skipped; EOF ends the loop.
*/

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use super::dispatch::CommandParser;
use crate::remote::RemoteRequests;
use crate::utils::Reporter;
use crate::utils::output::{Color, color};

pub const PROMPT: &str = "dsct> ";

/// Run every line from `input` through `parser`; returns the number of lines executed.
///
/// `prompt` is written to `out` before each read (pass `None` for piped input).
pub fn run_lines<R, P>(
    parser: &CommandParser<R, P>,
    mut input: impl BufRead,
    mut out: impl Write,
    prompt: Option<&str>,
) -> Result<usize>
where
    R: RemoteRequests,
    P: Reporter,
{
    let mut executed = 0;
    loop {
        if let Some(p) = prompt {
            write!(out, "{}", color(Color::Bold, p)).context("failed to write prompt")?;
            out.flush().context("failed to write prompt")?;
        }
        let mut line = String::new();
        let n = input
            .read_line(&mut line)
            .context("failed to read command line")?;
        if n == 0 {
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }
        parser.call_safe(line);
        executed += 1;
    }
    Ok(executed)
}
