/*!
Command enum for the interactive grammar.

Variants (declaration order is also help order):
  ping / echo / generate / process / help

Helpers:
  - Named impl (variants / name) for case-insensitive lookup
  - banner() for help headers
*/

use std::fmt;

use super::names::Named;

/// Enumeration of the commands a line can start with.
#[derive(clap::ValueEnum, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Command {
    /// Check the connection to the server
    Ping,
    /// Send text and get it back
    Echo,
    /// Ask the server for random numbers and save them to a file
    Generate,
    /// Sort the numbers in a file on the server
    Process,
    /// Describe the commands
    Help,
}

impl Command {
    /// Uppercase form used in help banners.
    pub fn banner(&self) -> &'static str {
        match self {
            Command::Ping => "PING",
            Command::Echo => "ECHO",
            Command::Generate => "GENERATE",
            Command::Process => "PROCESS",
            Command::Help => "HELP",
        }
    }
}

impl Named for Command {
    const KIND: &'static str = "command";

    fn variants() -> &'static [Command] {
        &[
            Command::Ping,
            Command::Echo,
            Command::Generate,
            Command::Process,
            Command::Help,
        ]
    }

    fn name(&self) -> &'static str {
        match self {
            Command::Ping => "ping",
            Command::Echo => "echo",
            Command::Generate => "generate",
            Command::Process => "process",
            Command::Help => "help",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/* --------------------------------- Tests ---------------------------------- */
