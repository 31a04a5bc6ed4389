/*!
Command line interpreter.

Layout:
  src/cmd/
    mod.rs       (this file)
    names.rs     (Named trait + case-insensitive resolve)
    command.rs   (Command enum)
    grammar.rs   (static matching rules)
    dispatch.rs  (CommandParser: call / call_safe)
    help.rs      (help / help_for)
    repl.rs      (stdin line loop)

Conventions:
  - Everything returns `anyhow::Result`; failures are messages, not codes.
  - The parser never logs directly; outcomes go through an injected `Reporter`.
*/

pub mod command;
pub mod dispatch;
pub mod grammar;
pub mod help;
pub mod names;
pub mod repl;

pub use command::Command;
pub use dispatch::CommandParser;
pub use help::{help, help_for};
pub use repl::{PROMPT, run_lines};
