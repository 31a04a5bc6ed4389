/*!
Matching rules for command lines.

Two stages:
  1. `command_word` - loose; only finds which command the line is for.
  2. `CommandRules::*` - strict; the whole line must fit the command's shape.

Keeping them apart lets the parser report "unknown command" separately from
"known command, bad arguments".
*/

use regex::Regex;
use std::sync::LazyLock;

/// Compiled once, shared read-only by every parser.
pub static RULES: LazyLock<CommandRules> = LazyLock::new(CommandRules::new);

pub struct CommandRules {
    /// Leading run of ASCII letters.
    pub command: Regex,
    pub ping: Regex,
    /// 1: free text (verbatim)
    pub echo: Regex,
    /// 1: path, 2: count, 3: number type, 4: min, 5: max
    pub generate: Regex,
    /// 1: input path, 2: output path
    pub process: Regex,
    pub plain_help: Regex,
    /// 1: command name
    pub help: Regex,
}

impl CommandRules {
    fn new() -> Self {
        // Patterns are constants; a failure here is a programmer error.
        // `-u` keeps `\s`, `\d` and case folding ASCII-only; free text opts back
        // into Unicode with `(?u:.)`.
        Self {
            command: Regex::new(r"^([A-Za-z]+)").expect("static regex must compile"),
            ping: Regex::new(r"(?i-u)^ping\s*$").expect("static regex must compile"),
            echo: Regex::new(r"(?i-u)^echo\s+((?u:.*))").expect("static regex must compile"),
            generate: Regex::new(
                r#"(?i-u)^generate\s+"((?u:.+))"\s+(\d+)\s+([a-z]+)\s+(-?\d+)\s+(-?\d+)$"#,
            )
            .expect("static regex must compile"),
            process: Regex::new(r#"(?i-u)^process\s+"((?u:.+))"\s"((?u:.+))"$"#)
                .expect("static regex must compile"),
            plain_help: Regex::new(r"(?i-u)^help\s*$").expect("static regex must compile"),
            help: Regex::new(r"(?i-u)^help\s+([a-z]+)\s*$").expect("static regex must compile"),
        }
    }
}

/// Stage one: the command word at the very start of `line`, if any.
pub fn command_word(line: &str) -> Option<&str> {
    RULES
        .command
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
