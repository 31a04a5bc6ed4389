/*!
`dispatch.rs`

Turns one line of user text into exactly one remote operation (or help text).

Flow:
  line -> command word (grammar::command_word)
       -> Command (names::resolve)
       -> full rule for that command (grammar::RULES)
       -> typed arguments
       -> RemoteRequests call / help text via Reporter

Errors are plain `anyhow` messages; nothing is sent to the server before the
line has been fully validated.
*/

use anyhow::{Context, Result, anyhow, bail};
use std::str::FromStr;

use super::command::Command;
use super::grammar::{RULES, command_word};
use super::help::{help, help_for};
use super::names::resolve;
use crate::remote::{NumberType, RemoteRequests};
use crate::utils::Reporter;

pub struct CommandParser<R, P> {
    remote: R,
    reporter: P,
}

impl<R: RemoteRequests, P: Reporter> CommandParser<R, P> {
    pub fn new(remote: R, reporter: P) -> Self {
        Self { remote, reporter }
    }

    /// Run `line`, reporting any failure instead of returning it.
    pub fn call_safe(&self, line: &str) {
        if let Err(e) = self.call(line) {
            self.reporter.error(&format!("{e:#}"));
        }
    }

    /// Validate `line` and invoke the matching remote operation.
    pub fn call(&self, line: &str) -> Result<()> {
        let word = command_word(line).ok_or_else(|| anyhow!("Unknown command pattern"))?;
        let command: Command = resolve(word)?;

        match command {
            Command::Ping => {
                if !RULES.ping.is_match(line) {
                    bail!("No additional characters are allowed in PING command");
                }
                self.dispatched(command);
                self.remote.ping()
            }
            Command::Echo => {
                let Some(caps) = RULES.echo.captures(line) else {
                    bail!("No text to send to server");
                };
                self.dispatched(command);
                self.remote.echo(&caps[1])
            }
            Command::Generate => {
                let Some(caps) = RULES.generate.captures(line) else {
                    bail!(
                        "Incorrect GENERATE command format. Use 'help generate' to get instructions."
                    );
                };
                let count: u64 = number(&caps[2], "count")?;
                let number_type: NumberType = resolve(&caps[3])?;
                let min: i64 = number(&caps[4], "min")?;
                let max: i64 = number(&caps[5], "max")?;
                self.dispatched(command);
                self.remote.generate(&caps[1], count, number_type, min, max)
            }
            Command::Process => {
                let Some(caps) = RULES.process.captures(line) else {
                    bail!(
                        "Incorrect PROCESS command format. Use 'help process' to get instructions."
                    );
                };
                self.dispatched(command);
                self.remote.sort(&caps[1], &caps[2])
            }
            Command::Help => {
                let text = if RULES.plain_help.is_match(line) {
                    help()
                } else {
                    let Some(caps) = RULES.help.captures(line) else {
                        bail!("Incorrect HELP command format");
                    };
                    help_for(resolve(&caps[1])?)
                };
                self.dispatched(command);
                self.reporter.info(&format!("Executing help command.{text}"));
                Ok(())
            }
        }
    }

    fn dispatched(&self, command: Command) {
        self.reporter.debug(&format!("dispatching '{command}'"));
    }
}

fn number<T>(raw: &str, field: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>().with_context(|| format!("Invalid {field} '{raw}'"))
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                      */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Ping,
        Echo(String),
        Generate(String, u64, NumberType, i64, i64),
        Sort(String, String),
    }

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<Call>>,
        fail_with: Option<&'static str>,
    }

    impl Recorder {
        fn push(&self, call: Call) -> Result<()> {
            self.calls.borrow_mut().push(call);
            match self.fail_with {
                Some(msg) => bail!(msg),
                None => Ok(()),
            }
        }
    }

    impl RemoteRequests for Recorder {
        fn ping(&self) -> Result<()> {
            self.push(Call::Ping)
        }
        fn echo(&self, text: &str) -> Result<()> {
            self.push(Call::Echo(text.into()))
        }
        fn generate(
            &self,
            path: &str,
            count: u64,
            number_type: NumberType,
            min: i64,
            max: i64,
        ) -> Result<()> {
            self.push(Call::Generate(path.into(), count, number_type, min, max))
        }
        fn sort(&self, input_path: &str, output_path: &str) -> Result<()> {
            self.push(Call::Sort(input_path.into(), output_path.into()))
        }
    }

    #[derive(Default)]
    struct Sink {
        info: RefCell<Vec<String>>,
        error: RefCell<Vec<String>>,
        debug: RefCell<Vec<String>>,
    }

    impl Reporter for &Sink {
        fn info(&self, msg: &str) {
            self.info.borrow_mut().push(msg.to_string());
        }
        fn error(&self, msg: &str) {
            self.error.borrow_mut().push(msg.to_string());
        }
        fn debug(&self, msg: &str) {
            self.debug.borrow_mut().push(msg.to_string());
        }
    }

    fn run(line: &str) -> (Result<()>, Vec<Call>, Sink) {
        let remote = Recorder::default();
        let sink = Sink::default();
        let result = CommandParser::new(&remote, &sink).call(line);
        let calls = remote.calls.borrow().clone();
        (result, calls, sink)
    }

    fn single_call(line: &str) -> Call {
        let (result, calls, _) = run(line);
        result.unwrap_or_else(|e| panic!("'{line}' failed: {e:#}"));
        assert_eq!(calls.len(), 1, "'{line}' should make exactly one call");
        calls.into_iter().next().unwrap()
    }

    fn failure(line: &str) -> String {
        let (result, calls, _) = run(line);
        let err = result.expect_err(line);
        assert!(calls.is_empty(), "'{line}' must not reach the server");
        format!("{err:#}")
    }

    #[test]
    fn ping_any_case() {
        for line in ["ping", "PING", "PiNg", "ping   "] {
            assert_eq!(single_call(line), Call::Ping);
        }
    }

    #[test]
    fn echo_preserves_text() {
        assert_eq!(
            single_call("echo Hello World"),
            Call::Echo("Hello World".into())
        );
        assert_eq!(
            single_call("ECHO   MiXeD  case \"and\" 123 "),
            Call::Echo("MiXeD  case \"and\" 123 ".into())
        );
    }

    #[test]
    fn generate_converts_arguments() {
        assert_eq!(
            single_call(r#"generate "out.txt" 10 integer -5 5"#),
            Call::Generate("out.txt".into(), 10, NumberType::Integer, -5, 5)
        );
        assert_eq!(
            single_call(r#"GENERATE "My Dir/n.txt" 0 DECIMAL 1 -1"#),
            Call::Generate("My Dir/n.txt".into(), 0, NumberType::Decimal, 1, -1)
        );
    }

    #[test]
    fn process_maps_to_sort() {
        assert_eq!(
            single_call(r#"process "in.txt" "Out.txt""#),
            Call::Sort("in.txt".into(), "Out.txt".into())
        );
    }

    #[test]
    fn unknown_leading_token() {
        assert_eq!(failure(""), "Unknown command pattern");
        assert_eq!(failure("   "), "Unknown command pattern");
        assert_eq!(failure("123 ping"), "Unknown command pattern");
        assert_eq!(failure(" ping"), "Unknown command pattern");
        assert_eq!(failure("sort a b"), "Unknown command 'sort'");
        assert_eq!(failure("pingx"), "Unknown command 'pingx'");
    }

    #[test]
    fn malformed_arguments() {
        assert_eq!(
            failure("ping extra"),
            "No additional characters are allowed in PING command"
        );
        assert_eq!(failure("ping2"), "No additional characters are allowed in PING command");
        assert_eq!(failure("echo"), "No text to send to server");
        assert!(failure(r#"generate "x" abc integer 1 2"#).contains("Use 'help generate'"));
        assert!(failure(r#"generate "x" 1 integer 1"#).contains("Use 'help generate'"));
        assert!(failure(r#"process "a.txt""#).contains("Use 'help process'"));
        assert_eq!(failure("help ping echo"), "Incorrect HELP command format");
    }

    #[test]
    fn lines_outside_the_strict_rules_never_reach_the_server() {
        let generate_help = "Incorrect GENERATE command format. Use 'help generate' to get instructions.";
        let process_help = "Incorrect PROCESS command format. Use 'help process' to get instructions.";
        assert_eq!(failure(r#"generate "x" 1 integer 1 2 "#), generate_help);
        assert_eq!(failure("generate \"x\" \u{663} integer 1 2"), generate_help);
        assert_eq!(failure(r#"process "a"  "b""#), process_help);
        assert_eq!(failure("process \"a\"\t\t\"b\"   "), process_help);
        assert_eq!(
            failure("ping\u{3000}"),
            "No additional characters are allowed in PING command"
        );
    }

    #[test]
    fn quoted_paths_keep_inner_quotes() {
        assert_eq!(
            single_call(r#"process "a "quoted" name" "out.txt""#),
            Call::Sort(r#"a "quoted" name"#.into(), "out.txt".into())
        );
    }

    #[test]
    fn dispatch_trace_only_for_valid_lines() {
        let (result, _, sink) = run("ping extra");
        assert!(result.is_err());
        assert!(sink.debug.borrow().is_empty());

        let (result, _, sink) = run(r#"generate "x" 1 float 1 2"#);
        assert!(result.is_err());
        assert!(sink.debug.borrow().is_empty());

        let (result, _, sink) = run("PING");
        result.unwrap();
        assert_eq!(*sink.debug.borrow(), vec!["dispatching 'ping'".to_string()]);
    }

    #[test]
    fn unknown_nested_names() {
        assert_eq!(
            failure(r#"generate "x" 1 float 1 2"#),
            "Unknown number type 'float'"
        );
        assert_eq!(failure("help sort"), "Unknown command 'sort'");
    }

    #[test]
    fn numeric_overflow_is_a_parse_failure() {
        let msg = failure(r#"generate "x" 99999999999999999999 integer 1 2"#);
        assert!(msg.starts_with("Invalid count '99999999999999999999'"), "{msg}");
        let msg = failure(r#"generate "x" 1 integer -99999999999999999999 2"#);
        assert!(msg.starts_with("Invalid min"), "{msg}");
    }

    #[test]
    fn help_is_reported_not_sent() {
        let (result, calls, sink) = run("help");
        result.unwrap();
        assert!(calls.is_empty());
        let info = sink.info.borrow();
        assert_eq!(info.len(), 1);
        assert_eq!(info[0], format!("Executing help command.{}", help()));
    }

    #[test]
    fn help_topic_any_case() {
        let (result, _, sink) = run("HELP Generate");
        result.unwrap();
        assert_eq!(
            sink.info.borrow()[0],
            format!("Executing help command.{}", help_for(Command::Generate))
        );
    }

    #[test]
    fn remote_failures_propagate_from_call() {
        let remote = Recorder {
            fail_with: Some("connection refused"),
            ..Default::default()
        };
        let sink = Sink::default();
        let err = CommandParser::new(&remote, &sink).call("ping").unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(remote.calls.borrow().len(), 1);
    }

    #[test]
    fn call_safe_reports_instead_of_failing() {
        let remote = Recorder {
            fail_with: Some("connection refused"),
            ..Default::default()
        };
        let sink = Sink::default();
        let parser = CommandParser::new(&remote, &sink);
        for line in ["", "   ", "\t", "nope", "ping extra", "ping", "echo \u{1F600}"] {
            parser.call_safe(line);
        }
        let errors = sink.error.borrow();
        assert_eq!(errors.len(), 7);
        assert_eq!(errors[0], "Unknown command pattern");
        assert_eq!(errors[5], "connection refused");
    }

    #[test]
    fn call_safe_success_reports_nothing() {
        let remote = Recorder::default();
        let sink = Sink::default();
        CommandParser::new(&remote, &sink).call_safe("echo hi");
        assert!(sink.error.borrow().is_empty());
        assert_eq!(*remote.calls.borrow(), vec![Call::Echo("hi".into())]);
    }
}
