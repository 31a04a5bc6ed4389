//! Help text for the command grammar.

use super::command::Command;
use super::names::Named;

/// Help for every command, in declaration order.
pub fn help() -> String {
    Command::variants().iter().map(|c| help_for(*c)).collect()
}

/// Banner, one-sentence purpose and usage line for a single command.
pub fn help_for(command: Command) -> String {
    let (about, usage) = match command {
        Command::Ping => (
            "Sends a blank message to the server to verify the connection.",
            "ping",
        ),
        Command::Echo => (
            "Sends the selected text to the server and returns it.",
            "echo <text>",
        ),
        Command::Generate => (
            "Sends a request to the server to generate numbers (integers or decimals) and saves the generated numbers to a file.",
            r#"generate "<path>" <count> <integer|decimal> <min> <max>"#,
        ),
        Command::Process => (
            "Sends the numbers from the input file to the server to be sorted and saves the sorted numbers to the output file.",
            r#"process "<input path>" "<output path>""#,
        ),
        Command::Help => (
            "Print out helpful message on how to use the program.",
            "help [command]",
        ),
    };
    format!(
        "\n----------> {} <----------\n{about}\nUsage: {usage}\n",
        command.banner()
    )
}
