//! User slash-command parser.
//!
//! Parses `/command arg1 arg2 ...` input lines into typed [`ParsedCommand`]
//! values that the event handler can act on.

/// A parsed user command. Each variant corresponds to a `/command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Draw,
    Reset,
    Digits { count: i64 },
    Manual { enabled: bool },
    Countdown(CountdownArg),
    Name { id: u64, name: String },
    Clear,
    Wipe,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownArg {
    Enabled(bool),
    Seconds(i64),
}

pub const HELP_LINES: &[(&str, &str)] = &[
    ("/draw", "Start a draw or reveal the next digit"),
    ("/reset", "Abandon the current draw"),
    ("/digits N", "Number of digits (1-5)"),
    ("/manual on|off", "Reveal one digit per trigger"),
    ("/countdown on|off|N", "Toggle the countdown or set its seconds (3-10)"),
    ("/name ID NAME", "Label a history entry (empty name clears it)"),
    ("/clear", "Clear the draw history"),
    ("/wipe", "Erase all stored settings and history"),
    ("/quit", "Exit"),
];

/// Parse a slash-command string into a [`ParsedCommand`].
///
/// Returns `None` if the input does not start with `/` or is not a recognized
/// command. Commands are case-insensitive.
pub fn parse_command(input: &str) -> Option<ParsedCommand> {
    let input = input.trim();
    let body = input.strip_prefix('/')?;

    let parts: Vec<&str> = body.splitn(3, ' ').collect();
    let cmd = parts.first()?.to_lowercase();

    match cmd.as_str() {
        "draw" | "d" | "go" => Some(ParsedCommand::Draw),
        "reset" => Some(ParsedCommand::Reset),
        "digits" => {
            let count = parts.get(1)?.trim().parse().ok()?;
            Some(ParsedCommand::Digits { count })
        }
        "manual" => {
            let enabled = parse_switch(parts.get(1)?)?;
            Some(ParsedCommand::Manual { enabled })
        }
        "countdown" | "cd" => {
            let arg = parts.get(1)?.trim();
            if let Ok(seconds) = arg.parse() {
                return Some(ParsedCommand::Countdown(CountdownArg::Seconds(seconds)));
            }
            let enabled = parse_switch(arg)?;
            Some(ParsedCommand::Countdown(CountdownArg::Enabled(enabled)))
        }
        "name" => {
            let id = parts.get(1)?.trim().parse().ok()?;
            let name = parts.get(2).map(|s| s.trim().to_string()).unwrap_or_default();
            Some(ParsedCommand::Name { id, name })
        }
        "clear" => Some(ParsedCommand::Clear),
        "wipe" => Some(ParsedCommand::Wipe),
        "help" | "h" | "?" => Some(ParsedCommand::Help),
        "quit" | "exit" | "q" => Some(ParsedCommand::Quit),
        _ => None,
    }
}

fn parse_switch(arg: &str) -> Option<bool> {
    match arg.trim().to_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Some(true),
        "off" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}
