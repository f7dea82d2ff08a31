// Console command parsing for the headless front end

use anyhow::{Result, bail};
use regex::Regex;

/// A single line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Type `text` into the input for parameter `name` (not committed yet)
    Edit { name: String, text: String },
    /// Press "Reconfigure"
    Reconfigure,
    /// Click button `index` (zero-based)
    Click(usize),
    /// Timer tick: decrement every button
    Tick,
    /// Print one tab, or all tabs
    Show(Option<String>),
    /// List parameters with committed values and defaults
    Params,
    /// Commit every declared default
    Reset,
    Help,
    Quit,
}

/// Parses console lines into [`Command`]s.
///
/// Patterns are compiled once at construction.
pub struct CommandParser {
    assign_pattern: Regex,
    set_pattern: Regex,
    click_pattern: Regex,
    show_pattern: Regex,
}

impl CommandParser {
    pub fn new() -> Self {
        Self {
            assign_pattern: Regex::new(r"^(\w+)\s*=\s*(.*)$").expect("Invalid assign regex"),
            set_pattern: Regex::new(r"^set\s+(\w+)\s+(.*)$").expect("Invalid set regex"),
            click_pattern: Regex::new(r"^click\s+(\d+)$").expect("Invalid click regex"),
            show_pattern: Regex::new(r"^show(?:\s+(.+))?$").expect("Invalid show regex"),
        }
    }

    /// Parse one line. Blank lines yield `Ok(None)`.
    pub fn parse(&self, line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let command = match line.to_ascii_lowercase().as_str() {
            "reconfigure" | "r" => Command::Reconfigure,
            "tick" | "t" => Command::Tick,
            "params" | "p" => Command::Params,
            "reset" => Command::Reset,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return self.parse_with_args(line).map(Some),
        };
        Ok(Some(command))
    }

    fn parse_with_args(&self, line: &str) -> Result<Command> {
        if let Some(caps) = self.click_pattern.captures(line) {
            let index = caps[1].parse::<usize>()?;
            return Ok(Command::Click(index));
        }

        if let Some(caps) = self.show_pattern.captures(line) {
            let tab = caps.get(1).map(|m| m.as_str().trim().to_string());
            return Ok(Command::Show(tab));
        }

        if let Some(caps) = self
            .set_pattern
            .captures(line)
            .or_else(|| self.assign_pattern.captures(line))
        {
            return Ok(Command::Edit {
                name: caps[1].to_string(),
                text: caps[2].to_string(),
            });
        }

        bail!("Unrecognized command: {line} (type 'help' for a list)")
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Help text printed by the console front end.
pub const HELP: &str = "\
Commands:
  <Name> = <value>   edit a configuration input (also: set <Name> <value>)
  reconfigure, r     commit all inputs
  reset              commit every default
  click <n>          click button n (zero-based)
  tick, t            decrement every button
  show [tab]         print one tab or all tabs
  params, p          list parameters
  help, ?            this text
  quit, q            save and exit";
