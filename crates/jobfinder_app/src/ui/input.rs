use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  open <path>   choose a resume (PDF, max 5MB)
  analyze       send the chosen resume for analysis
  copy          copy the cover letter to the clipboard
  show          print the current view
  help          show this list
  quit          leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(PathBuf),
    Analyze,
    Copy,
    Show,
    Help,
    Quit,
    Unknown(String),
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "open" | "o" if !rest.is_empty() => Command::Open(PathBuf::from(unquote(rest))),
        "analyze" | "a" => Command::Analyze,
        "copy" | "c" => Command::Copy,
        "show" | "s" => Command::Show,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    };
    Some(command)
}

fn unquote(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = raw.strip_prefix(quote).and_then(|r| r.strip_suffix(quote)) {
            return inner;
        }
    }
    raw
}
