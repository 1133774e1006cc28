//! Parsing of REPL input lines. Row numbers are 1-based on screen.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    List,
    Set { index: usize, text: String },
    Add(Option<String>),
    Remove { index: usize },
    /// Collect the following lines and paste them starting at `index`.
    Paste { index: usize },
    Submit,
    Copy,
    Export,
    Ping,
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
Commands:
  list              show the URL rows
  set N URL         replace row N
  add [URL]         add a row (optionally filled)
  remove N          remove row N
  paste N           paste lines into rows from N on; finish with an empty line
  submit            validate rows and extract modules
  copy              print the extracted modules as JSON
  export            write the modules to extracted_modules.json
  ping              check the extraction service
  help              show this help
  quit              leave";

pub fn parse_command(line: &str) -> Result<ReplCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => Ok(ReplCommand::List),
        "set" => {
            let (number, text) = rest
                .split_once(char::is_whitespace)
                .map(|(n, t)| (n, t.trim()))
                .unwrap_or((rest, ""));
            Ok(ReplCommand::Set {
                index: parse_row(number)?,
                text: text.to_string(),
            })
        }
        "add" => Ok(ReplCommand::Add(
            Some(rest.to_string()).filter(|text| !text.is_empty()),
        )),
        "remove" | "rm" => Ok(ReplCommand::Remove {
            index: parse_row(rest)?,
        }),
        "paste" => Ok(ReplCommand::Paste {
            index: parse_row(rest)?,
        }),
        "submit" | "extract" => Ok(ReplCommand::Submit),
        "copy" => Ok(ReplCommand::Copy),
        "export" => Ok(ReplCommand::Export),
        "ping" => Ok(ReplCommand::Ping),
        "help" | "?" => Ok(ReplCommand::Help),
        "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
        other => Err(format!("Unknown command '{other}'. Type 'help' for commands.")),
    }
}

fn parse_row(text: &str) -> Result<usize, String> {
    match text.trim().parse::<usize>() {
        Ok(0) => Err("Row numbers start at 1".to_string()),
        Ok(number) => Ok(number - 1),
        Err(_) => Err(format!("Expected a row number, got '{}'", text.trim())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_keeps_url_text_and_converts_row_number() {
        assert_eq!(
            parse_command("set 2  https://docs.example.com/a b "),
            Ok(ReplCommand::Set {
                index: 1,
                text: "https://docs.example.com/a b".to_string(),
            })
        );
    }

    #[test]
    fn set_without_text_clears_row() {
        assert_eq!(
            parse_command("set 1"),
            Ok(ReplCommand::Set {
                index: 0,
                text: String::new(),
            })
        );
    }

    #[test]
    fn add_with_and_without_url() {
        assert_eq!(parse_command("add"), Ok(ReplCommand::Add(None)));
        assert_eq!(
            parse_command("ADD https://a.com"),
            Ok(ReplCommand::Add(Some("https://a.com".to_string())))
        );
    }

    #[test]
    fn row_numbers_are_validated() {
        assert!(parse_command("remove 0").is_err());
        assert!(parse_command("remove x").is_err());
        assert_eq!(
            parse_command("rm 3"),
            Ok(ReplCommand::Remove { index: 2 })
        );
    }

    #[test]
    fn unknown_command_is_reported() {
        let err = parse_command("frobnicate").unwrap_err();
        assert!(err.contains("frobnicate"));
    }
}
