//! `:` commands.
//!
//! | Command              | Effect                                      |
//! |----------------------|---------------------------------------------|
//! | `q`, `quit`          | exit                                        |
//! | `help`               | toggle the help popup                       |
//! | `theme <name>`       | switch to `default` or `gruvbox`            |
//! | `clear`              | empty the active tab's query                |
//! | `collapse`           | close every node of the active outline      |
//! | `counts`             | toggle the `(n)` suffixes                   |
//! | `reload`, `e`        | re-read the data file                       |

use std::str::FromStr;

use crate::{app::AppState, theme::Theme};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Theme(String),
    Clear,
    Collapse,
    Counts,
    Reload,
}

/// Why a command line was rejected. Shown in the command bar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("nothing to run")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        let cmd = match name.trim_end_matches('!') {
            "q" | "quit" => Self::Quit,
            "help" | "h" => Self::Help,
            "clear" => Self::Clear,
            "collapse" => Self::Collapse,
            "counts" => Self::Counts,
            "reload" | "e" => Self::Reload,
            "theme" => match args.as_slice() {
                [theme] => return Ok(Self::Theme((*theme).to_string())),
                _ => return Err(CommandError::Usage("theme <default|gruvbox>")),
            },
            _ => return Err(CommandError::Unknown(name.to_string())),
        };
        Ok(cmd)
    }
}

impl Command {
    /// Apply the command to the application.
    pub fn run(self, s: &mut AppState) {
        match self {
            Self::Quit => s.quit = true,
            Self::Help => s.show_help = !s.show_help,
            Self::Theme(name) => s.theme = Theme::by_name(&name),
            Self::Clear => {
                if let Some(tab) = s.tabs.get_mut(s.active_tab) {
                    tab.clear_query();
                }
            }
            Self::Collapse => {
                if let Some(tab) = s.tabs.get_mut(s.active_tab) {
                    tab.collapse_all();
                }
            }
            Self::Counts => s.config.ui.show_counts ^= true,
            Self::Reload => s.reload(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, CommandError> {
        line.parse()
    }

    #[test]
    fn quit_spellings() {
        for line in ["q", "quit", "q!", "  quit  "] {
            assert_eq!(parse(line), Ok(Command::Quit), "{line:?}");
        }
    }

    #[test]
    fn theme_takes_exactly_one_name() {
        assert_eq!(parse("theme gruvbox"), Ok(Command::Theme("gruvbox".into())));
        assert!(matches!(parse("theme"), Err(CommandError::Usage(_))));
        assert!(matches!(parse("theme a b"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn outline_commands() {
        assert_eq!(parse("clear"), Ok(Command::Clear));
        assert_eq!(parse("collapse"), Ok(Command::Collapse));
        assert_eq!(parse("counts"), Ok(Command::Counts));
        assert_eq!(parse("reload"), Ok(Command::Reload));
        assert_eq!(parse("e!"), Ok(Command::Reload));
    }

    #[test]
    fn blank_line_is_empty() {
        assert_eq!(parse(""), Err(CommandError::Empty));
        assert_eq!(parse("   "), Err(CommandError::Empty));
    }

    #[test]
    fn unknown_command_is_named_in_the_message() {
        let err = parse("frobnicate").unwrap_err();
        assert_eq!(err.to_string(), "unknown command: frobnicate");
    }
}
