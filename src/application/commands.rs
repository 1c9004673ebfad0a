//! Discrete command surface of the relay.
//!
//! Commands mutate session state or query the workspace; they never read
//! the free-text message flow. Parsing is transport-agnostic: the
//! messaging adapter hands over the raw line and gets back either a
//! command, a usage error, or nothing (plain text).

/// A parsed command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize (or re-greet) the user's session.
    Start,
    /// Show the help text.
    Help,
    /// Toggle AI routing on or off.
    ToggleAi,
    /// Switch to a named provider.
    SwitchProvider {
        /// User-supplied provider keyword, resolved at dispatch time.
        name: String,
    },
    /// Enter dummy mode.
    DummyMode,
    /// Reclassify the next message as a sentiment-analysis target.
    ArmSentiment,
    /// Reclassify the next message as the body of a note.
    ArmNote {
        /// Title the note will be created with.
        title: String,
    },
    /// List workspace collections.
    ListWorkspace,
    /// Search the workspace.
    SearchWorkspace {
        /// Free-text query.
        query: String,
    },
}

/// A command invoked without its required argument.
///
/// Recovered locally: no state changes, the user gets an instructive
/// message with an example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("usage: {usage}")]
pub struct UsageError {
    /// Usage line, e.g. `/note <title>`.
    pub usage: &'static str,
    /// A concrete example invocation.
    pub example: &'static str,
}

impl UsageError {
    const PROVIDER: UsageError = UsageError {
        usage: "/provider <name>",
        example: "/provider deepseek",
    };
    const NOTE: UsageError = UsageError {
        usage: "/note <title>",
        example: "/note Meeting minutes",
    };
    const SEARCH: UsageError = UsageError {
        usage: "/search <query>",
        example: "/search roadmap",
    };
}

impl Command {
    /// Parses a raw line.
    ///
    /// Returns `None` when the line is not a recognized command (plain
    /// text, or an unknown slash command the transport may ignore), and
    /// `Some(Err(_))` when a known command misses its required argument.
    pub fn parse(line: &str) -> Option<Result<Command, UsageError>> {
        let rest = line.trim().strip_prefix('/')?;
        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "ai" => Command::ToggleAi,
            "provider" => {
                if args.is_empty() {
                    return Some(Err(UsageError::PROVIDER));
                }
                Command::SwitchProvider {
                    name: args.to_string(),
                }
            }
            "dummy" => Command::DummyMode,
            "sentiment" => Command::ArmSentiment,
            "note" => {
                if args.is_empty() {
                    return Some(Err(UsageError::NOTE));
                }
                Command::ArmNote {
                    title: args.to_string(),
                }
            }
            "list" => Command::ListWorkspace,
            "search" => {
                if args.is_empty() {
                    return Some(Err(UsageError::SEARCH));
                }
                Command::SearchWorkspace {
                    query: args.to_string(),
                }
            }
            _ => return None,
        };

        Some(Ok(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(Command::parse("hello there"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn unknown_slash_commands_are_ignored() {
        assert_eq!(Command::parse("/frobnicate"), None);
    }

    #[test]
    fn no_arg_commands_parse() {
        assert_eq!(Command::parse("/start"), Some(Ok(Command::Start)));
        assert_eq!(Command::parse("/help"), Some(Ok(Command::Help)));
        assert_eq!(Command::parse("/ai"), Some(Ok(Command::ToggleAi)));
        assert_eq!(Command::parse("/dummy"), Some(Ok(Command::DummyMode)));
        assert_eq!(Command::parse("/sentiment"), Some(Ok(Command::ArmSentiment)));
        assert_eq!(Command::parse("/list"), Some(Ok(Command::ListWorkspace)));
    }

    #[test]
    fn note_takes_the_remaining_text_as_title() {
        assert_eq!(
            Command::parse("/note My Title"),
            Some(Ok(Command::ArmNote {
                title: "My Title".to_string()
            }))
        );
    }

    #[test]
    fn note_without_title_is_a_usage_error() {
        assert!(matches!(Command::parse("/note"), Some(Err(_))));
        assert!(matches!(Command::parse("/note   "), Some(Err(_))));
    }

    #[test]
    fn search_without_query_is_a_usage_error() {
        let err = match Command::parse("/search") {
            Some(Err(err)) => err,
            other => panic!("expected usage error, got {:?}", other),
        };
        assert_eq!(err.usage, "/search <query>");
        assert!(!err.example.is_empty());
    }

    #[test]
    fn provider_keeps_the_raw_keyword() {
        assert_eq!(
            Command::parse("/provider Eden"),
            Some(Ok(Command::SwitchProvider {
                name: "Eden".to_string()
            }))
        );
        assert!(matches!(Command::parse("/provider"), Some(Err(_))));
    }

    #[test]
    fn command_names_are_case_insensitive() {
        assert_eq!(Command::parse("/Start"), Some(Ok(Command::Start)));
        assert_eq!(Command::parse("/AI"), Some(Ok(Command::ToggleAi)));
    }
}
