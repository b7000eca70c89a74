//! Chat command parsing.

pub const USAGE: &str = "Unrecognized command, try '!leaguewatch <summonername>'";

pub const HELP: &str = "lolwatch reports on League of Legends games as they finish
Commands:
!leaguewatch <summonername> - Monitor an account and report each game it finishes
!help - Show this message";

/// A recognized chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// `!leaguewatch <summonername>`
    Watch { summoner_name: &'a str },
    /// `!leaguewatch` with no name.
    Usage,
    /// `!help`
    Help,
}

/// Parse a chat message. Returns `None` for anything that is not a command.
///
/// Summoner names may contain spaces, so everything after the command word
/// is the name.
pub fn parse(content: &str) -> Option<Command<'_>> {
    let content = content.trim();
    let (word, rest) = match content.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (content, ""),
    };

    match word {
        "!leaguewatch" if rest.is_empty() => Some(Command::Usage),
        "!leaguewatch" => Some(Command::Watch {
            summoner_name: rest,
        }),
        "!help" => Some(Command::Help),
        _ => None,
    }
}
