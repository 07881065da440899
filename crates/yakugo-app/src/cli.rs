use clap::{Parser, Subcommand};
use yakugo_types::WordPos;

#[derive(Parser, Debug)]
#[command(name = "yakugo")]
#[command(about = "English/Japanese dictionary lookup with curated translations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Look up every translation of a word
    Lookup {
        text: String,

        /// Only the translation for this part of speech (code or name, e.g. 6 or noun)
        #[arg(long, value_parser = parse_pos)]
        pos: Option<WordPos>,
    },

    /// Inspect and edit custom translations
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum AdminCommand {
    /// Custom and cached translations starting with a letter
    Letter { letter: String },

    /// Custom and cached translations of a word
    Find {
        text: String,

        #[arg(long, value_parser = parse_pos)]
        pos: Option<WordPos>,
    },

    /// Add a custom translation
    Add {
        text: String,
        #[arg(value_parser = parse_pos)]
        pos: WordPos,
        translated: String,
    },

    /// Change a custom translation, creating it if missing
    Update {
        text: String,
        #[arg(value_parser = parse_pos)]
        pos: WordPos,
        translated: String,
    },

    /// Delete a custom translation
    Remove {
        text: String,
        #[arg(value_parser = parse_pos)]
        pos: WordPos,
    },
}

fn parse_pos(s: &str) -> Result<WordPos, String> {
    if let Ok(code) = s.parse::<i32>() {
        return WordPos::try_from(code).map_err(|e| e.to_string());
    }

    WordPos::ALL
        .into_iter()
        .find(|pos| pos.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown part of speech: {s}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_with_named_pos() {
        let cli = Cli::try_parse_from(["yakugo", "lookup", "book", "--pos", "noun"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Lookup {
                text: "book".to_string(),
                pos: Some(WordPos::Noun),
            }
        );
    }

    #[test]
    fn admin_add_with_code() {
        let cli = Cli::try_parse_from(["yakugo", "admin", "add", "book", "9", "予約する"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Admin {
                command: AdminCommand::Add {
                    text: "book".to_string(),
                    pos: WordPos::Verb,
                    translated: "予約する".to_string(),
                },
            }
        );
    }

    #[test]
    fn unknown_pos_is_rejected() {
        assert!(Cli::try_parse_from(["yakugo", "admin", "remove", "book", "42"]).is_err());
        assert!(Cli::try_parse_from(["yakugo", "lookup", "book", "--pos", "thing"]).is_err());
    }
}
