use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Track grocery receipts and predict what you will buy")]
pub struct Cli {
    /// SQLite database file (overrides DATABASE_PATH)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Create the database tables if they do not exist
    Init,
    /// Store a receipt read from the OCR JSON output
    Read {
        /// Receipt JSON file (defaults to output.json)
        #[arg(short, long)]
        file: Option<String>,
    },
    /// Assign categories to unassigned purchases interactively
    Assign,
    /// Let a local LLM assign categories to unassigned purchases
    Classify {
        /// Ollama model name (overrides OLLAMA_MODEL)
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Score categories by how well their purchase history fits a point in time
    Predict {
        /// Target time as "YYYY-MM-DD HH:MM:SS" in the configured UTC offset
        #[arg(long)]
        at: Option<String>,
    },
    /// List categories
    Categories,
    /// Add a category
    AddCategory {
        /// Category name
        name: String,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_predict_with_target_and_database() {
        let cli = Cli::parse_from(["what_am_i_buying", "predict", "--at", "2025-01-13 10:00:00", "-d", "x.db"]);

        assert_eq!(cli.database.as_deref(), Some("x.db"));
        assert_eq!(
            cli.command,
            Command::Predict {
                at: Some("2025-01-13 10:00:00".to_string())
            }
        );
    }

    #[test]
    fn test_parses_add_category() {
        let cli = Cli::parse_from(["what_am_i_buying", "add-category", "Dairy"]);

        assert_eq!(cli.command, Command::AddCategory { name: "Dairy".to_string() });
    }
}
