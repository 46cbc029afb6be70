use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::str::FromStr;

use crate::types::{
    TicketCategory, TicketPriority, TicketStatus, VALID_CATEGORIES, VALID_PRIORITIES,
    VALID_STATUSES,
};

#[derive(Parser)]
#[command(name = "helpdesk")]
#[command(about = "Support ticket desk client")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tickets, optionally filtered
    #[command(visible_alias = "l")]
    Ls {
        /// Free-text search over title and description
        #[arg(short, long)]
        search: Option<String>,

        /// Only tickets with this status (open, closed)
        #[arg(long, value_parser = parse_status)]
        status: Option<TicketStatus>,

        /// Only tickets in this category (billing, technical, account, general)
        #[arg(long, value_parser = parse_category)]
        category: Option<TicketCategory>,

        /// Only tickets with this priority (low, medium, high, critical)
        #[arg(long, value_parser = parse_priority)]
        priority: Option<TicketPriority>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display a single ticket
    #[command(visible_alias = "s")]
    Show {
        /// Ticket ID
        #[arg(value_parser = parse_ticket_id)]
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new ticket
    #[command(visible_alias = "c")]
    Create {
        /// Ticket title (at most 200 characters)
        title: String,

        /// Description text
        #[arg(short, long)]
        description: String,

        /// Category (default: server suggestion, else general)
        #[arg(long, value_parser = parse_category)]
        category: Option<TicketCategory>,

        /// Priority (default: server suggestion, else low)
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<TicketPriority>,

        /// Do not ask the server to suggest a category and priority
        #[arg(long)]
        no_classify: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggest a category and priority for a description
    Classify {
        /// Description text
        description: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a ticket's status
    Status {
        /// Ticket ID
        #[arg(value_parser = parse_ticket_id)]
        id: u64,

        /// New status (open, closed)
        #[arg(value_parser = parse_status)]
        status: TicketStatus,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a ticket
    Rm {
        /// Ticket ID
        #[arg(value_parser = parse_ticket_id)]
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show ticket statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for [possible values: bash, zsh, fish, powershell, elvish]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (api_base, request_timeout_secs, max_retries)
        key: String,
        /// Value to set
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get a configuration value
    Get {
        /// Configuration key (api_base, request_timeout_secs, max_retries)
        key: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> crate::error::Result<()> {
        use crate::commands::{
            CreateOptions, LsOptions, cmd_classify, cmd_config_get, cmd_config_set,
            cmd_config_show, cmd_create, cmd_ls, cmd_rm, cmd_show, cmd_stats, cmd_status,
        };

        match self {
            Commands::Ls {
                search,
                status,
                category,
                priority,
                json,
            } => {
                cmd_ls(LsOptions {
                    search,
                    status,
                    category,
                    priority,
                    json,
                })
                .await
            }
            Commands::Show { id, json } => cmd_show(id, json).await,
            Commands::Create {
                title,
                description,
                category,
                priority,
                no_classify,
                json,
            } => {
                cmd_create(CreateOptions {
                    title,
                    description,
                    category,
                    priority,
                    no_classify,
                    json,
                })
                .await
            }
            Commands::Classify { description, json } => cmd_classify(&description, json).await,
            Commands::Status { id, status, json } => cmd_status(id, status, json).await,
            Commands::Rm { id, json } => cmd_rm(id, json).await,
            Commands::Stats { json } => cmd_stats(json).await,
            Commands::Config { action } => match action {
                ConfigAction::Show { json } => cmd_config_show(json),
                ConfigAction::Set { key, value, json } => cmd_config_set(&key, &value, json),
                ConfigAction::Get { key, json } => cmd_config_get(&key, json),
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

fn parse_with_validation<T, F>(
    s: &str,
    parser: F,
    field_name: &str,
    valid_values: &[&str],
) -> Result<T, String>
where
    F: FnOnce(&str) -> Result<T, String>,
{
    parser(s).map_err(|_| {
        format!(
            "Invalid {}. Must be one of: {}",
            field_name,
            valid_values.join(", ")
        )
    })
}

fn parse_status(s: &str) -> Result<TicketStatus, String> {
    parse_with_validation(
        s,
        |v| TicketStatus::from_str(v).map_err(|_| String::new()),
        "status",
        VALID_STATUSES,
    )
}

fn parse_category(s: &str) -> Result<TicketCategory, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "category",
        VALID_CATEGORIES,
    )
}

fn parse_priority(s: &str) -> Result<TicketPriority, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "priority",
        VALID_PRIORITIES,
    )
}

/// Ticket IDs are server-assigned positive integers; `#12` is accepted too
fn parse_ticket_id(s: &str) -> Result<u64, String> {
    let digits = s.trim().trim_start_matches('#');
    if digits.is_empty() {
        return Err("ID cannot be empty".to_string());
    }
    match digits.parse::<u64>() {
        Ok(0) => Err("ID must be a positive integer".to_string()),
        Ok(id) => Ok(id),
        Err(_) => Err(format!("Invalid ID '{s}'. Must be a positive integer")),
    }
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "helpdesk", &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_status_valid() {
        assert_eq!(parse_status("open").unwrap(), TicketStatus::Open);
        assert_eq!(parse_status("CLOSED").unwrap(), TicketStatus::Closed);
    }

    #[test]
    fn test_parse_status_error_message_lists_valid_values() {
        let err = parse_status("done").unwrap_err();
        assert!(
            err.contains("open") && err.contains("closed"),
            "Error should list valid status values, got: {err}"
        );
    }

    #[test]
    fn test_parse_category_and_priority() {
        assert_eq!(parse_category("Billing").unwrap(), TicketCategory::Billing);
        assert_eq!(parse_priority("critical").unwrap(), TicketPriority::Critical);
        assert!(parse_priority("urgent").unwrap_err().contains("low, medium, high, critical"));
    }

    #[test]
    fn test_parse_ticket_id() {
        assert_eq!(parse_ticket_id("5").unwrap(), 5);
        assert_eq!(parse_ticket_id("#12").unwrap(), 12);
        assert!(parse_ticket_id("").is_err());
        assert!(parse_ticket_id("0").is_err());
        assert!(parse_ticket_id("abc").is_err());
        assert!(parse_ticket_id("-3").is_err());
    }

    #[test]
    fn test_create_requires_description() {
        let result = Cli::try_parse_from(["helpdesk", "create", "Refund"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "helpdesk", "create", "Refund", "-d", "Charged twice", "--category", "billing",
        ])
        .unwrap();
        match cli.command {
            Commands::Create {
                category, priority, ..
            } => {
                assert_eq!(category, Some(TicketCategory::Billing));
                assert_eq!(priority, None);
            }
            _ => panic!("expected create"),
        }
    }
}
