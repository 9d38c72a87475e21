use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "did")]
#[command(about = "Log and browse your team's dones from the command line", version)]
#[command(after_help = "EXAMPLES:
    did teams                          List your teams
    did do Eng \"Fixed the login bug\"   Log a done for the Eng team
    did do Eng \"Ship v2\" --goal        Log a goal
    did do Eng --interactive           Log dones one per line
    did dones --team Eng --limit 20    List recent dones")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API token (overrides config file and IDONETHIS_API_TOKEN)
    #[arg(long, short = 't', global = true)]
    pub api_token: Option<String>,

    /// Mark the done as a goal
    #[arg(long, short, global = true)]
    pub goal: bool,

    /// Prompt for dones until "done" is entered
    #[arg(long, short, global = true)]
    pub interactive: bool,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List your teams
    #[command(after_help = "EXAMPLES:
    did teams
    did teams --json")]
    Teams,
    /// Create a done for the given team
    #[command(after_help = "EXAMPLES:
    did do Eng \"Fixed the login bug\"
    did do Eng \"Write the RFC\" --goal
    did do Eng --interactive")]
    Do(DoArgs),
    /// Open a team's page in the browser
    #[command(after_help = "EXAMPLES:
    did open
    did open Eng")]
    Open {
        /// Team name (uses defaultTeam if not specified)
        team: Option<String>,
    },
    /// Save the API token and default team
    #[command(after_help = "EXAMPLES:
    did config
    did config --api-token abc123 --default-team Eng
    did config --show")]
    Config(ConfigArgs),
    /// List dones
    #[command(after_help = "EXAMPLES:
    did dones
    did dones --team Eng --owner ada
    did dones --done-after 2024-01-01 --tag release --tag api
    did dones --limit 20 --page 2")]
    Dones(DoneListArgs),
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    did completions bash > ~/.bash_completion.d/did
    did completions zsh > ~/.zfunc/_did
    did completions fish > ~/.config/fish/completions/did.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
pub struct DoArgs {
    /// Team name, exactly as shown by `did teams`
    pub team: String,

    /// What you got done (omit with --interactive)
    pub task: Option<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Team used when a command's team is omitted
    #[arg(long)]
    pub default_team: Option<String>,

    /// Print the current configuration
    #[arg(long, conflicts_with = "default_team")]
    pub show: bool,
}

#[derive(Args, Clone)]
pub struct DoneListArgs {
    /// Filter by team name (uses defaultTeam if not specified)
    #[arg(long)]
    pub team: Option<String>,

    /// Filter by owner
    #[arg(long)]
    pub owner: Option<String>,

    /// Only dones on this date (YYYY-MM-DD)
    #[arg(long)]
    pub done_date: Option<NaiveDate>,

    /// Only dones after this date (YYYY-MM-DD)
    #[arg(long)]
    pub done_after: Option<NaiveDate>,

    /// Only dones before this date (YYYY-MM-DD)
    #[arg(long)]
    pub done_before: Option<NaiveDate>,

    /// Sort field, prefix with '-' for descending (e.g., -done_date)
    #[arg(long, allow_hyphen_values = true)]
    pub sort_by: Option<String>,

    /// Dones per page (default: 10)
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,

    /// Page number (default: 1)
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// Filter by tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}
