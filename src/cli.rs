use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use converge::{Intent, SourceType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "studioctl")]
#[command(version)]
#[command(about = "Administer Studio workbench groups declaratively", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile a group with its desired definition
    Apply(ApplyArgs),

    /// Fetch and print a group's current definition
    Show(ShowArgs),

    /// Delete a group if it exists
    Delete(DeleteArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Connection
// ============================================================================

#[derive(Args)]
pub struct ConnectionArgs {
    /// Base URL of the Studio server
    #[arg(long, env = "STUDIO_URL", value_name = "URL")]
    pub url: Option<String>,

    /// API key with admin privileges
    #[arg(long, env = "STUDIO_API_KEY", hide_env_values = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Path to an alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Apply
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Present,
    Absent,
}

impl From<StateArg> for Intent {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Present => Self::Present,
            StateArg::Absent => Self::Absent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceTypeArg {
    Local,
    Ldap,
    Saas,
}

impl From<SourceTypeArg> for SourceType {
    fn from(source: SourceTypeArg) -> Self {
        match source {
            SourceTypeArg::Local => Self::Local,
            SourceTypeArg::Ldap => Self::Ldap,
            SourceTypeArg::Saas => Self::Saas,
        }
    }
}

#[derive(Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Name of the group
    #[arg(long)]
    pub name: String,

    /// Whether the group should exist
    #[arg(long, value_enum, default_value_t = StateArg::Present)]
    pub state: StateArg,

    /// Description of the group
    #[arg(long)]
    pub description: Option<String>,

    /// Account source of the group
    #[arg(long, value_enum)]
    pub source_type: Option<SourceTypeArg>,

    /// Whether the group has administrator rights
    #[arg(long, value_name = "BOOL")]
    pub admin: Option<bool>,

    /// LDAP group mapped onto this group (repeatable)
    #[arg(long = "ldap-group", value_name = "NAME")]
    pub ldap_group_names: Option<Vec<String>>,

    #[arg(long, value_name = "BOOL")]
    pub may_create_authenticated_connections: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_create_code_envs: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_create_clusters: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_create_projects: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_create_projects_from_macros: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_create_projects_from_templates: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_create_projects_from_apps: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_create_published_api_services: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_create_published_projects: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_create_active_web_content: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_develop_plugins: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_edit_lib_folders: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_manage_code_envs: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_manage_clusters: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_manage_udm: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_view_indexed_hive_connections: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_write_safe_code: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_write_unsafe_code: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub may_write_in_root_project_folder: Option<bool>,

    /// Groups regex for obtaining API tickets from cookies
    #[arg(long, value_name = "REGEX")]
    pub can_obtain_api_ticket_from_cookies_for_groups_regex: Option<String>,

    /// Additional attribute as KEY=VALUE, snake_case key (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Compute changes without applying them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Show / Delete
// ============================================================================

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Name of the group
    pub name: String,

    /// Print the definition as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Name of the group
    pub name: String,

    /// Compute changes without applying them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}
