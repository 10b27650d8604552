use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Console for a chat server's administration API
#[derive(Debug, Parser)]
#[command(name = "chatadmin", version, about)]
pub struct Cli {
    /// Configuration file (defaults to ~/.config/chatadmin/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the server base URL
    Connect { url: String },
    /// Forget the server connection
    Disconnect,
    /// Log in and remember the session
    Login {
        username: String,
        /// Password; prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Check whether the stored session is usable
    Status {
        /// Ask the server instead of trusting the stored session
        #[arg(long)]
        force: bool,
    },
    /// Show the current session's roles and profile
    Whoami,
    /// Forget the session and notify the server
    Logout,
    /// List assignable roles
    Roles,
    /// Business account management
    #[command(subcommand)]
    Accounts(AccountsCommand),
    /// User management
    #[command(subcommand)]
    Users(UsersCommand),
    /// Password management
    #[command(subcommand)]
    Password(PasswordCommand),
}

#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    /// Zero-based page index
    #[arg(long, default_value_t = 0)]
    pub page: u32,
    /// Page size (defaults to the configured page_size)
    #[arg(long)]
    pub size: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum AccountsCommand {
    /// List business accounts
    List {
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Show one business account
    Show { id: String },
    /// Create an account, or update it when --id is given
    Save {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Change an account's status (ACTIVE, INACTIVE, BLOCKED)
    Status { id: String, status: String },
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List the users of a business account
    List {
        business_id: String,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Register a new user
    Create {
        username: String,
        #[arg(long)]
        business_id: Option<String>,
        /// Role to assign; repeatable
        #[arg(long = "role")]
        roles: Vec<String>,
        /// Password; prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum PasswordCommand {
    /// Set another user's password
    Set { user_id: String },
    /// Change the logged-in user's password
    Change,
}
