use crate::export::{ExportEntity, ExportFormat};
use clap::{Parser, Subcommand};

/// Command-line interface definition for ClientDesk
/// CLI application to manage clients, tasks, time and invoices with SQLite
#[derive(Parser)]
#[command(
    name = "clientdesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple client-management CLI: clients, tasks, time tracking and invoices with SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as a different user than the configured one
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or migrate)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(
            long = "check",
            help = "Check database integrity and report dangling client/task references"
        )]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the activity log
    Log {
        #[arg(long = "print", help = "Print rows from the activity log")]
        print: bool,

        #[arg(long = "limit", help = "Show only the N most recent rows")]
        limit: Option<usize>,
    },

    /// Manage clients
    Client {
        #[command(subcommand)]
        action: ClientAction,
    },

    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Track time
    Time {
        #[command(subcommand)]
        action: TimeAction,
    },

    /// Manage invoices
    Invoice {
        #[command(subcommand)]
        action: InvoiceAction,
    },

    /// Show or edit the user profile
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show the dashboard summary
    Dashboard,

    /// Aggregate reports (per client or per month)
    Report {
        #[arg(long = "by-client", help = "Group figures per client")]
        by_client: bool,

        #[arg(long = "monthly", help = "Group figures per month", conflicts_with = "by_client")]
        monthly: bool,

        #[arg(
            long,
            short,
            value_name = "PERIOD",
            help = "Restrict to a year/month/day or a custom range"
        )]
        period: Option<String>,

        #[arg(long, value_enum, help = "Write the report to a file instead of the terminal")]
        format: Option<ExportFormat>,

        #[arg(long, value_name = "FILE", requires = "format")]
        file: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite the output file without confirmation")]
        force: bool,
    },

    /// Export a collection as flat rows
    Export {
        #[arg(long, value_enum, help = "Which collection to export")]
        entity: ExportEntity,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },
}

#[derive(Subcommand)]
pub enum ClientAction {
    /// Add a new client
    Add {
        name: String,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List clients
    List {
        #[arg(long, help = "Include archived clients")]
        archived: bool,

        #[arg(long, help = "Case-insensitive match on name/company/email")]
        search: Option<String>,
    },

    /// Show one client with derived figures
    Show { id: i64 },

    /// Edit client fields
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Hide a client from default listings
    Archive { id: i64 },

    /// Bring an archived client back
    Unarchive { id: i64 },

    /// Delete a client (referencing records are kept)
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a new task
    Add {
        title: String,

        #[arg(long)]
        client: Option<i64>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        due: Option<String>,

        #[arg(long, help = "low, medium or high")]
        priority: Option<String>,
    },

    /// List tasks
    List {
        #[arg(long, help = "todo, in_progress or done")]
        status: Option<String>,

        #[arg(long)]
        client: Option<i64>,

        #[arg(long, help = "low, medium or high")]
        priority: Option<String>,

        #[arg(
            long,
            short,
            value_name = "PERIOD",
            help = "Filter by due date: year/month/day or a custom range"
        )]
        period: Option<String>,
    },

    /// Edit task fields
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        client: Option<i64>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        due: Option<String>,

        #[arg(long)]
        priority: Option<String>,

        #[arg(long)]
        status: Option<String>,
    },

    /// Mark a task done
    Done { id: i64 },

    /// Delete a task
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum TimeAction {
    /// Log a duration (90, 90m, 2h, 1h30m)
    Log {
        duration: String,

        #[arg(long)]
        task: Option<i64>,

        #[arg(long, help = "Defaults to the task's client")]
        client: Option<i64>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Defaults to today")]
        date: Option<String>,

        #[arg(long)]
        note: Option<String>,

        #[arg(long = "not-billable", help = "Mark the entry as not billable")]
        not_billable: bool,
    },

    /// List time entries with a total row
    List {
        #[arg(
            long,
            short,
            value_name = "PERIOD",
            help = "Filter by entry date: year/month/day or a custom range"
        )]
        period: Option<String>,

        #[arg(long)]
        client: Option<i64>,

        #[arg(long)]
        task: Option<i64>,
    },

    /// Delete a time entry
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum InvoiceAction {
    /// Create a draft invoice
    Create {
        #[arg(long)]
        client: i64,

        #[arg(long = "item", value_name = "DESC:QTY:PRICE")]
        items: Vec<String>,

        #[arg(
            long = "from-time",
            value_name = "PERIOD",
            help = "Turn the client's unbilled billable time in the period into line items"
        )]
        from_time: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Issue date, defaults to today")]
        date: Option<String>,

        #[arg(long = "due-days", help = "Days until due, defaults to the configured value")]
        due_days: Option<i64>,
    },

    /// List invoices with derived totals
    List {
        #[arg(long, help = "draft, sent or paid")]
        status: Option<String>,

        #[arg(long)]
        client: Option<i64>,

        #[arg(
            long,
            short,
            value_name = "PERIOD",
            help = "Filter by issue date: year/month/day or a custom range"
        )]
        period: Option<String>,
    },

    /// Show one invoice with line items
    Show { id: i64 },

    /// Add or remove line items on a draft
    Item {
        id: i64,

        #[arg(long, value_name = "DESC:QTY:PRICE")]
        add: Option<String>,

        #[arg(long, value_name = "POS", conflicts_with = "add")]
        remove: Option<i64>,
    },

    /// Mark a draft invoice as sent
    Send { id: i64 },

    /// Mark a sent invoice as paid
    Pay { id: i64 },

    /// Delete an invoice (drafts only unless --force)
    Del {
        id: i64,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Render an invoice as a PDF document
    Pdf {
        id: i64,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Show the active profile
    Show,

    /// Update profile fields
    Set {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(
            long,
            value_name = "FILE",
            help = "Copy an image into the config directory and use it as avatar"
        )]
        avatar: Option<String>,
    },
}
