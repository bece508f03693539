//! Backoffice CLI - Dataset inspection and record management.
//!
//! # Usage
//!
//! ```bash
//! # List warehouses whose name contains "a"
//! bo-cli --data seed.yaml list locations --name a --kind warehouse
//!
//! # Check every seeded record against its form rules
//! bo-cli --data seed.yaml validate
//!
//! # Simulate deleting a role (prompts unless --yes)
//! bo-cli --data seed.yaml delete role 4
//!
//! # Mark every notification as read
//! bo-cli --data seed.yaml inbox mark-read --all
//! ```
//!
//! The dataset file is read only; every change is simulated in memory and
//! reported through the log.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use backoffice_admin::filters::{
    LocationFilters, NotificationFilters, ReadFilter, RoleFilters, Selector, UserFilters,
};
use backoffice_core::{
    LocationKind, LocationStatus, NotificationKind, RoleStatus, UserStatus,
};

mod commands;

#[derive(Parser)]
#[command(name = "bo-cli")]
#[command(author, version, about = "Backoffice CLI tools")]
struct Cli {
    /// Dataset file, overriding `BACKOFFICE_DATA_FILE`
    #[arg(long, global = true)]
    data: Option<String>,

    /// Confirm destructive actions without prompting
    #[arg(short = 'y', long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a filtered table
    List {
        #[command(subcommand)]
        target: ListTarget,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
        format: Format,
    },
    /// Check seeded records against their form rules
    Validate,
    /// Delete a record after confirmation
    Delete {
        /// Record kind
        #[arg(value_enum)]
        kind: RecordKind,

        /// Record identifier
        id: i64,
    },
    /// Notification inbox actions
    Inbox {
        #[command(subcommand)]
        action: InboxAction,
    },
}

#[derive(Subcommand)]
enum ListTarget {
    /// Users
    Users {
        /// Matches first name, last name or username
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        /// `all`, `active`, `inactive` or `suspended`
        #[arg(long, default_value = "all")]
        status: Selector<UserStatus>,
    },
    /// Roles
    Roles {
        #[arg(long, default_value = "")]
        name: String,
        /// `all`, `active` or `inactive`
        #[arg(long, default_value = "all")]
        status: Selector<RoleStatus>,
    },
    /// Locations
    Locations {
        #[arg(long, default_value = "")]
        name: String,
        /// `all`, `office`, `warehouse`, `store` or `remote`
        #[arg(long, default_value = "all")]
        kind: Selector<LocationKind>,
        /// `all`, `active` or `inactive`
        #[arg(long, default_value = "all")]
        status: Selector<LocationStatus>,
    },
    /// Notifications
    Notifications {
        /// `all`, `info`, `success`, `warning` or `error`
        #[arg(long, default_value = "all")]
        kind: Selector<NotificationKind>,
        /// `all`, `read` or `unread`
        #[arg(long, default_value = "all")]
        read: ReadFilter,
    },
}

#[derive(Subcommand)]
enum InboxAction {
    /// Mark one notification, or all of them, as read
    MarkRead {
        /// Notification identifier
        #[arg(required_unless_present = "all")]
        id: Option<i64>,
        #[arg(long, conflicts_with = "id")]
        all: bool,
    },
    /// Delete every notification after confirmation
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Html,
}

#[derive(Clone, Copy, ValueEnum)]
enum RecordKind {
    User,
    Role,
    Location,
    Notification,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match commands::load_config(cli.data.as_deref(), cli.yes) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(false);
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_json);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli.command, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "backoffice_admin=info,bo_cli=info".into());

    // Logs go to stderr so table output on stdout stays clean
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(
    command: Commands,
    config: &backoffice_admin::config::AdminConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = commands::load_state(config).await?;

    match command {
        Commands::List { target, format } => {
            let table = match target {
                ListTarget::Users { name, email, status } => {
                    state.users.set_filters(UserFilters { name, email, status });
                    state.users.table()
                }
                ListTarget::Roles { name, status } => {
                    state.roles.set_filters(RoleFilters { name, status });
                    state.roles.table()
                }
                ListTarget::Locations { name, kind, status } => {
                    state.locations.set_filters(LocationFilters { name, kind, status });
                    state.locations.table()
                }
                ListTarget::Notifications { kind, read } => {
                    state.notifications.set_filters(NotificationFilters { kind, status: read });
                    state.notifications.table()
                }
            };
            commands::list::print(&table, matches!(format, Format::Html))?;
        }
        Commands::Validate => commands::validate::dataset(&state.dataset())?,
        Commands::Delete { kind, id } => {
            let mut confirm = commands::confirmer(config.assume_yes);
            match kind {
                RecordKind::User => commands::delete::user(&mut state, id, &mut confirm)?,
                RecordKind::Role => commands::delete::role(&mut state, id, &mut confirm)?,
                RecordKind::Location => commands::delete::location(&mut state, id, &mut confirm)?,
                RecordKind::Notification => {
                    commands::delete::notification(&mut state, id, &mut confirm)?;
                }
            }
        }
        Commands::Inbox { action } => match action {
            InboxAction::MarkRead { id: Some(id), all: false } => {
                commands::inbox::mark_read(&mut state, id)?;
            }
            InboxAction::MarkRead { .. } => commands::inbox::mark_all_read(&mut state),
            InboxAction::Clear => {
                let mut confirm = commands::confirmer(config.assume_yes);
                commands::inbox::clear(&mut state, &mut confirm);
            }
        },
    }
    Ok(())
}
