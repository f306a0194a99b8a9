// Rust guideline compliant 2026-10-16

//! Adoptly CLI Application
//!
//! Command-line interface for the Adoptly pet adoption service.

use adoptly_app::{AppError, PetFields, WorkspaceContext};
use adoptly_cli::commands::{self, list::ListScope};
use adoptly_cli::{create_formatter, exit_code, init_tracing, should_use_color, OutputFormatter};
use adoptly_core::{Config, OutputFormat as ConfigFormat};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "adopt",
    version,
    about = "Adoptly: list pets, book visits and conclude adoptions",
    long_about = "Adoptly keeps pet listings in a local workspace. Owners list pets, would-be adopters schedule visits, and owners conclude adoptions.",
    after_help = "Examples:\n  adopt init\n  adopt principal add Olivia --phone 555-0100\n  adopt create --name Rex --age 3 --weight 12 --color brown --image rex.jpg\n  adopt list --available\n  adopt schedule 3f9a0c1d2e4b5a6978c0d1e2\n  adopt conclude 3f9a0c1d2e4b5a6978c0d1e2\n"
)]
struct Cli {
    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Output format
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Workspace root (defaults to the current directory)
    #[arg(long, global = true)]
    repo: Option<PathBuf>,

    /// Access token of the acting principal
    #[arg(long, global = true, env = "ADOPTLY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Log level (error, warn, info, debug)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Table,
    Plain,
}

#[derive(Debug, clap::Args)]
struct FieldArgs {
    /// Pet name
    #[arg(long)]
    name: Option<String>,

    /// Age in years
    #[arg(long)]
    age: Option<u32>,

    /// Weight in kilograms
    #[arg(long)]
    weight: Option<f64>,

    /// Coat color
    #[arg(long)]
    color: Option<String>,

    /// Image files to attach (repeatable)
    #[arg(long = "image")]
    images: Vec<PathBuf>,
}

impl FieldArgs {
    fn into_parts(self, available: Option<bool>) -> (PetFields, Vec<PathBuf>) {
        let fields = PetFields {
            name: self.name,
            age: self.age,
            weight: self.weight,
            color: self.color,
            available,
        };
        (fields, self.images)
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Initialize a new Adoptly workspace
    Init,

    /// Manage principals
    Principal {
        #[command(subcommand)]
        action: PrincipalAction,
    },

    /// List a new pet for adoption
    Create {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// List pets, newest first
    List {
        /// Only pets still open for adoption
        #[arg(long, conflicts_with_all = ["adopted", "mine", "adoptions"])]
        available: bool,

        /// Only pets whose adoption was concluded
        #[arg(long, conflicts_with_all = ["mine", "adoptions"])]
        adopted: bool,

        /// Only your own listings
        #[arg(long, conflicts_with = "adoptions")]
        mine: bool,

        /// Only pets you scheduled a visit for
        #[arg(long)]
        adoptions: bool,
    },

    /// Show details of a pet
    Show {
        /// Pet ID
        id: String,
    },

    /// Update one of your listings
    Update {
        /// Pet ID
        id: String,

        #[command(flatten)]
        fields: FieldArgs,

        /// Availability; must be restated on every update
        #[arg(long)]
        available: Option<bool>,
    },

    /// Remove one of your listings
    Remove {
        /// Pet ID
        id: String,
    },

    /// Schedule a visit to a pet
    Schedule {
        /// Pet ID
        id: String,
    },

    /// Conclude the adoption of one of your pets
    Conclude {
        /// Pet ID
        id: String,
    },
}

#[derive(Debug, clap::Subcommand)]
enum PrincipalAction {
    /// Register a principal and print its access token
    Add {
        /// Display name
        name: String,

        /// Contact phone shown to would-be adopters
        #[arg(long)]
        phone: String,

        /// Profile image file
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Workspace config supplies defaults for flags that were not given.
    let config = WorkspaceContext::discover(cli.repo.as_deref())
        .and_then(|workspace| workspace.load_config())
        .unwrap_or_default();

    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    let _guard = init_tracing(&log_level, cli.log_file.as_deref())?;

    let use_color = !cli.no_color && should_use_color();
    let format = match (&cli.format, cli.json) {
        (Some(OutputFormat::Json), _) | (None, true) => "json",
        (Some(OutputFormat::Table), _) => "table",
        (Some(OutputFormat::Plain), _) => "plain",
        (None, false) => config_format(&config),
    };
    let formatter = create_formatter(format, use_color);

    if let Err(err) = run(cli, formatter.as_ref()) {
        if let Some(app_err) = err.downcast_ref::<AppError>() {
            eprintln!("{}", formatter.format_error(app_err));
            std::process::exit(exit_code(app_err.code()));
        }
        return Err(err);
    }

    Ok(())
}

fn config_format(config: &Config) -> &'static str {
    match config.output_format {
        ConfigFormat::Json => "json",
        ConfigFormat::Table => "table",
        ConfigFormat::Plain => "plain",
    }
}

fn run(cli: Cli, formatter: &dyn OutputFormatter) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    if let Commands::Init = command {
        let root = match cli.repo {
            Some(root) => root,
            None => std::env::current_dir()?,
        };
        commands::init::execute(&root)?;
        return Ok(());
    }

    let workspace = WorkspaceContext::discover(cli.repo.as_deref())?;
    let token = cli.token.unwrap_or_default();

    match command {
        Commands::Init => {}
        Commands::Principal { action } => match action {
            PrincipalAction::Add { name, phone, image } => {
                commands::principal::add(&workspace, &name, &phone, image, formatter)?;
            }
        },
        Commands::Create { fields } => {
            let (fields, images) = fields.into_parts(None);
            commands::create::execute(&workspace, &token, fields, &images, formatter)?;
        }
        Commands::List {
            available,
            adopted,
            mine,
            adoptions,
        } => {
            let scope = if mine {
                ListScope::Mine
            } else if adoptions {
                ListScope::Adoptions
            } else if available {
                ListScope::Available
            } else if adopted {
                ListScope::Adopted
            } else {
                ListScope::All
            };
            commands::list::execute(&workspace, &token, scope, formatter)?;
        }
        Commands::Show { id } => {
            commands::show::execute(&workspace, &id, formatter)?;
        }
        Commands::Update {
            id,
            fields,
            available,
        } => {
            let (fields, images) = fields.into_parts(available);
            commands::update::execute(&workspace, &token, &id, fields, &images, formatter)?;
        }
        Commands::Remove { id } => {
            commands::remove::execute(&workspace, &token, &id, formatter)?;
        }
        Commands::Schedule { id } => {
            commands::schedule::execute(&workspace, &token, &id, formatter)?;
        }
        Commands::Conclude { id } => {
            commands::conclude::execute(&workspace, &token, &id, formatter)?;
        }
    }

    Ok(())
}
