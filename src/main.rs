use anyhow::Result;
use billfold::core::log::init_logging;
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Record an expense
    Add {
        /// What the money was spent on
        description: String,
        /// Amount in the entry's own currency
        amount: f64,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        subcategory: Option<String>,
        /// 3-letter currency code; defaults to the display currency
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        payment_method: Option<String>,
        #[arg(long)]
        place: Option<String>,
    },
    /// Record an income
    Income {
        /// Where the money came from
        description: String,
        /// Amount in the entry's own currency
        amount: f64,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        subcategory: Option<String>,
        /// 3-letter currency code; defaults to the display currency
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        payment_method: Option<String>,
    },
    /// List entries grouped by month
    List {
        /// Only show entries of this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Show the running balance in the display currency
    Balance,
    /// Edit an entry by id
    Edit {
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        subcategory: Option<String>,
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        payment_method: Option<String>,
        #[arg(long)]
        place: Option<String>,
    },
    /// Delete an entry by id
    Delete { id: String },
    /// Show exchange rates for the supported currencies
    Rates {
        /// Fetch a new table even if the cached one is still fresh
        #[arg(long)]
        refresh: bool,
    },
}

impl From<Commands> for billfold::AppCommand {
    fn from(cmd: Commands) -> billfold::AppCommand {
        use billfold::core::record::{NewEntry, RecordPatch};
        match cmd {
            Commands::Add {
                description,
                amount,
                category,
                subcategory,
                currency,
                payment_method,
                place,
            } => billfold::AppCommand::Add(NewEntry {
                description,
                amount,
                category,
                subcategory,
                currency,
                payment_method,
                place,
            }),
            Commands::Income {
                description,
                amount,
                category,
                subcategory,
                currency,
                payment_method,
            } => billfold::AppCommand::Income(NewEntry {
                description,
                amount,
                category,
                subcategory,
                currency,
                payment_method,
                place: None,
            }),
            Commands::List { category } => billfold::AppCommand::List { category },
            Commands::Balance => billfold::AppCommand::Balance,
            Commands::Edit {
                id,
                description,
                amount,
                category,
                subcategory,
                currency,
                payment_method,
                place,
            } => billfold::AppCommand::Edit {
                id,
                patch: RecordPatch {
                    description,
                    amount: amount.map(|a| format!("{a:.2}")),
                    category,
                    subcategory,
                    currency,
                    payment_method,
                    place,
                },
            },
            Commands::Delete { id } => billfold::AppCommand::Delete { id },
            Commands::Rates { refresh } => billfold::AppCommand::Rates { refresh },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => billfold::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = billfold::core::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
# Currency the running balance is displayed in
currency: "USD"

rates:
  base_url: "https://v6.exchangerate-api.com"
  api_key: "YOUR-API-KEY"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
