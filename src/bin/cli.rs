//! Expense Manager CLI
//!
//! Command-line front end for the expense store:
//! - List expenses with a running total
//! - Add, delete and clear expenses
//! - Per-category summary chart
//! - Interactive form session

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use expense_manager::view::{render, render_chart};
use expense_manager::{
    Config, ExpenseId, ExpenseManager, FormField, LoggingConfig, OutputFormat, RestExpenseStore,
};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "expense-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track expenses against an expense REST service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/expense-manager/config.toml or ./config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Expense service URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true)]
    pub format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all expenses, newest first
    List,

    /// Record an expense
    Add {
        /// Date of the expense (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Rent, Utilities, Groceries, Gas, Phone, Loans, Insurance, Entertainment or Other
        #[arg(short, long)]
        category: String,
        /// Amount in dollars
        #[arg(short, long)]
        amount: String,
        /// Optional description (max 100 characters)
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete one expense by id
    Delete {
        /// Expense id
        id: String,
    },

    /// Delete every expense
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Show the total and a per-category chart
    Summary,

    /// Fill in the form and manage expenses line by line
    Interactive,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = expense_manager::config::generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.remote.base_url = url.clone();
    }
    if let Some(format) = &cli.format {
        config.display.format = format.parse()?;
    }

    init_tracing(&config.logging);
    tracing::debug!(base_url = %config.remote.base_url, "Using expense store");

    let store = RestExpenseStore::new(config.remote.to_store_config())?;
    let manager = ExpenseManager::new(store);
    let format = config.display.format;

    if let Err(e) = manager.load().await {
        eprintln!("Cannot load expenses from {}", config.remote.base_url);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    match cli.command {
        Commands::List => print_view(&manager, format)?,

        Commands::Add {
            date,
            category,
            amount,
            description,
        } => {
            manager.edit_field(FormField::Date, date);
            manager.edit_field(FormField::Category, category);
            manager.edit_field(FormField::Amount, amount);
            if let Some(description) = description {
                manager.edit_field(FormField::Description, description);
            }

            let created = manager.submit().await?;
            eprintln!("Added expense {}", created.id);
            print_view(&manager, format)?;
        }

        Commands::Delete { id } => {
            manager.delete(&ExpenseId::new(id.clone())).await?;
            eprintln!("Deleted expense {}", id);
            print_view(&manager, format)?;
        }

        Commands::Clear { yes } => {
            if !yes {
                bail!("Refusing to delete every expense without --yes");
            }
            manager.clear_all().await?;
            eprintln!("All expenses deleted");
            print_view(&manager, format)?;
        }

        Commands::Summary => {
            print!("{}", render_chart(&manager.breakdown()));
            println!();
            println!("Total: ${}", manager.view().total);
        }

        Commands::Interactive => run_interactive(&manager, format).await?,

        // Handled before the store is contacted
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "expense_manager={0},expense_cli={0}",
            logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_view(manager: &ExpenseManager<RestExpenseStore>, format: OutputFormat) -> anyhow::Result<()> {
    print!("{}", render(&manager.view(), format)?);
    Ok(())
}

const INTERACTIVE_HELP: &str = "\
Commands:
  date <YYYY-MM-DD>      set the date field
  category <name>        set the category field
  amount <number>        set the amount field
  description <text>     set the description field
  submit                 create an expense from the form
  delete <id>            delete one expense
  clear                  delete every expense
  show                   print the expense table
  form                   print the current form fields
  help                   print this help
  quit                   leave the session";

async fn run_interactive(
    manager: &ExpenseManager<RestExpenseStore>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    println!("{}", INTERACTIVE_HELP);
    print_view(manager, format)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{}", INTERACTIVE_HELP),
            "show" => print_view(manager, format)?,
            "form" => {
                let form = manager.form();
                for field in FormField::all() {
                    println!("  {:<12} {}", field, form.get(*field));
                }
            }
            "submit" => match manager.submit().await {
                Ok(created) => {
                    println!("Added expense {}", created.id);
                    print_view(manager, format)?;
                }
                Err(e) => println!("Error: {}", e),
            },
            "delete" if !rest.is_empty() => match manager.delete(&ExpenseId::new(rest)).await {
                Ok(()) => print_view(manager, format)?,
                Err(e) => println!("Error: {}", e),
            },
            "clear" => match manager.clear_all().await {
                Ok(()) => print_view(manager, format)?,
                Err(e) => println!("Error: {}", e),
            },
            other => match other.parse::<FormField>() {
                Ok(field) => manager.edit_field(field, rest),
                Err(_) => println!("Unknown command {:?}, type `help`", other),
            },
        }
    }

    Ok(())
}
