pub mod console;
pub mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::application::{AppError, CatalogEntry, VendingSession};
use crate::domain::{Catalog, Category, Cents, ItemCode, format_cents, parse_cents};
use crate::io::{ReceiptFormat, load_catalog, write_receipt};

pub use console::{Console, IoConsole, stdio_console};
pub use session::{SessionExit, SessionOutcome, display_products, rejection_message, run_session};

/// Vendo - Vending Machine
#[derive(Parser)]
#[command(name = "vendo")]
#[command(about = "A single-terminal vending machine: insert money, pick items, get change")]
#[command(version)]
pub struct Cli {
    /// Catalog file (.json or .csv) to stock the machine with instead of the built-in items
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Enable verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to an interactive session
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session at the machine
    Session {
        /// Amount to insert up front (e.g., "5.00"); prompts when omitted
        #[arg(short, long)]
        funds: Option<String>,

        /// Print a receipt after the session: csv, json
        #[arg(short, long)]
        receipt: Option<String>,

        /// Receipt output file (stdout if omitted)
        #[arg(short, long, requires = "receipt")]
        output: Option<String>,
    },

    /// Show the items in the machine
    Catalog {
        /// Only show one category: candies, sodas, snacks
        #[arg(long)]
        category: Option<String>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Buy a single item without prompting, then collect the change
    Buy {
        /// Product code (e.g., 101)
        code: ItemCode,

        /// Number of units
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        quantity: i64,

        /// Amount to insert (e.g., "5.00")
        #[arg(short, long)]
        funds: String,
    },
}

#[derive(Serialize)]
struct CategoryListing {
    category: Category,
    items: Vec<CatalogEntry>,
}

impl Cli {
    fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => load_catalog(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display())),
            None => Ok(Catalog::with_default_items()),
        }
    }

    pub fn run(self) -> Result<()> {
        let catalog = self.load_catalog()?;
        let mut session = VendingSession::new(catalog);

        match self.command {
            None => {
                run_session(&mut session, &mut stdio_console(), None)?;
            }

            Some(Commands::Session {
                funds,
                receipt,
                output,
            }) => {
                let opening_funds = funds.as_deref().map(parse_amount).transpose()?;
                let receipt_format = receipt.as_deref().map(parse_receipt_format).transpose()?;

                run_session(&mut session, &mut stdio_console(), opening_funds)?;

                if let Some(format) = receipt_format {
                    run_receipt_command(&session, format, output.as_deref())?;
                }
            }

            Some(Commands::Catalog { category, format }) => {
                run_catalog_command(&session, category.as_deref(), &format)?;
            }

            Some(Commands::Buy {
                code,
                quantity,
                funds,
            }) => {
                run_buy_command(&mut session, code, quantity, parse_amount(&funds)?)?;
            }
        }

        Ok(())
    }
}

fn parse_amount(input: &str) -> Result<Cents> {
    let amount = parse_cents(input).map_err(|source| AppError::InvalidAmount {
        input: input.to_string(),
        source,
    })?;
    Ok(amount)
}

fn parse_receipt_format(input: &str) -> Result<ReceiptFormat> {
    ReceiptFormat::from_str(input)
        .with_context(|| format!("Invalid receipt format '{}'. Valid formats: csv, json", input))
}

fn run_catalog_command(
    session: &VendingSession,
    category: Option<&str>,
    format: &str,
) -> Result<()> {
    let categories = match category {
        Some(name) => vec![Category::from_str(name).with_context(|| {
            format!(
                "Invalid category '{}'. Valid categories: candies, sodas, snacks",
                name
            )
        })?],
        None => Category::ALL.to_vec(),
    };

    match format {
        "table" => {
            println!("{:<6} {:<16} {:>8} {:>6}", "CODE", "NAME", "PRICE", "STOCK");
            println!("{}", "-".repeat(39));
            for category in categories {
                println!("--- {} ---", category.title());
                for entry in session.list_category(category) {
                    println!(
                        "{:<6} {:<16} {:>8} {:>6}",
                        entry.code,
                        entry.name,
                        format_cents(entry.price),
                        entry.stock
                    );
                }
            }
        }
        "json" => {
            let listings: Vec<CategoryListing> = categories
                .into_iter()
                .map(|category| CategoryListing {
                    category,
                    items: session.list_category(category),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listings)?);
        }
        _ => {
            anyhow::bail!("Invalid format '{}'. Valid formats: table, json", format);
        }
    }
    Ok(())
}

fn run_buy_command(
    session: &mut VendingSession,
    code: ItemCode,
    quantity: i64,
    funds: Cents,
) -> Result<()> {
    session.insert_funds(funds)?;

    let result = session.purchase(code, quantity);
    match &result {
        Ok(dispensed) => println!(
            "Dispensing {} x {} (${})",
            dispensed.quantity,
            dispensed.name,
            format_cents(dispensed.total)
        ),
        Err(err) => println!("{}", rejection_message(err)),
    }

    let refunded = session.end_session();
    if refunded > 0 {
        println!("Change: ${}", format_cents(refunded));
    }

    result
        .map(|_| ())
        .with_context(|| format!("Purchase of item {} was refused", code))
}

fn run_receipt_command(
    session: &VendingSession,
    format: ReceiptFormat,
    output: Option<&str>,
) -> Result<()> {
    use std::fs::File;
    use std::io::{Write, stdout};

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let receipt = session.receipt();
    write_receipt(&receipt, format, writer)?;
    if output.is_some() {
        eprintln!(
            "Wrote {} receipt with {} sale(s)",
            format.as_str(),
            receipt.sales.len()
        );
    }
    Ok(())
}
