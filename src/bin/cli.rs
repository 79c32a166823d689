//! Stockpile CLI
//!
//! Thin command-line front end for the record store. Each invocation maps
//! onto exactly one store operation; arguments arrive already parsed and
//! validated, so the store never sees raw user input.

use clap::{Parser, Subcommand};
use stockpile::{Config, Record, RecordPatch, RecordStore, SearchKey};
use tracing_subscriber::{fmt, EnvFilter};

/// Stockpile CLI
#[derive(Parser, Debug)]
#[command(name = "stockpile")]
#[command(about = "Fixed-width flat-file record store")]
#[command(version)]
struct Args {
    /// Backing record file
    #[arg(short, long, default_value = "data.bin")]
    data_path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Append a new record
    Add {
        /// Record id (uniqueness is not enforced)
        id: i32,

        /// Item name
        name: String,

        /// Item description
        description: String,

        /// Stock quantity
        stock: i32,

        /// Supplier name
        supplier: String,
    },

    /// List every record
    List,

    /// Find the first record matching an id or a name
    Search {
        /// Record id to match exactly
        #[arg(long, conflicts_with = "name")]
        id: Option<i32>,

        /// Name to match case-insensitively
        #[arg(long)]
        name: Option<String>,
    },

    /// Update every record with the given id
    Update {
        /// Record id to update
        id: i32,

        /// New description (omit to keep unchanged)
        #[arg(long)]
        description: Option<String>,

        /// New stock quantity (omit to keep unchanged)
        #[arg(long)]
        stock: Option<i32>,

        /// New supplier (omit to keep unchanged)
        #[arg(long)]
        supplier: Option<String>,
    },

    /// Delete every record with the given id
    Delete {
        /// Record id to delete
        id: i32,
    },

    /// Print the record report
    Report,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    let config = Config::builder().data_path(&args.data_path).build();
    let store = match RecordStore::open(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&store, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(store: &RecordStore, command: Commands) -> stockpile::Result<()> {
    match command {
        Commands::Add {
            id,
            name,
            description,
            stock,
            supplier,
        } => {
            store.add_record(&Record::new(id, name, description, stock, supplier))?;
            println!("Record added.");
        }

        Commands::List | Commands::Report => {
            print!("{}", store.generate_report()?);
        }

        Commands::Search { id, name } => {
            let key = match (id, name) {
                (Some(id), None) => SearchKey::ById(id),
                (None, Some(name)) => SearchKey::ByName(name),
                _ => {
                    tracing::error!("search needs exactly one of --id or --name");
                    std::process::exit(2);
                }
            };

            match store.search(&key)? {
                Some(record) => println!("Record found: {:?}", record),
                None => println!("Record not found."),
            }
        }

        Commands::Update {
            id,
            description,
            stock,
            supplier,
        } => {
            let patch = RecordPatch {
                description,
                stock,
                supplier,
            };
            let updated = store.update(id, &patch)?;
            println!("{} record(s) updated.", updated);
        }

        Commands::Delete { id } => {
            let removed = store.delete(id)?;
            println!("{} record(s) deleted.", removed);
        }
    }

    Ok(())
}
