use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{debug, error};

use recipe_sheet::{
    install, InMemoryRegistry, InstallSources, RecipeRecord, RecipeSheetConfig,
    RegistrationOptions, RegistrationSession,
};

#[derive(Parser)]
#[command(name = "recipe-sheet")]
#[command(author, version, about = "Validate crafting recipe workbooks", long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a workbook and report every recipe or the first error
    Validate {
        /// Path to the workbook
        file: PathBuf,
        /// Sheet name (case-insensitive)
        #[arg(long)]
        sheet: Option<String>,
        /// Zero-based sheet position
        #[arg(long)]
        sheet_index: Option<usize>,
        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show which registry ids an install would add
    Plan {
        /// Configuration file (default: recipe-sheet.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Default workbook (replaces source.default_file)
        #[arg(long)]
        default: Option<PathBuf>,
        /// Override workbook (replaces source.override_file)
        #[arg(long = "override")]
        override_file: Option<PathBuf>,
        /// Print the registration report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(cli.command) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Validate {
            file,
            sheet,
            sheet_index,
            json,
        } => {
            let records = recipe_sheet::load(&file, sheet.as_deref(), sheet_index)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print_summary(&records);
            }
        }
        Commands::Plan {
            config,
            default,
            override_file,
            json,
        } => {
            let mut settings = RecipeSheetConfig::load(config.as_deref())?;
            if let Some(path) = default {
                settings.source.default_file = path;
            }
            if let Some(path) = override_file {
                settings.source.override_file = Some(path);
            }

            let mut registry = InMemoryRegistry::new();
            let mut session =
                RegistrationSession::new(RegistrationOptions::from(&settings.registration));
            let report = install(
                &mut registry,
                &mut session,
                &InstallSources::from(&settings.source),
            )?;
            debug!("Session holds {} ids", session.added_ids().len());

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for id in &report.added {
                    println!("+ {}", id);
                }
                for id in &report.overridden {
                    println!("~ {} (from override)", id);
                }
                for id in &report.disabled {
                    println!("- {} (disabled)", id);
                }
                for id in &report.skipped_existing {
                    println!("! {} (already registered)", id);
                }
            }
        }
    }
    Ok(())
}

fn print_summary(records: &[RecipeRecord]) {
    for record in records {
        let items: Vec<String> = record
            .cost
            .items
            .iter()
            .map(|item| format!("{}x{}", item.id, item.amount))
            .collect();
        println!(
            "{} {} -> {}x{} (money {}, items [{}], tags [{}])",
            if record.enabled { "[on] " } else { "[off]" },
            record.recipe_id,
            record.result_item.id,
            record.result_item.amount,
            record.cost.money,
            items.join(", "),
            record.tags.join(", ")
        );
    }
    let enabled = records.iter().filter(|r| r.enabled).count();
    println!("{} recipes, {} enabled", records.len(), enabled);
}
