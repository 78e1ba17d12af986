mod summary;
mod tui;

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use routinely_core::{build_dashboard, distinct_dates, CsvRoutineRepository, RoutineRepository};

#[derive(Parser)]
#[command(name = "routinely")]
#[command(about = "A daily routine tracker dashboard", long_about = None)]
struct Cli {
    /// Path to the routine data CSV
    #[arg(long, global = true, default_value = "data/routine_data.csv")]
    data: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive dashboard
    Dash,
    /// Print the summary table and imbalanced days
    Summary {
        /// Restrict to these dates (YYYY-MM-DD, comma separated); default: all
        #[arg(long, value_delimiter = ',')]
        dates: Vec<NaiveDate>,
    },
    /// Print the raw CSV rows, one per line
    Raw,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let repo = CsvRoutineRepository::new(Some(cli.data))?;

    if repo.was_created() {
        println!("Sample data file created: '{}'", repo.path().display());
    }

    match cli.command {
        Some(Commands::Summary { dates }) => {
            let records = repo.load()?;
            let selection: BTreeSet<NaiveDate> = if dates.is_empty() {
                distinct_dates(&records).into_iter().collect()
            } else {
                dates.into_iter().collect()
            };
            let data = build_dashboard(&records, &selection);
            summary::print_summary(&data);
        }
        Some(Commands::Raw) => {
            for row in repo.raw_rows()? {
                println!("{}", row);
            }
        }
        Some(Commands::Dash) | None => {
            tui::run(repo)?;
        }
    }

    Ok(())
}
