use chrono::Local;
use clap::Subcommand;
use kidtime_core::{format_hms, Config, Database, HistoryLedger, HISTORY_KEY};

use crate::render;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// All recorded days
    List {
        /// Print the stored JSON array instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Today's entry as JSON
    Today,
    /// Totals across every recorded day
    Summary,
}

fn load_ledger(db: &Database) -> Result<HistoryLedger, Box<dyn std::error::Error>> {
    let blob = db.kv_get(HISTORY_KEY)?;
    Ok(HistoryLedger::deserialize(blob.as_deref()))
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let ledger = load_ledger(&db)?;

    match action {
        HistoryAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(ledger.entries())?);
            } else {
                let locale = Config::load_or_default().locale;
                println!("{}", render::history_table(ledger.entries(), locale));
            }
        }
        HistoryAction::Today => {
            let today = Local::now().date_naive();
            println!("{}", serde_json::to_string_pretty(&ledger.get(today))?);
        }
        HistoryAction::Summary => {
            let summary = ledger.summary();
            println!("{}", serde_json::to_string_pretty(&summary)?);
            eprintln!(
                "{} days, {} total, {} homework",
                summary.days,
                format_hms(summary.total_time),
                format_hms(summary.homework_time)
            );
        }
    }
    Ok(())
}
