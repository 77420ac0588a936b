use bikebuyer_core::AppConfig;
use bikebuyer_history::HistoryStore;
use clap::Subcommand;

use crate::predict::fmt_figure;

/// Sub-commands available under `history`.
#[derive(Debug, Subcommand)]
pub enum HistoryCommands {
    /// List recorded submissions, most recent first
    List,
    /// Remove one entry by its index in `history list`
    Remove { index: usize },
    /// Remove every entry
    Clear,
}

pub(crate) fn run_history(config: &AppConfig, command: HistoryCommands) -> anyhow::Result<()> {
    let mut store = HistoryStore::open(&config.history_path);

    match command {
        HistoryCommands::List => {
            if store.rows().is_empty() {
                println!("no history yet; run `predict` first");
                return Ok(());
            }
            println!(
                "{:<5}{:<22}{:<30}{:<7}{:<12}DATE",
                "IDX", "NAME", "EMAIL", "BUYER", "PERCENTILE"
            );
            for (index, row) in store.rows().iter().enumerate() {
                let name = format!("{} {}", row.first_name, row.last_name);
                println!(
                    "{:<5}{:<22}{:<30}{:<7}{:<12}{}",
                    index,
                    name,
                    row.email,
                    if row.is_buyer { "yes" } else { "no" },
                    fmt_figure(row.percentile),
                    row.date.format("%Y-%m-%d %H:%M")
                );
            }
        }
        HistoryCommands::Remove { index } => match store.remove(index)? {
            Some(row) => println!("removed {} {}", row.first_name, row.last_name),
            None => println!("no entry at index {index}"),
        },
        HistoryCommands::Clear => {
            store.clear()?;
            println!("history cleared");
        }
    }

    Ok(())
}
