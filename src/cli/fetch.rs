use super::ui;
use crate::core::{RateEntry, RateFormat, RateSnapshot, RateSource};
use crate::store::SnapshotStore;
use crate::updater::fetch_fx_rates;
use anyhow::Result;
use comfy_table::{Cell, Table};

/// Runs a single fetch, writes the snapshot and prints what was stored.
pub async fn run(
    source: &dyn RateSource,
    store: &SnapshotStore,
    format: RateFormat,
) -> Result<()> {
    let snapshot = fetch_fx_rates(source, store, format).await?;

    println!(
        "{}",
        ui::title(&format!("{} rates at {}", snapshot.base_currency, snapshot.timestamp))
    );
    println!("{}", rates_table(&snapshot));
    println!("{}", ui::subtle(&format!("Written to {}", store.path().display())));
    Ok(())
}

fn rates_table(snapshot: &RateSnapshot) -> Table {
    let mut table = match snapshot.rates.first() {
        Some(RateEntry::Raw { .. }) => ui::table_with_columns(&["Currency", "Rate"]),
        _ => ui::table_with_columns(&["Code", "Bid", "Ask"]),
    };

    for entry in &snapshot.rates {
        match entry {
            RateEntry::Raw { currency, rate } => {
                table.add_row(vec![Cell::new(currency), ui::rate_cell(*rate)]);
            }
            RateEntry::Spread { code, bid, ask } => {
                table.add_row(vec![Cell::new(code), ui::rate_cell(*bid), ui::rate_cell(*ask)]);
            }
        }
    }

    table
}
