//! Inspect command implementation.
//!
//! Decodes one tick file and prints its header and leading records, for
//! eyeballing unfamiliar data before a batch run.

use anyhow::{Context, Result};
use chicama_lib::prelude::*;
use std::path::Path;

/// Decode one tick file and print its header and first `limit` records.
pub(crate) fn inspect(file: &Path, trade: bool, limit: usize) -> Result<()> {
    if trade {
        let reader = TradeReader::from_path(file)
            .with_context(|| format!("Cannot decode trade file {}", file.display()))?;
        print_header(reader.header(), reader.len());

        println!("{:>12} {:>10} {:>12}", "MILLIS", "SIZE", "PRICE");
        for i in 0..reader.len().min(limit) {
            let tick = reader.tick_at(i)?;
            println!(
                "{:>12} {:>10} {:>12.4}",
                tick.timestamp_millis, tick.size, tick.price
            );
        }
    } else {
        let reader = QuoteReader::from_path(file)
            .with_context(|| format!("Cannot decode quote file {}", file.display()))?;
        print_header(reader.header(), reader.len());

        println!(
            "{:>12} {:>8} {:>12} {:>8} {:>12} {:>12}",
            "MILLIS", "BIDSZ", "BID", "ASKSZ", "ASK", "MID"
        );
        for i in 0..reader.len().min(limit) {
            let tick = reader.tick_at(i)?;
            println!(
                "{:>12} {:>8} {:>12.4} {:>8} {:>12.4} {:>12.4}",
                tick.timestamp_millis,
                tick.bid_size,
                tick.bid_price,
                tick.ask_size,
                tick.ask_price,
                tick.mid_quote
            );
        }
    }

    Ok(())
}

fn print_header(header: chicama_lib::TickHeader, len: usize) {
    println!("Records:            {len}");
    println!(
        "Midnight (epoch s): {}",
        header.secs_from_epoch_to_midnight
    );
    let date = chrono::DateTime::from_timestamp(header.secs_from_epoch_to_midnight.into(), 0)
        .map_or_else(|| "?".to_string(), |dt| dt.format("%Y-%m-%d").to_string());
    println!("Trading date:       {date}\n");
}
