//! Operations shared by the interactive menu and the one-shot subcommands

use crate::conversion::{parse_value, Converter};
use crate::error::ConversionError;
use crate::history::{AppendOutcome, HistoryStore};
use crate::stats::summarize;
use crate::units::{Category, UnitTable};
use crate::utils;
use crate::Settings;
use anyhow::{Context, Result};
use std::io::Write;

pub struct Session {
    converter: Converter,
    store: HistoryStore,
    display_limit: usize,
}

impl Session {
    pub fn new(converter: Converter, store: HistoryStore, display_limit: usize) -> Self {
        Self {
            converter,
            store,
            display_limit,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let converter = Converter::new()
            .with_distinct_temperature_units(settings.conversion.distinct_temperature_units);
        Self::new(
            converter,
            HistoryStore::new(settings.history.dir.clone()),
            settings.history.display_limit,
        )
    }

    pub fn store(&mut self) -> &mut HistoryStore {
        &mut self.store
    }

    pub fn display_limit(&self) -> usize {
        self.display_limit
    }

    /// Convert, print the result and record it.
    ///
    /// Conversion errors are returned; history failures only produce a
    /// notice since the result has already been shown.
    pub fn convert(
        &mut self,
        out: &mut impl Write,
        category: Category,
        from: &str,
        to: &str,
        value: &str,
    ) -> Result<f64, ConversionError> {
        let value = parse_value(value)?;
        let record = self.converter.record(category, from, to, value)?;
        let result = record.output_value;

        let line = format!(
            "✅ {} {} = {:.*} {}",
            record.input_value,
            record.from_symbol,
            category.display_precision(),
            result,
            record.to_symbol
        );
        // Display errors are not conversion errors; the result stands
        let _ = utils::print_success(out, &line);

        match self.store.append(record) {
            AppendOutcome::Stored => {}
            AppendOutcome::Degraded { cause } => {
                if let Some(cause) = cause {
                    tracing::info!("History saved as plain text: {}", cause);
                }
            }
            AppendOutcome::Skipped { .. } => {
                let _ = utils::print_info(out, "Note: this conversion could not be saved to history.");
            }
        }

        Ok(result)
    }

    pub fn show_history(&mut self, out: &mut impl Write, limit: usize) -> Result<()> {
        utils::print_header(out, "📜 CONVERSION HISTORY")?;

        let total = self.store.len();
        if total == 0 {
            utils::print_info(out, "No conversion history found.")?;
            return Ok(());
        }

        writeln!(out, "Total conversions: {}\n", total)?;
        for record in self.store.list(limit) {
            writeln!(out, "{} | {}", record.timestamp, record.category)?;
            writeln!(
                out,
                "  {} {} → {:.4} {}",
                record.input_value, record.from_symbol, record.output_value, record.to_symbol
            )?;
            utils::print_rule(out, 40)?;
        }
        Ok(())
    }

    pub fn show_statistics(&mut self, out: &mut impl Write) -> Result<()> {
        utils::print_header(out, "📊 CONVERSION STATISTICS")?;

        let stats = summarize(&self.store.snapshot());
        if stats.total_count == 0 {
            utils::print_info(out, "No data available.")?;
            return Ok(());
        }

        writeln!(out, "Total Conversions: {}", stats.total_count)?;
        if let Some(first) = &stats.first_timestamp {
            writeln!(out, "First Conversion: {}", first)?;
        }
        if let Some(last) = &stats.last_timestamp {
            writeln!(out, "Last Conversion: {}", last)?;
        }

        match &stats.count_by_category {
            Some(by_category) => {
                writeln!(out, "\nConversions by Type:")?;
                for (category, count) in by_category {
                    writeln!(out, "  {}: {}", category, count)?;
                }
            }
            None => {
                utils::print_info(out, "\nPer-type counts unavailable: history is stored as plain text.")?;
            }
        }
        Ok(())
    }

    pub fn clear_history(&mut self, out: &mut impl Write) -> Result<()> {
        self.store
            .clear()
            .context("Error clearing history")?;
        utils::print_success(out, "✓ History cleared successfully!")?;
        Ok(())
    }

    pub fn show_units(&self, out: &mut impl Write, category: Option<Category>) -> Result<()> {
        let categories = match category {
            Some(category) => vec![category],
            None => Category::ALL.to_vec(),
        };

        for category in categories {
            utils::print_header(out, &format!("{} (base: {})", category, category.base_symbol()))?;
            for (i, (name, symbol)) in UnitTable::entries(category).into_iter().enumerate() {
                writeln!(out, "  {}. {} ({})", i + 1, name, symbol)?;
            }
        }
        Ok(())
    }
}
