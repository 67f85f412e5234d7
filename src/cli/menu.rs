//! Interactive numbered menu
//!
//! Generic over its input and output so sessions can be scripted.

use super::Session;
use crate::error::ConversionError;
use crate::units::{Category, UnitTable};
use crate::utils;
use anyhow::Result;
use std::io::{BufRead, Write};

pub struct Menu<'a, R, W> {
    session: &'a mut Session,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(session: &'a mut Session, input: R, out: W) -> Self {
        Self {
            session,
            input,
            out,
        }
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        self.print_welcome()?;

        loop {
            self.print_menu()?;
            let Some(choice) = self.ask("\nEnter your choice (0-9): ")? else {
                break;
            };

            match choice.as_str() {
                "0" => {
                    utils::print_success(&mut self.out, "\nThank you for using Unit Converter!")?;
                    writeln!(self.out, "Goodbye! 👋")?;
                    break;
                }
                "7" => {
                    let limit = self.session.display_limit();
                    self.session.show_history(&mut self.out, limit)?;
                }
                "8" => self.session.show_statistics(&mut self.out)?,
                "9" => self.clear_history()?,
                other => match other.parse::<usize>() {
                    Ok(n @ 1..=6) => self.run_converter(Category::ALL[n - 1])?,
                    _ => utils::print_error(&mut self.out, "Invalid choice! Please try again.")?,
                },
            }
        }

        Ok(())
    }

    fn run_converter(&mut self, category: Category) -> Result<()> {
        utils::print_header(
            &mut self.out,
            &format!("{} CONVERTER", category.name().to_uppercase()),
        )?;
        if category == Category::Currency {
            utils::print_info(&mut self.out, "Note: Rates are fixed for demo, not live.")?;
        }

        let entries = UnitTable::entries(category);
        writeln!(self.out, "Choose source unit:")?;
        for (i, (name, symbol)) in entries.iter().enumerate() {
            writeln!(self.out, "  {}. {} ({})", i + 1, name, symbol)?;
        }

        let range = format!("1-{}", entries.len());
        let Some(from) = self.ask(&format!("\nEnter choice ({}): ", range))? else {
            return Ok(());
        };
        let from = match select_unit(category, &from) {
            Ok(symbol) => symbol,
            Err(e) => return self.report(e),
        };

        let Some(to) = self.ask(&format!("Enter target unit ({}): ", range))? else {
            return Ok(());
        };
        let to = match select_unit(category, &to) {
            Ok(symbol) => symbol,
            Err(e) => return self.report(e),
        };

        let Some(value) = self.ask(&format!("\nEnter value in {}: ", from))? else {
            return Ok(());
        };
        if let Err(e) = self.session.convert(&mut self.out, category, from, to, &value) {
            self.report(e)?;
        }
        Ok(())
    }

    fn clear_history(&mut self) -> Result<()> {
        utils::print_header(&mut self.out, "🗑️  CLEAR HISTORY")?;
        let Some(answer) = self.ask("Are you sure you want to clear all history? (yes/no): ")? else {
            return Ok(());
        };

        if !answer.eq_ignore_ascii_case("yes") {
            utils::print_info(&mut self.out, "Operation cancelled.")?;
            return Ok(());
        }

        if let Err(e) = self.session.clear_history(&mut self.out) {
            utils::print_error(&mut self.out, &format!("✗ {:#}", e))?;
        }
        Ok(())
    }

    fn report(&mut self, err: ConversionError) -> Result<()> {
        utils::print_error(&mut self.out, &format!("❌ {}", err))?;
        Ok(())
    }

    /// Prompt and read one trimmed line. `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        utils::print_prompt(&mut self.out, prompt)?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn print_welcome(&mut self) -> Result<()> {
        utils::print_header(&mut self.out, "U N I T   C O N V E R T E R")?;
        writeln!(self.out, "Convert between multiple units easily!")?;
        writeln!(self.out, "  • 6 conversion categories")?;
        writeln!(self.out, "  • Conversion history and statistics")?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        utils::print_header(&mut self.out, "MAIN MENU")?;
        writeln!(self.out, "\n📋 CONVERSION CATEGORIES:")?;
        writeln!(self.out, "  1. 🌡️  Temperature Converter")?;
        writeln!(self.out, "  2. 📏 Length Converter")?;
        writeln!(self.out, "  3. ⚖️  Weight/Mass Converter")?;
        writeln!(self.out, "  4. 💰 Currency Converter")?;
        writeln!(self.out, "  5. 💾 Data Storage Converter")?;
        writeln!(self.out, "  6. ⏰ Time Converter")?;
        writeln!(self.out, "\n📊 TOOLS & HISTORY:")?;
        writeln!(self.out, "  7. 📜 View Conversion History")?;
        writeln!(self.out, "  8. 📊 View Statistics")?;
        writeln!(self.out, "  9. 🗑️  Clear History")?;
        writeln!(self.out, "  0. 🚪 Exit Program")?;
        Ok(())
    }
}

/// Map a 1-based menu choice to a unit symbol
pub fn select_unit(category: Category, choice: &str) -> Result<&'static str, ConversionError> {
    let symbols = UnitTable::symbols(category);
    choice
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| symbols.get(i).copied())
        .ok_or_else(|| ConversionError::InvalidUnitSelection {
            category,
            reason: format!("choose a number between 1 and {}", symbols.len()),
        })
}
