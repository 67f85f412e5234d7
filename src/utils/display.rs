use colored::*;
use std::io::{self, Write};

pub fn print_header(out: &mut impl Write, text: &str) -> io::Result<()> {
    writeln!(out, "\n{}", text.bright_cyan().bold())?;
    writeln!(out, "{}", "=".repeat(text.chars().count()).bright_cyan())
}

pub fn print_success(out: &mut impl Write, text: &str) -> io::Result<()> {
    writeln!(out, "{}", text.green())
}

pub fn print_error(out: &mut impl Write, text: &str) -> io::Result<()> {
    writeln!(out, "{}", text.red().bold())
}

pub fn print_info(out: &mut impl Write, text: &str) -> io::Result<()> {
    writeln!(out, "{}", text.blue())
}

pub fn print_prompt(out: &mut impl Write, text: &str) -> io::Result<()> {
    write!(out, "{}", text.yellow().bold())?;
    out.flush()
}

pub fn print_rule(out: &mut impl Write, width: usize) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(width).dimmed())
}
