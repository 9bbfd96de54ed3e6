pub mod afford;
pub mod batch;
pub mod closing;
pub mod payment;
pub mod schedule;
pub mod schema;

use anyhow::Context;
use homecalc::calc::TaxSchedule;
use homecalc::config;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Open a file for reading, or stdin with "-"
pub fn open_input(path: &Path) -> anyhow::Result<Box<dyn Read>> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin().lock().read_to_end(&mut buffer)?;
        if buffer.is_empty() {
            anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
        }
        Ok(Box::new(io::Cursor::new(buffer)))
    } else {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn load_tax_schedule(path: Option<&PathBuf>) -> anyhow::Result<TaxSchedule> {
    Ok(config::load_tax_schedule(path.map(PathBuf::as_path))?)
}

pub fn format_money(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

pub fn format_percent(pct: Decimal) -> String {
    format!("{}%", pct.round_dp(2).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_formatting() {
        assert_eq!(format_money(dec!(2779.16)), "$2779.16");
        assert_eq!(format_money(dec!(1500)), "$1500.00");
        assert_eq!(format_money(dec!(-42.5)), "-$42.50");
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(format_percent(dec!(2.355)), "2.36%");
        assert_eq!(format_percent(dec!(4.50)), "4.5%");
        assert_eq!(format_percent(dec!(5)), "5%");
    }
}
