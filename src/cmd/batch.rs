//! Batch command - compare purchase scenarios from a CSV file

use super::{load_tax_schedule, open_input};
use clap::Args;
use homecalc::scenario::{self, ScenarioOutcome};
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct BatchCommand {
    /// Scenarios CSV file. Reads from stdin if not specified.
    #[arg(default_value = "-")]
    scenarios: PathBuf,

    /// JSON file with the land transfer tax brackets (default: built-in Ontario schedule)
    #[arg(short, long)]
    tax_schedule: Option<PathBuf>,
}

impl BatchCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schedule = load_tax_schedule(self.tax_schedule.as_ref())?;
        let records = scenario::read_scenarios(open_input(&self.scenarios)?)?;

        let outcomes = records
            .iter()
            .map(|record| scenario::evaluate(&schedule, record))
            .collect::<Result<Vec<ScenarioOutcome>, _>>()?;

        scenario::write_outcomes(&outcomes, io::stdout())?;
        Ok(())
    }
}
