//! Schema command - print expected input formats

use clap::Args;
use homecalc::calc::TaxSchedule;
use homecalc::scenario::ScenarioRecord;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Which format to describe
    #[arg(value_enum, default_value = "tax-schedule")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for a land transfer tax schedule file
    TaxSchedule,
    /// CSV header row for a scenarios file
    ScenarioHeader,
    /// Scenario CSV column descriptions
    ScenarioFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::TaxSchedule => {
                let schema = schema_for!(TaxSchedule);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::ScenarioHeader => println!("{}", ScenarioRecord::csv_header()),
            SchemaFormat::ScenarioFields => {
                println!("Scenario CSV Format");
                println!("===================");
                println!();
                for field in ScenarioRecord::csv_fields() {
                    let req = if field.required { "required" } else { "optional" };
                    println!("{:18} ({:8})  {}", field.name, req, field.description);
                }
            }
        }
        Ok(())
    }
}
