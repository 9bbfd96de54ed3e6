use clap::{Parser, Subcommand};

mod cmd;

use cmd::{
    afford::AffordCommand, batch::BatchCommand, closing::ClosingCommand,
    payment::PaymentCommand, schedule::ScheduleCommand, schema::SchemaCommand,
};

#[derive(Parser, Debug)]
#[command(
    name = "homecalc",
    version,
    about = "Mortgage, affordability and closing cost calculators for home buyers"
)]
struct Cli {
    /// Log calculation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Monthly mortgage payment for a purchase
    Payment(PaymentCommand),
    /// Month-by-month amortization schedule
    Schedule(ScheduleCommand),
    /// Maximum affordable price from income and debts
    Afford(AffordCommand),
    /// Land transfer tax and closing costs
    Closing(ClosingCommand),
    /// Evaluate purchase scenarios from a CSV file
    Batch(BatchCommand),
    /// Print expected input formats
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Payment(cmd) => cmd.exec(),
        Command::Schedule(cmd) => cmd.exec(),
        Command::Afford(cmd) => cmd.exec(),
        Command::Closing(cmd) => cmd.exec(),
        Command::Batch(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}

fn init_logging(verbose: bool) {
    let filters = match std::env::var("RUST_LOG") {
        Ok(filters) => filters,
        Err(_) if verbose => "homecalc=debug".to_string(),
        Err(_) => "warn".to_string(),
    };
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();
}
