mod cli;

use clap::Parser;
use cli::{Command, OutputFormat, ReverseCommand};
use ipblocks::IpBlock;
use log::{error, info};
use std::io::{self, Write};
use std::process::ExitCode;

/*-------------------------------------------------------------------------------------------------
  Main CLI Function
-------------------------------------------------------------------------------------------------*/

fn main() -> ExitCode {
    let args = cli::Args::parse();

    // Initialize logging
    let logging = stderrlog::new()
        .module(module_path!())
        .quiet(args.verbose.is_silent())
        .verbosity(args.verbose.log_level().map_or(0, |level| level as usize - 1))
        .init();
    if let Err(error) = logging {
        eprintln!("Failed to initialize logging: {error}");
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &cli::Args) -> cli::Result<()> {
    match &args.command {
        /*-----------------------------------------------------------------------------
          Offline Commands
        -----------------------------------------------------------------------------*/
        Command::Expand { cidr } => {
            let mut stdout = io::stdout().lock();
            for address in ipblocks::enumerate_addresses(cidr)? {
                writeln!(stdout, "{address}")?;
            }
            stdout.flush()?;
        }

        /*-----------------------------------------------------------------------------
          IP Blocks
        -----------------------------------------------------------------------------*/
        Command::List(list_args) => {
            let client = cli::build_client(args)?;
            let filter = cli::build_filter(list_args);
            let records = client.list_blocks(&filter)?;

            cli::log::list_results(&filter, &records);

            match list_args.output {
                OutputFormat::Table => cli::output::block_table(&records),
                OutputFormat::Blocks => cli::output::blocks(&records),
            }

            if let Some(csv_file) = &list_args.csv_file {
                cli::csv::save(&records, csv_file)?;
                info!("Saved {} IP block(s) to {}", records.len(), csv_file.display());
            }
        }
        Command::Get { block } => {
            let client = cli::build_client(args)?;
            let record = client.get_block_properties(&IpBlock::from(block.as_str()))?;
            println!("{record}");
        }
        Command::Describe { block, description } => {
            let client = cli::build_client(args)?;
            client.update_block_description(&IpBlock::from(block.as_str()), description)?;
            info!("Updated the description of {block}");
        }

        /*-----------------------------------------------------------------------------
          Reverse DNS
        -----------------------------------------------------------------------------*/
        Command::Reverse(ReverseCommand::Get { ip }) => {
            let client = cli::build_client(args)?;
            println!("{}", client.get_reverse(*ip)?);
        }
        Command::Reverse(ReverseCommand::Set { ip, name }) => {
            let client = cli::build_client(args)?;
            let confirmation = client.set_reverse(*ip, name)?;
            println!("{confirmation}");
        }
    }

    Ok(())
}
