use clap::{Parser, Subcommand, ValueEnum};
use ipblocks::IpType;
use std::net::IpAddr;
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage IP blocks and reverse DNS.", long_about = None)]
pub struct Args {
    /// API root URL [default: $IPBLOCKS_ENDPOINT or https://eu.api.ovh.com/1.0]
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the account's IP blocks
    List(ListArgs),

    /// Show the properties of an IP block
    Get {
        /// IP block (e.g. 91.121.78.23/32)
        block: String,
    },

    /// Set the description of an IP block
    Describe {
        /// IP block (e.g. 91.121.78.23/32)
        block: String,

        /// New description
        description: String,
    },

    /// Read or set the reverse DNS name of an IP address
    #[command(subcommand)]
    Reverse(ReverseCommand),

    /// Print every address of a CIDR block, one per line (offline)
    Expand {
        /// CIDR block (e.g. 192.168.1.0/30)
        cidr: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Include blocks with this description
    #[arg(short = 'd', long)]
    pub description: Option<String>,

    /// Include only this block
    #[arg(long)]
    pub ip: Option<String>,

    /// Include blocks routed to this service
    #[arg(short = 'r', long = "routed-to")]
    pub routed_to: Option<String>,

    /// Include blocks of this type
    #[arg(short = 't', long = "type", value_parser = IpType::known)]
    pub ip_type: Option<IpType>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Save the results to a CSV file
    #[arg(long = "csv")]
    pub csv_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ReverseCommand {
    /// Show the reverse DNS name of an IP address
    Get {
        ip: IpAddr,
    },

    /// Set the reverse DNS name of an IP address
    Set {
        ip: IpAddr,

        /// Reverse DNS name, without the trailing dot
        name: String,
    },
}

/*--------------------------------------------------------------------------------------
  Output Format
--------------------------------------------------------------------------------------*/

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    /// Table of IP blocks
    Table,

    /// List of block identifiers
    Blocks,
}
