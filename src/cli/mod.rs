/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Modules
-------------------------------------------------------------------------------------------------*/

mod args;
mod core;

pub mod csv;
pub mod log;
pub mod output;

/*--------------------------------------------------------------------------------------
  CLI Module Interface
--------------------------------------------------------------------------------------*/

pub use args::{Args, Command, ListArgs, OutputFormat, ReverseCommand};
pub use self::core::{build_client, build_filter};

// Error type alias used by the CLI; wraps client, CSV, and I/O errors.
pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

// Result type alias used by the CLI.
pub type Result<T> = std::result::Result<T, Error>;
