//! Logger initialisation for the CLI.
//!
//! Logs go to stderr so stdout carries nothing but the JSON output.

use std::io::Write;

use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

use crate::CliError;

pub(crate) fn init_logger(level: LevelFilter) -> Result<(), CliError> {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .write_style(WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        });
    builder.try_init().map_err(CliError::InitLogger)
}
