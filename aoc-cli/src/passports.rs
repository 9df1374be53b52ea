//! `aoc passports`: validate a passport batch file and export the valid ones

use crate::cli::PassportArgs;
use crate::error::CliError;
use crate::inputs::read_input;
use crate::output::PassportReport;
use aoc_2020::year_2020::day_4::{Validation, count_valid, export_valid, parse_batch};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Validate the batch at `args.input`; `verbose` logs per-passport diagnostics
pub fn run(args: &PassportArgs, verbose: bool) -> Result<PassportReport, CliError> {
    let input = read_input(&args.input)?;
    let batch = parse_batch(&input)?;
    info!("read {} passports from {}", batch.len(), args.input.display());

    let present = count_valid(&batch, Validation::Presence);
    let valid = batch.iter().filter(|p| p.validate(verbose)).count();

    if let Some(path) = &args.export {
        let table = export_valid(&batch);
        write_export(path, |writer| table.write_csv(writer))?;
        info!(
            "exported {} passports with {} columns to {}",
            table.len(),
            table.columns().len(),
            path.display()
        );
    }

    Ok(PassportReport { present, valid })
}

fn write_export(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
) -> Result<(), CliError> {
    let export_error = |source| CliError::Export {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(export_error)?);
    write(&mut writer).map_err(export_error)?;
    writer.flush().map_err(export_error)
}
