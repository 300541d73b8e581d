//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use gridcalc_core::Grid;

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a grid
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Grid> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a grid
    ///
    /// Every record must have the same number of fields as the header. The
    /// delimiter must be a single ASCII byte so it renders back unchanged.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Grid> {
        if !options.delimiter.is_ascii() {
            return Err(CsvError::UnsupportedInputFormat(format!(
                "delimiter byte 0x{:02x} is not ASCII",
                options.delimiter
            )));
        }

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(false)
            .trim(if options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let record = result.map_err(Self::classify)?;
            records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        if records.is_empty() {
            return Err(CsvError::UnsupportedInputFormat("input is empty".into()));
        }

        log::debug!(
            "read {} records of {} fields",
            records.len(),
            records[0].len()
        );

        Ok(Grid::from_records(records, options.delimiter)?)
    }

    /// Shape problems are reported as an unsupported format, everything else as is
    fn classify(err: csv::Error) -> CsvError {
        let message = match err.kind() {
            csv::ErrorKind::UnequalLengths {
                pos,
                expected_len,
                len,
            } => {
                let line = pos.as_ref().map(|p| p.line()).unwrap_or_default();
                Some(format!(
                    "line {} has {} fields, expected {}",
                    line, len, expected_len
                ))
            }
            csv::ErrorKind::Utf8 { .. } => Some("input is not valid UTF-8".to_string()),
            _ => None,
        };

        match message {
            Some(message) => CsvError::UnsupportedInputFormat(message),
            None => CsvError::Csv(err),
        }
    }
}
