//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use gridcalc_core::Grid;

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a grid to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        grid: &Grid,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(grid, file, options)
    }

    /// Write a grid to a writer
    ///
    /// The header record is an empty field followed by the column names; each
    /// data record is the row name followed by its cells. Fields are quoted only
    /// when needed.
    pub fn write<W: Write>(grid: &Grid, writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter.unwrap_or(grid.delimiter()))
            .quote(options.quote)
            .terminator(terminator)
            .from_writer(writer);

        let header = std::iter::once("").chain(grid.column_names().iter().map(String::as_str));
        csv_writer.write_record(header)?;

        for (row_name, cells) in grid.row_names().iter().zip(grid.rows()) {
            let record = std::iter::once(row_name.as_str()).chain(cells.iter().map(String::as_str));
            csv_writer.write_record(record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CsvReadOptions;
    use crate::reader::CsvReader;
    use pretty_assertions::assert_eq;

    fn grid(data: &str, delimiter: u8) -> Grid {
        CsvReader::read(data.as_bytes(), &CsvReadOptions::with_delimiter(delimiter)).unwrap()
    }

    fn written(grid: &Grid, options: &CsvWriteOptions) -> String {
        let mut out = Vec::new();
        CsvWriter::write(grid, &mut out, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_keeps_delimiter() {
        let grid = grid(";A;B\n1;5;8\n", b';');
        assert_eq!(written(&grid, &CsvWriteOptions::default()), ";A;B\n1;5;8\n");
    }

    #[test]
    fn test_write_override_delimiter_and_terminator() {
        let grid = grid(",A,B\n1,5,8\n2,40,2\n", b',');
        let options = CsvWriteOptions {
            delimiter: Some(b'\t'),
            line_terminator: LineTerminator::CRLF,
            ..Default::default()
        };
        assert_eq!(written(&grid, &options), "\tA\tB\r\n1\t5\t8\r\n2\t40\t2\r\n");
    }

    #[test]
    fn test_write_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let original = grid(",A,B\n1,5,=A1+3\n", b',');

        CsvWriter::write_file(&original, &path, &CsvWriteOptions::default()).unwrap();
        let reread = CsvReader::read_file(&path, &CsvReadOptions::default()).unwrap();

        assert_eq!(reread.render(), original.render());
    }
}
