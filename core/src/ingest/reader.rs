use crate::catalog::{CatalogRecord, CatalogTable};
use crate::ingest::columns::{Column, ColumnMap};
use crate::ingest::parse::{
    parse_date, parse_pages, parse_rating, parse_read_count, parse_year, Parsed,
};
use crate::prelude::{CatalogResult, ParseWarning};
use crate::telemetry::LogManager;
use csv::ByteRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Loads a catalog export into a normalized [`CatalogTable`].
pub struct CatalogReader {
    logger: LogManager,
}

impl CatalogReader {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new("ingest"),
        }
    }

    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> CatalogResult<CatalogTable> {
        let path = path.as_ref();
        self.logger
            .record(&format!("loading catalog {}", path.display()));
        let file = File::open(path)?;
        self.load_reader(file)
    }

    pub fn load_str(&self, contents: &str) -> CatalogResult<CatalogTable> {
        self.load_reader(contents.as_bytes())
    }

    pub fn load_reader<R: Read>(&self, source: R) -> CatalogResult<CatalogTable> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(source);

        let columns = ColumnMap::resolve(reader.byte_headers()?)?;
        let missing = columns.missing();
        if !missing.is_empty() {
            self.logger.record(&format!(
                "columns absent, treated as empty: {}",
                missing.join(", ")
            ));
        }

        let mut records = Vec::new();
        let mut warnings = Vec::new();
        let mut row = ByteRecord::new();
        while reader.read_byte_record(&mut row)? {
            let line = row
                .position()
                .map_or(0, |position| position.line() as usize);
            records.push(normalize_row(&columns, &row, line, &mut warnings));
        }

        for warning in &warnings {
            self.logger.warning(warning);
        }
        self.logger.record(&format!(
            "normalized {} rows with {} warnings",
            records.len(),
            warnings.len()
        ));

        Ok(CatalogTable::with_diagnostics(records, warnings, missing))
    }
}

impl Default for CatalogReader {
    fn default() -> Self {
        Self::new()
    }
}

fn coerce<T>(
    columns: &ColumnMap,
    column: Column,
    row: &ByteRecord,
    line: usize,
    warnings: &mut Vec<ParseWarning>,
    parse: fn(&str) -> Parsed<T>,
) -> Option<T> {
    let cell = columns.cell(column, row)?;
    let parsed = parse(&cell);
    if parsed.is_malformed() {
        warnings.push(ParseWarning {
            line,
            column: column.header().to_string(),
            value: cell.into_owned(),
        });
    }
    parsed.value()
}

fn normalize_row(
    columns: &ColumnMap,
    row: &ByteRecord,
    line: usize,
    warnings: &mut Vec<ParseWarning>,
) -> CatalogRecord {
    let text = |column| {
        columns
            .cell(column, row)
            .map(|cell| cell.into_owned())
            .unwrap_or_default()
    };

    CatalogRecord {
        title: text(Column::Title),
        author: text(Column::Author),
        rating: coerce(columns, Column::MyRating, row, line, warnings, parse_rating),
        pages: coerce(columns, Column::NumberOfPages, row, line, warnings, parse_pages),
        year_published: coerce(columns, Column::YearPublished, row, line, warnings, parse_year),
        date_added: coerce(columns, Column::DateAdded, row, line, warnings, parse_date),
        date_read: coerce(columns, Column::DateRead, row, line, warnings, parse_date),
        read_count: coerce(columns, Column::ReadCount, row, line, warnings, parse_read_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::CatalogError;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "Book Id,Title,Author,My Rating,Number of Pages,Year Published,Date Added,Date Read,Read Count\n";

    #[test]
    fn reader_keeps_one_record_per_row() {
        let csv = format!(
            "{HEADER}\
             1,Dune,Frank Herbert,5,412,1965,2023/01/15,2023/02/01,1\n\
             2,\"Piranesi, Deluxe\",Susanna Clarke,,0,2020,bad-date,,0\n\
             3,Emma,Jane Austen,9,abc,circa 1815,2022/07/04,,\n"
        );
        let table = CatalogReader::new().load_str(&csv).unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.missing_columns().is_empty());

        let dune = &table.records()[0];
        assert_eq!(dune.title, "Dune");
        assert_eq!(dune.rating, Some(5));
        assert_eq!(dune.pages, Some(412));
        assert_eq!(dune.date_added, NaiveDate::from_ymd_opt(2023, 1, 15));
        assert!(dune.is_read());

        let piranesi = &table.records()[1];
        assert_eq!(piranesi.title, "Piranesi, Deluxe");
        assert_eq!(piranesi.pages, None);
        assert_eq!(piranesi.date_added, None);
        assert_eq!(piranesi.read_count, Some(0));

        let emma = &table.records()[2];
        assert_eq!(emma.rating, None);
        assert_eq!(emma.year_published, None);
        assert_eq!(emma.read_count, None);

        let columns: Vec<&str> = table.warnings().iter().map(|w| w.column.as_str()).collect();
        assert_eq!(
            columns,
            vec!["Date Added", "My Rating", "Number of Pages", "Year Published"]
        );
        assert_eq!(table.warnings()[0].line, 3);
        assert_eq!(table.warnings()[0].value, "bad-date");
    }

    #[test]
    fn missing_columns_read_as_absent() {
        let csv = "Title,Author\nDune,Frank Herbert\nEmma,Jane Austen\n";
        let table = CatalogReader::new().load_str(csv).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.missing_columns().len(), 6);
        assert!(table.records().iter().all(|r| r.date_added.is_none()));
        assert!(table.warnings().is_empty());
    }

    #[test]
    fn unrelated_file_is_a_schema_error() {
        let csv = "sku,price\nA1,3.50\n";
        let err = CatalogReader::new().load_str(csv).unwrap_err();
        assert!(matches!(err, CatalogError::Schema { .. }));
        assert!(err.to_string().contains("Date Added"));
    }

    #[test]
    fn ragged_rows_are_tolerated() {
        let csv = format!("{HEADER}1,Dune\n2,Emma,Jane Austen,4,300,1815,2022/07/04,,1,extra\n");
        let table = CatalogReader::new().load_str(&csv).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].author, "");
        assert_eq!(table.records()[1].rating, Some(4));
    }

    #[test]
    fn load_path_reads_files() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(format!("{HEADER}1,Dune,Frank Herbert,5,412,1965,2023/01/15,,1\n").as_bytes())
            .unwrap();
        let path = temp.into_temp_path();
        let table = CatalogReader::new().load_path(&path).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = CatalogReader::new()
            .load_path("/nonexistent/catalog.csv")
            .unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
