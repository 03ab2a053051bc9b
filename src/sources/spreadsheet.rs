use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open spreadsheet: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read spreadsheet: {0}")]
    Csv(#[from] csv::Error),
}

/// Joins the non-empty cells of `column` with single spaces.
///
/// The file has no header row and rows may differ in length; rows too short
/// to have the column are skipped like empty cells.
pub fn column_text<P: AsRef<Path>>(path: P, column: usize) -> Result<String, SourceError> {
    let file = File::open(path.as_ref())?;
    ::log::info!("Reading column {} of {}", column, path.as_ref().display());
    read_column(file, column)
}

fn read_column<R: Read>(reader: R, column: usize) -> Result<String, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut cells = Vec::new();
    let mut rows = 0;
    for record in reader.records() {
        let record = record?;
        rows += 1;
        if let Some(cell) = record.get(column).map(str::trim).filter(|c| !c.is_empty()) {
            cells.push(cell.to_string());
        }
    }

    ::log::debug!("{} of {} rows have text in column {}", cells.len(), rows, column);
    Ok(cells.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_selects_column_and_drops_empty_cells() {
        let data = "1,スクラム開発\n2,\n3,チーム\n4\n";
        let text = read_column(data.as_bytes(), 1).unwrap();
        assert_eq!(text, "スクラム開発 チーム");
    }

    #[test]
    fn test_first_row_is_data() {
        let data = "見出し\n本文\n";
        assert_eq!(read_column(data.as_bytes(), 0).unwrap(), "見出し 本文");
    }

    #[test]
    fn test_column_out_of_range_is_empty() {
        let data = "a,b\nc,d\n";
        assert_eq!(read_column(data.as_bytes(), 5).unwrap(), "");
    }

    #[test]
    fn test_reads_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "x,\"声, です\"\ny,良い\n").unwrap();
        assert_eq!(column_text(file.path(), 1).unwrap(), "声, です 良い");
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(matches!(
            column_text("/no/such/file.csv", 0),
            Err(SourceError::Io(_))
        ));
    }
}
