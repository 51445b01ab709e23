//! Member roster CSV: byte sanitizing, reading, writing.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::RecordError;

/// One roster row, keyed by header name.
pub type MemberRecord = HashMap<String, String>;

/// Parsed roster with its original column order.
#[derive(Debug, Clone, Default)]
pub struct MemberTable {
    pub columns: Vec<String>,
    pub rows: Vec<MemberRecord>,
}

impl MemberTable {
    /// Append `name` to the columns if it is not already there.
    pub fn ensure_column(&mut self, name: &str) {
        if !self.columns.iter().any(|c| c == name) {
            self.columns.push(name.to_string());
        }
    }

    /// Field value for every row; missing fields read as empty.
    pub fn field_values(&self, name: &str) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.get(name).cloned().unwrap_or_default())
            .collect()
    }
}

/// Replace every byte outside printable ASCII (32..=126) with `_`.
pub fn sanitize(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if (32..=126).contains(&b) { b as char } else { '_' })
        .collect()
}

/// Parse raw roster bytes: per-line trim and sanitize, blank lines dropped, header required.
pub fn parse_members(bytes: &[u8]) -> Result<MemberTable, csv::Error> {
    let text = bytes
        .split(|&b| b == b'\n')
        .map(<[u8]>::trim_ascii)
        .filter(|line| !line.is_empty())
        .map(sanitize)
        .collect::<Vec<_>>()
        .join("\n");

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row = columns
            .iter()
            .enumerate()
            .map(|(i, column)| (column.clone(), record.get(i).unwrap_or("").to_string()))
            .collect();
        rows.push(row);
    }

    Ok(MemberTable { columns, rows })
}

/// Read and parse a roster file.
pub fn read_members(path: &Path) -> Result<MemberTable, RecordError> {
    let bytes = fs::read(path).map_err(|source| RecordError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_members(&bytes)?;
    tracing::info!("read {} member records from {:?}", table.rows.len(), path);
    Ok(table)
}

/// Write header then rows in column order, CRLF terminated. Returns rows written.
pub fn write_members<W: Write>(writer: W, table: &MemberTable) -> Result<usize, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    wtr.write_record(&table.columns)?;
    let mut written = 0;
    for row in &table.rows {
        wtr.write_record(
            table
                .columns
                .iter()
                .map(|column| row.get(column).map(String::as_str).unwrap_or("")),
        )?;
        written += 1;
    }
    wtr.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_byte_range() {
        assert_eq!(sanitize(&[200]), "_");
        assert_eq!(sanitize(&[65]), "A");
        assert_eq!(sanitize(&[31, 32, 126, 127]), "_ ~_");
        // UTF-8 curly quote is three high bytes
        assert_eq!(sanitize("it\u{2019}s".as_bytes()), "it___s");
    }

    #[test]
    fn test_parse_members() {
        let data = b"Name,Short bio\r\nAnn,Loves birds\r\n\r\nBob,\"Plays piano, guitar\"\r\n";
        let table = parse_members(data).unwrap();
        assert_eq!(table.columns, vec!["Name", "Short bio"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0]["Short bio"], "Loves birds");
        assert_eq!(table.rows[1]["Short bio"], "Plays piano, guitar");
    }

    #[test]
    fn test_parse_sanitizes_latin1() {
        let mut data = b"Name,Short bio\nJos".to_vec();
        data.push(0xE9);
        data.extend_from_slice(b",caf\xE9 owner\n");
        let table = parse_members(&data).unwrap();
        assert_eq!(table.rows[0]["Name"], "Jos_");
        assert_eq!(table.rows[0]["Short bio"], "caf_ owner");
    }

    #[test]
    fn test_short_rows_padded() {
        let table = parse_members(b"Name,Short bio,Email\nAnn,hi\n").unwrap();
        assert_eq!(table.rows[0]["Email"], "");
        assert_eq!(table.field_values("Short bio"), vec!["hi"]);
        assert_eq!(table.field_values("Missing"), vec![""]);
    }

    #[test]
    fn test_write_members_roundtrip_order() {
        let mut table = parse_members(b"Name,Short bio\nAnn,birds\n").unwrap();
        table.ensure_column("Taxonomy terms");
        table.ensure_column("Taxonomy terms");
        table.rows[0].insert("Taxonomy terms".into(), "Biology|Nature".into());

        let mut out = Vec::new();
        let n = write_members(&mut out, &table).unwrap();
        assert_eq!(n, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Name,Short bio,Taxonomy terms\r\nAnn,birds,Biology|Nature\r\n"
        );
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_members(&dir.path().join("members.csv")).unwrap_err();
        assert!(matches!(err, RecordError::Io { .. }));
    }
}
