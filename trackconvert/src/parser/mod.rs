//! Track CSV reader with comment stripping and header inference.
//!
//! Input files are loosely formatted: `#` comment lines, blank lines,
//! and either a header row or bare positional data. Everything is
//! normalized into a [`TrackSequence`] of trimmed string values.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::{
    HeaderDescriptor, TrackSample, TrackSequence, COLUMN_WIDTH_LEFT, COLUMN_WIDTH_RIGHT,
    COLUMN_X, COLUMN_Y, HEADERLESS_COLUMNS,
};

/// Lines starting with this marker (after trimming) are ignored.
pub const COMMENT_MARKER: char = '#';

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed samples, in file order
    pub samples: TrackSequence,
    /// Header resolution for this file
    pub header: HeaderDescriptor,
    /// Detected encoding
    pub encoding: String,
}

impl ParseResult {
    /// Resolved column names (declared header, or the positional default).
    pub fn columns(&self) -> Vec<String> {
        self.header.columns()
    }
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// Unknown encodings and invalid UTF-8 fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let decoded = match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    };

    match decoded.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => decoded,
    }
}

/// Trim every line and drop blank and comment lines.
pub fn strip_comments(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
        .collect()
}

/// Decide whether `first_line` is a header row.
///
/// A numeric first field means the file carries data only.
pub fn infer_header(first_line: &str) -> HeaderDescriptor {
    let first_field = first_line.split(',').next().unwrap_or("").trim();

    if first_field.parse::<f64>().is_ok() {
        HeaderDescriptor::Headerless
    } else {
        let columns = first_line
            .split(',')
            .map(|c| c.trim().trim_matches('"').to_string())
            .collect();
        HeaderDescriptor::Headered { columns }
    }
}

/// Parse a track file from disk.
///
/// # Example
/// ```ignore
/// let result = parse_track_file("monza.csv")?;
/// println!("{} samples ({})", result.samples.len(), result.encoding);
/// ```
pub fn parse_track_file<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_track_bytes(&bytes)
}

/// Parse raw track bytes with encoding detection.
pub fn parse_track_bytes(bytes: &[u8]) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    parse_track_str(&content, encoding)
}

/// Parse decoded track content.
pub fn parse_track_str(content: &str, encoding: String) -> CsvResult<ParseResult> {
    let lines = strip_comments(content);
    let first_line = lines.first().ok_or(CsvError::EmptyInput)?;

    let (header, samples) = match infer_header(first_line) {
        HeaderDescriptor::Headerless => {
            (HeaderDescriptor::Headerless, parse_headerless(&lines)?)
        }
        HeaderDescriptor::Headered { .. } => {
            let (columns, samples) = parse_headered(&lines)?;
            (HeaderDescriptor::Headered { columns }, samples)
        }
    };

    Ok(ParseResult {
        samples: TrackSequence::new(samples)?,
        header,
        encoding,
    })
}

fn parse_headerless(lines: &[&str]) -> CsvResult<Vec<TrackSample>> {
    let expected = HEADERLESS_COLUMNS.len();

    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let values: Vec<&str> = line.split(',').map(str::trim).collect();
            match values.as_slice() {
                [x, y, right, left] => Ok(TrackSample::new(*x, *y, *right, *left)),
                _ => Err(CsvError::ColumnCount {
                    line: idx + 1,
                    expected,
                    found: values.len(),
                }),
            }
        })
        .collect()
}

/// Returns the header names as the CSV reader resolved them, plus the rows.
fn parse_headered(lines: &[&str]) -> CsvResult<(Vec<String>, Vec<TrackSample>)> {
    let joined = lines.join("\n");
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(joined.as_bytes());

    let headers = reader.headers()?.clone();
    let x = column_index(&headers, COLUMN_X)?;
    let y = column_index(&headers, COLUMN_Y)?;
    let right = column_index(&headers, COLUMN_WIDTH_RIGHT)?;
    let left = column_index(&headers, COLUMN_WIDTH_LEFT)?;

    let mut samples = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        samples.push(TrackSample::new(field(x), field(y), field(right), field(left)));
    }

    let columns = headers.iter().map(str::to_string).collect();
    Ok((columns, samples))
}

/// Position of `name` in the header. Later duplicates win.
fn column_index(headers: &StringRecord, name: &str) -> CsvResult<usize> {
    headers
        .iter()
        .collect::<Vec<_>>()
        .iter()
        .rposition(|h| h.trim() == name)
        .ok_or_else(|| CsvError::MissingColumn(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> CsvResult<ParseResult> {
        parse_track_str(content, "utf-8".to_string())
    }

    #[test]
    fn test_headered_csv() {
        let csv = "x_m,y_m,w_tr_right_m,w_tr_left_m\n0,0,3,3\n10,0,3,3\n20,0,3,3";
        let result = parse(csv).unwrap();

        assert!(result.header.is_headered());
        assert_eq!(result.samples.len(), 3);
        assert_eq!(result.samples.samples()[1], TrackSample::new("10", "0", "3", "3"));
    }

    #[test]
    fn test_headerless_csv() {
        let result = parse("0,0,3,2\n1789,0,3,2").unwrap();

        assert_eq!(result.header, HeaderDescriptor::Headerless);
        assert_eq!(result.columns(), HEADERLESS_COLUMNS.to_vec());
        assert_eq!(result.samples.samples()[1].x, "1789");
        assert_eq!(result.samples.samples()[1].width_left, "2");
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let csv = "# generated by some tool\n\n  # x_m,y_m\nx_m,y_m,w_tr_right_m,w_tr_left_m\n# mid comment\n1.5,2.5,3,4\n\n";
        let result = parse(csv).unwrap();

        assert_eq!(result.samples.len(), 1);
        assert_eq!(result.samples.samples()[0], TrackSample::new("1.5", "2.5", "3", "4"));
    }

    #[test]
    fn test_header_order_from_file() {
        let csv = "# x_m,y_m,w_tr_right_m,w_tr_left_m\n w_tr_left_m , x_m,extra, y_m,w_tr_right_m\n1, 2 ,9,3,4";
        let result = parse(csv).unwrap();

        assert_eq!(result.columns(), vec!["w_tr_left_m", "x_m", "extra", "y_m", "w_tr_right_m"]);
        assert_eq!(result.samples.samples()[0], TrackSample::new("2", "3", "4", "1"));
    }

    #[test]
    fn test_values_preserved_verbatim() {
        let result = parse("  -1.500000, 0.25 ,3.10,2.90  ").unwrap();
        let sample = &result.samples.samples()[0];

        assert_eq!(sample.x, "-1.500000");
        assert_eq!(sample.y, "0.25");
        assert_eq!(sample.width_right, "3.10");
        assert_eq!(sample.width_left, "2.90");
    }

    #[test]
    fn test_empty_input_error() {
        let result = parse("# only comments\n\n   \n#another");
        assert!(matches!(result, Err(CsvError::EmptyInput)));

        let result = parse("");
        assert!(matches!(result, Err(CsvError::EmptyInput)));
    }

    #[test]
    fn test_header_without_rows_is_empty() {
        let result = parse("x_m,y_m,w_tr_right_m,w_tr_left_m\n# nothing else");
        assert!(matches!(result, Err(CsvError::EmptyInput)));
    }

    #[test]
    fn test_headerless_column_count_error() {
        let result = parse("0,0,3,3\n1,0,3");
        match result {
            Err(CsvError::ColumnCount { line, expected, found }) => {
                assert_eq!(line, 2);
                assert_eq!(expected, 4);
                assert_eq!(found, 3);
            }
            other => panic!("expected ColumnCount, got {:?}", other),
        }

        let result = parse("0,0,3,3,9");
        assert!(matches!(result, Err(CsvError::ColumnCount { found: 5, .. })));
    }

    #[test]
    fn test_missing_required_column() {
        let result = parse("x_m,y_m,w_tr_right_m\n0,0,3");
        match result {
            Err(CsvError::MissingColumn(name)) => assert_eq!(name, "w_tr_left_m"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_short_headered_row_reads_empty() {
        let result = parse("x_m,y_m,w_tr_right_m,w_tr_left_m\n5,6").unwrap();
        let sample = &result.samples.samples()[0];

        assert_eq!(sample.x, "5");
        assert_eq!(sample.width_right, "");
        assert_eq!(sample.width_left, "");
    }

    #[test]
    fn test_quoted_headered_values() {
        let csv = "\"x_m\",\"y_m\",\"w_tr_right_m\",\"w_tr_left_m\"\n\"1\",\"2\",\"3\",\"4\"";
        let result = parse(csv).unwrap();
        assert_eq!(result.samples.samples()[0], TrackSample::new("1", "2", "3", "4"));
    }

    #[test]
    fn test_quoted_header_with_comma() {
        let csv = "\"x_m\",\"note, free text\",y_m,w_tr_right_m,w_tr_left_m\n1,\"a, b\",2,3,4";
        let result = parse(csv).unwrap();

        assert_eq!(
            result.columns(),
            vec!["x_m", "note, free text", "y_m", "w_tr_right_m", "w_tr_left_m"]
        );
        assert_eq!(result.samples.samples()[0], TrackSample::new("1", "2", "3", "4"));
    }

    #[test]
    fn test_infer_header() {
        assert_eq!(infer_header("0,0,3,3"), HeaderDescriptor::Headerless);
        assert_eq!(infer_header("-12.5e3,0,3,3"), HeaderDescriptor::Headerless);
        assert!(infer_header("x_m,y_m,w_tr_right_m,w_tr_left_m").is_headered());
    }

    #[test]
    fn test_bom_removed() {
        let bytes = "\u{feff}x_m,y_m,w_tr_right_m,w_tr_left_m\n1,2,3,4".as_bytes();
        let result = parse_track_bytes(bytes).unwrap();
        assert!(result.header.is_headered());
        assert_eq!(result.samples.len(), 1);
    }

    #[test]
    fn test_latin1_decoding() {
        // "Québec" in ISO-8859-1
        let bytes: &[u8] = &[0x51, 0x75, 0xE9, 0x62, 0x65, 0x63];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Québec");
    }
}
