//! Clean CSV output: one `x,y,wide_right,wide_left` header, then the rows.
//!
//! Comment lines from the input never make it here. Records end in `\r\n`.

use csv::{Terminator, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::models::{OutputRecord, OUTPUT_HEADER};

/// Write `records` as CSV to any writer.
pub fn write_records<W: Write>(writer: W, records: &[OutputRecord]) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    wtr.write_record(OUTPUT_HEADER)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    Ok(())
}

/// Write `records` to `path`, creating or truncating the file.
pub fn write_records_to_path(path: &Path, records: &[OutputRecord]) -> PipelineResult<()> {
    let file = File::create(path).map_err(|e| PipelineError::filesystem(path, e))?;
    write_records(file, records)?;
    Ok(())
}
