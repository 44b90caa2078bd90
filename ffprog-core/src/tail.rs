//! Reading the newest complete line of a growing log file.
//!
//! ffmpeg appends one vstats line per encoded frame, so the file gets long on
//! big inputs. These routines scan backwards from the end in fixed-size chunks
//! and only ever touch the bytes after the second-to-last line terminator.

use std::io::{self, Read, Seek, SeekFrom};

/// Number of bytes read per backward step.
pub const TAIL_CHUNK_SIZE: usize = 256;

const LINE_TERMINATOR: u8 = b'\n';

/// Returns the most recent complete line of `reader`, trailing whitespace
/// stripped.
///
/// `Ok(None)` means the log is not ready yet: it is shorter than two bytes,
/// or it does not yet hold a complete line preceded by a terminator. A line
/// still being written (no terminator yet) is never returned.
pub fn tail_last_line<R: Read + Seek>(reader: &mut R) -> io::Result<Option<String>> {
    let len = reader.seek(SeekFrom::End(0))?;
    if len < 2 {
        return Ok(None);
    }

    let Some(line_end) = rfind_terminator(reader, len)? else {
        return Ok(None);
    };
    let Some(prev_end) = rfind_terminator(reader, line_end)? else {
        return Ok(None);
    };

    let start = prev_end + 1;
    let mut line = vec![0u8; (line_end - start) as usize];
    reader.seek(SeekFrom::Start(start))?;
    reader.read_exact(&mut line)?;

    let text = String::from_utf8_lossy(&line);
    Ok(Some(text.trim_end().to_string()))
}

/// Finds the offset of the last terminator strictly before `before`, reading
/// backwards chunk by chunk.
fn rfind_terminator<R: Read + Seek>(reader: &mut R, before: u64) -> io::Result<Option<u64>> {
    let mut chunk = [0u8; TAIL_CHUNK_SIZE];
    let mut end = before;
    while end > 0 {
        let step = end.min(TAIL_CHUNK_SIZE as u64) as usize;
        let start = end - step as u64;
        reader.seek(SeekFrom::Start(start))?;
        reader.read_exact(&mut chunk[..step])?;
        if let Some(i) = chunk[..step].iter().rposition(|&b| b == LINE_TERMINATOR) {
            return Ok(Some(start + i as u64));
        }
        end = start;
    }
    Ok(None)
}

/// Extracts the cumulative frame counter (field 5) from a vstats line.
///
/// Lines that are too short or hold a non-numeric value there yield `0`,
/// so a torn read simply looks like no progress.
#[must_use]
pub fn parse_frame_count(line: &str) -> u64 {
    line.split_whitespace()
        .nth(5)
        .and_then(|field| field.parse::<u64>().ok())
        .unwrap_or(0)
}
