//! Byte-for-byte file comparison for strict mode

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use anyhow::Context;

/// Bytes read from each file per comparison step
pub const CHUNK_SIZE: usize = 4096;

/// Byte-level comparator
pub struct ContentComparator;

impl ContentComparator {
    /// Whether both files hold exactly the same bytes
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be opened or read.
    pub fn same_content(a: &Path, b: &Path) -> anyhow::Result<bool> {
        Self::same_content_from(a, b, 0)
    }

    /// Whether both files hold the same bytes from `offset` on
    ///
    /// Both files are positioned at `offset` before the first chunk is read.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be opened, positioned or read.
    pub fn same_content_from(a: &Path, b: &Path, offset: u64) -> anyhow::Result<bool> {
        let mut file_a = Self::open_at(a, offset)?;
        let mut file_b = Self::open_at(b, offset)?;

        Self::same_stream(&mut file_a, &mut file_b).with_context(|| {
            format!("Failed to compare {} with {}", a.display(), b.display())
        })
    }

    fn open_at(path: &Path, offset: u64) -> anyhow::Result<File> {
        let mut file = File::open(path)
            .with_context(|| format!("Failed to open file for comparison: {}", path.display()))?;
        if offset > 0 {
            file.seek(SeekFrom::Start(offset))
                .with_context(|| format!("Failed to seek in: {}", path.display()))?;
        }
        Ok(file)
    }

    /// Compare two readers chunk by chunk, stopping at the first difference
    ///
    /// # Errors
    ///
    /// Returns an error if either reader fails.
    pub fn same_stream<A: Read, B: Read>(a: &mut A, b: &mut B) -> io::Result<bool> {
        let mut buf_a = [0u8; CHUNK_SIZE];
        let mut buf_b = [0u8; CHUNK_SIZE];

        loop {
            let read_a = read_chunk(a, &mut buf_a)?;
            let read_b = read_chunk(b, &mut buf_b)?;

            if read_a != read_b || buf_a[..read_a] != buf_b[..read_b] {
                return Ok(false);
            }
            if read_a == 0 {
                return Ok(true);
            }
        }
    }
}

/// Fill `buf` as far as the reader allows; short only at end of input
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
