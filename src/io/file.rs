//! Whole-file reads with a size ceiling, and atomic rewrites.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::IoError;

/// Files at or above this size are rejected before any allocation.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 20_000_000;

fn display(path: &Path) -> String {
    path.display().to_string()
}

/// Read an entire file into memory, refusing files of `limit` bytes or more.
pub fn read_bounded(path: &Path, limit: u64) -> Result<Vec<u8>, IoError> {
    let file = File::open(path).map_err(|e| IoError::Open {
        path: display(path),
        message: e.to_string(),
    })?;

    let size = file
        .metadata()
        .map_err(|e| IoError::Open {
            path: display(path),
            message: e.to_string(),
        })?
        .len();

    if size >= limit {
        return Err(IoError::TooLarge {
            path: display(path),
            size,
            limit,
        });
    }

    // The file may grow between stat and read; `take` keeps the bound honest.
    let mut buf = Vec::with_capacity(size as usize);
    file.take(limit)
        .read_to_end(&mut buf)
        .map_err(|e| IoError::Read {
            path: display(path),
            message: e.to_string(),
        })?;

    if buf.len() as u64 >= limit {
        return Err(IoError::TooLarge {
            path: display(path),
            size: buf.len() as u64,
            limit,
        });
    }

    Ok(buf)
}

/// Replace the contents of `path` with `data`.
///
/// The bytes are written to a temporary file in the same directory and
/// renamed over `path` once flushed, so readers never observe a partially
/// written file. On failure the temporary file is removed and `path` is left
/// as it was.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<(), IoError> {
    let write_err = |message: String| IoError::Write {
        path: display(path),
        message,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| write_err(e.to_string()))?;
    tmp.write_all(data).map_err(|e| write_err(e.to_string()))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| write_err(e.to_string()))?;

    // Keep the destination's permissions rather than the 0600 temp default.
    if let Ok(meta) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| write_err(e.to_string()))?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error.to_string()))?;
    Ok(())
}
