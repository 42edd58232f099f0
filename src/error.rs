use thiserror::Error;

/// I/O errors that can occur when reading or rewriting files on disk
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// File could not be opened or its metadata could not be read
    #[error("Failed to open {path}: {message}")]
    Open { path: String, message: String },

    /// Reading the file contents failed or came up short
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    /// Writing the destination file failed
    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },

    /// File exceeds the configured read bound
    #[error("File too large: {path} is {size} bytes, limit is {limit}")]
    TooLarge { path: String, size: u64, limit: u64 },
}

/// Structural damage found while walking JPEG markers or TIFF directories
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Corruption {
    /// A multi-byte read would run past the end of the buffer
    #[error("read of {requested} bytes at offset {offset} exceeds buffer size {size}")]
    OutOfBounds {
        offset: usize,
        requested: usize,
        size: usize,
    },

    /// APP1 length field is too small to hold the Exif signature and TIFF header
    #[error("EXIF segment length {declared} is below the 16-byte minimum")]
    SegmentTooShort { declared: u16 },

    /// Declared marker segment length runs past the end of the buffer
    #[error("segment at {start} declares {declared} bytes but buffer size is {size}")]
    SegmentOverrun {
        start: usize,
        declared: usize,
        size: usize,
    },

    /// TIFF header magic number is not 42
    #[error("invalid TIFF magic: expected 0x002A, got 0x{0:04X}")]
    InvalidTiffMagic(u16),

    /// IFD offset points outside the EXIF payload
    #[error("IFD offset {0} is outside the EXIF payload")]
    InvalidIfdOffset(usize),

    /// Directory entry table would run past the end of the buffer
    #[error("directory at {offset} with {entries} entries exceeds buffer size {size}")]
    DirectoryOverrun {
        offset: usize,
        entries: u16,
        size: usize,
    },

    /// The byte after the EXIF segment is not a marker byte
    #[error("expected marker byte 0xFF after EXIF segment at {offset}, found 0x{found:02X}")]
    MissingTrailingMarker { offset: usize, found: u8 },
}

/// Errors that can occur while locating, decoding, or copying EXIF data
#[derive(Debug, Clone, Error)]
pub enum ExifError {
    /// Buffer is too short or lacks the JPEG start/end of image markers
    #[error("Not a JPEG: missing SOI/EOI markers or buffer too short")]
    NoJpeg,

    /// No APP1/EXIF marker was found
    #[error("No EXIF segment found")]
    NoExif,

    /// TIFF byte order tag is neither "II" nor "MM"
    #[error("Unknown byte alignment: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    UnknownByteAlignment(u16),

    /// A bounds or structure check failed
    #[error("Corrupt EXIF data: {0}")]
    Corrupt(#[from] Corruption),

    /// File access failed
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}
