//! Byte-level access: bounds-checked decoding and bounded file I/O.

mod endian;
mod file;

pub use endian::{
    checked_slice, read_segment_length, read_u16_be, read_u16_le, read_u32_be, read_u32_le,
};
pub use file::{read_bounded, write_atomic, DEFAULT_MAX_FILE_SIZE};
