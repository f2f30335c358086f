// src/blocks/mod.rs

// ============================================================================
// Submodules
// ============================================================================

mod channel_header;
mod common;
mod file_header;

// Re-export format constants and helpers
pub use common::{
    RESERVED_SLOT_COUNT, SAMPLE_SIZE, TEXT_ENCODING, TextEncoding, VERSION_FLOOR, to_count,
    to_offset,
};

// Re-export header types
pub use channel_header::{ChannelHeader, Linearization};
pub use file_header::FileHeader;
