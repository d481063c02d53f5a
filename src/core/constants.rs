//! MessagePack extension constants.
//!
//! Marker bytes are fixed by the MessagePack format and MUST NOT be changed.

// =============================================================================
// EXTENSION TAGS
// =============================================================================

/// Smallest representable extension tag.
pub const TAG_MIN: i64 = i8::MIN as i64;

/// Largest representable extension tag.
pub const TAG_MAX: i64 = i8::MAX as i64;

/// Number of distinct extension tags.
pub const TAG_COUNT: usize = 256;

// =============================================================================
// CONVENTIONAL METHOD NAMES
// =============================================================================

/// Instance method used to encode a value when no encode selector is given.
pub const DEFAULT_ENCODE_METHOD: &str = "to_extension_bytes";

/// Type-level method used to decode a payload when no decode selector is given.
pub const DEFAULT_DECODE_METHOD: &str = "from_extension_bytes";

// =============================================================================
// REGISTRATION OPTION KEYS
// =============================================================================

/// Options key carrying the encode selector.
pub const OPTION_ENCODE: &str = "encode";

/// Options key carrying the decode selector.
pub const OPTION_DECODE: &str = "decode";

// =============================================================================
// EXTENSION MARKERS
// =============================================================================

/// Extension with a 1-byte payload.
pub const MARKER_FIXEXT1: u8 = 0xd4;

/// Extension with a 2-byte payload.
pub const MARKER_FIXEXT2: u8 = 0xd5;

/// Extension with a 4-byte payload.
pub const MARKER_FIXEXT4: u8 = 0xd6;

/// Extension with an 8-byte payload.
pub const MARKER_FIXEXT8: u8 = 0xd7;

/// Extension with a 16-byte payload.
pub const MARKER_FIXEXT16: u8 = 0xd8;

/// Extension with an 8-bit length prefix.
pub const MARKER_EXT8: u8 = 0xc7;

/// Extension with a 16-bit length prefix.
pub const MARKER_EXT16: u8 = 0xc8;

/// Extension with a 32-bit length prefix.
pub const MARKER_EXT32: u8 = 0xc9;

/// Largest payload an extension frame can carry.
pub const MAX_EXT_PAYLOAD: usize = u32::MAX as usize;

// =============================================================================
// CODEC DEFAULTS
// =============================================================================

/// Initial encoder buffer capacity in bytes.
pub const DEFAULT_BUFFER_CAPACITY: usize = 256;
