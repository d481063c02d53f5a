//! Extension framing
//!
//! Writes and reads the MessagePack extension family:
//!
//! ```text
//! fixext N   : marker(1) tag(1) data(N)          N in {1, 2, 4, 8, 16}
//! ext 8      : 0xc7 len(1)    tag(1) data(len)
//! ext 16     : 0xc8 len(2 BE) tag(1) data(len)
//! ext 32     : 0xc9 len(4 BE) tag(1) data(len)
//! ```
//!
//! The smallest encoding that fits the payload is always chosen.

use thiserror::Error;

use crate::core::{
    MARKER_EXT8, MARKER_EXT16, MARKER_EXT32, MARKER_FIXEXT1, MARKER_FIXEXT2, MARKER_FIXEXT4,
    MARKER_FIXEXT8, MARKER_FIXEXT16, MAX_EXT_PAYLOAD,
};
use crate::registry::ExtTag;

/// Errors from extension framing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Not enough bytes to hold the whole frame yet.
    #[error("incomplete extension frame: expected {expected}, got {actual}")]
    Incomplete {
        /// Bytes needed.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },

    /// The leading byte is not an extension marker.
    #[error("not an extension marker: 0x{0:02x}")]
    NotExtension(u8),

    /// Payload larger than any extension frame can carry.
    #[error("extension payload too large: {0} bytes")]
    PayloadTooLarge(usize),
}

/// An extension as it appears on the wire: tag plus undecoded payload.
///
/// Also the value a decoder yields for unregistered tags when unknown
/// extensions are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionValue {
    /// Extension tag.
    pub tag: ExtTag,
    /// Raw payload.
    pub payload: Vec<u8>,
}

impl ExtensionValue {
    /// Create a new extension value.
    pub fn new(tag: ExtTag, payload: Vec<u8>) -> Self {
        Self { tag, payload }
    }

    /// Size of the frame header for this payload.
    pub fn header_size(&self) -> usize {
        match self.payload.len() {
            1 | 2 | 4 | 8 | 16 => 2,
            0..=0xff => 3,
            0x100..=0xffff => 4,
            _ => 6,
        }
    }

    /// Total wire size.
    pub fn wire_size(&self) -> usize {
        self.header_size() + self.payload.len()
    }

    /// Append the framed extension to `buf`.
    pub fn encode_into(&self, buf: &mut Vec<u8>) -> Result<usize, FrameError> {
        let len = self.payload.len();
        if len > MAX_EXT_PAYLOAD {
            return Err(FrameError::PayloadTooLarge(len));
        }

        let tag = self.tag.get() as u8;
        buf.reserve(self.wire_size());
        match len {
            1 => buf.extend_from_slice(&[MARKER_FIXEXT1, tag]),
            2 => buf.extend_from_slice(&[MARKER_FIXEXT2, tag]),
            4 => buf.extend_from_slice(&[MARKER_FIXEXT4, tag]),
            8 => buf.extend_from_slice(&[MARKER_FIXEXT8, tag]),
            16 => buf.extend_from_slice(&[MARKER_FIXEXT16, tag]),
            0..=0xff => buf.extend_from_slice(&[MARKER_EXT8, len as u8, tag]),
            0x100..=0xffff => {
                buf.push(MARKER_EXT16);
                buf.extend_from_slice(&(len as u16).to_be_bytes());
                buf.push(tag);
            }
            _ => {
                buf.push(MARKER_EXT32);
                buf.extend_from_slice(&(len as u32).to_be_bytes());
                buf.push(tag);
            }
        }
        buf.extend_from_slice(&self.payload);

        Ok(self.wire_size())
    }

    /// Encode to a fresh buffer.
    pub fn encode(&self) -> Result<Vec<u8>, FrameError> {
        let mut buf = Vec::with_capacity(self.wire_size());
        self.encode_into(&mut buf)?;
        Ok(buf)
    }

    /// Decode one frame from the front of `data`, returning it and the
    /// number of bytes consumed.
    pub fn decode(data: &[u8]) -> Result<(Self, usize), FrameError> {
        let Some(&marker) = data.first() else {
            return Err(FrameError::Incomplete {
                expected: 1,
                actual: 0,
            });
        };

        // (length-prefix width, fixed payload length)
        let (prefix, fixed) = match marker {
            MARKER_FIXEXT1 => (0, 1),
            MARKER_FIXEXT2 => (0, 2),
            MARKER_FIXEXT4 => (0, 4),
            MARKER_FIXEXT8 => (0, 8),
            MARKER_FIXEXT16 => (0, 16),
            MARKER_EXT8 => (1, 0),
            MARKER_EXT16 => (2, 0),
            MARKER_EXT32 => (4, 0),
            other => return Err(FrameError::NotExtension(other)),
        };

        let header = 1 + prefix + 1;
        if data.len() < header {
            return Err(FrameError::Incomplete {
                expected: header,
                actual: data.len(),
            });
        }

        let len = match prefix {
            0 => fixed,
            1 => data[1] as usize,
            2 => u16::from_be_bytes([data[1], data[2]]) as usize,
            _ => u32::from_be_bytes([data[1], data[2], data[3], data[4]]) as usize,
        };

        let total = header + len;
        if data.len() < total {
            return Err(FrameError::Incomplete {
                expected: total,
                actual: data.len(),
            });
        }

        let tag = ExtTag::new(data[header - 1] as i8);
        let payload = data[header..total].to_vec();

        Ok((Self { tag, payload }, total))
    }
}
