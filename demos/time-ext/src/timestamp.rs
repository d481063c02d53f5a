//! Timestamp extension type.
//!
//! Uses the MessagePack timestamp layouts: 4 bytes of seconds when the
//! value fits, 8 bytes of packed nanoseconds and seconds up to 2^34, and
//! 12 bytes otherwise.

use msgpack_factory::registry::{DecodeHandler, EncodeHandler, MethodTable};
use msgpack_factory::{ExtensionType, HandlerError};

/// Seconds and nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    /// Whole seconds.
    pub secs: i64,
    /// Nanoseconds, below 1_000_000_000.
    pub nanos: u32,
}

impl Timestamp {
    /// Create a timestamp.
    pub fn new(secs: i64, nanos: u32) -> Self {
        Self { secs, nanos }
    }

    /// Seconds only, as big-endian `i64`.
    pub fn to_seconds_bytes(&self) -> Vec<u8> {
        self.secs.to_be_bytes().to_vec()
    }

    /// Inverse of [`Timestamp::to_seconds_bytes`].
    pub fn from_seconds_bytes(data: &[u8]) -> Result<Self, HandlerError> {
        let raw: [u8; 8] = data.try_into().map_err(|_| HandlerError::UnexpectedEof {
            expected: 8,
            actual: data.len(),
        })?;
        Ok(Self::new(i64::from_be_bytes(raw), 0))
    }
}

impl ExtensionType for Timestamp {
    fn to_extension_bytes(&self) -> Vec<u8> {
        if self.secs >> 34 == 0 {
            let packed = (u64::from(self.nanos) << 34) | self.secs as u64;
            if packed & 0xffff_ffff_0000_0000 == 0 {
                (packed as u32).to_be_bytes().to_vec()
            } else {
                packed.to_be_bytes().to_vec()
            }
        } else {
            let mut out = self.nanos.to_be_bytes().to_vec();
            out.extend_from_slice(&self.secs.to_be_bytes());
            out
        }
    }

    fn from_extension_bytes(data: &[u8]) -> Result<Self, HandlerError> {
        let timestamp = match data.len() {
            4 => Self::new(i64::from(u32::from_be_bytes([data[0], data[1], data[2], data[3]])), 0),
            8 => {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(data);
                let packed = u64::from_be_bytes(raw);
                Self::new((packed & 0x3_ffff_ffff) as i64, (packed >> 34) as u32)
            }
            12 => {
                let mut nanos = [0u8; 4];
                let mut secs = [0u8; 8];
                nanos.copy_from_slice(&data[..4]);
                secs.copy_from_slice(&data[4..]);
                Self::new(i64::from_be_bytes(secs), u32::from_be_bytes(nanos))
            }
            len => {
                return Err(HandlerError::InvalidPayload(format!(
                    "timestamp payload of {len} bytes"
                )));
            }
        };

        if timestamp.nanos >= 1_000_000_000 {
            return Err(HandlerError::InvalidPayload(format!(
                "nanoseconds out of range: {}",
                timestamp.nanos
            )));
        }
        Ok(timestamp)
    }

    fn extension_methods(methods: &mut MethodTable) {
        methods
            .define_encoder(
                "to_seconds_bytes",
                EncodeHandler::for_type("Timestamp::to_seconds_bytes", Self::to_seconds_bytes),
            )
            .define_decoder(
                "from_seconds_bytes",
                DecodeHandler::for_type("Timestamp::from_seconds_bytes", Self::from_seconds_bytes),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_sizes() {
        assert_eq!(Timestamp::new(1, 0).to_extension_bytes().len(), 4);
        assert_eq!(Timestamp::new(1, 1).to_extension_bytes().len(), 8);
        assert_eq!(Timestamp::new(-1, 0).to_extension_bytes().len(), 12);
        assert_eq!(Timestamp::new(1 << 34, 0).to_extension_bytes().len(), 12);
    }

    #[test]
    fn test_round_trip() {
        for value in [
            Timestamp::new(0, 0),
            Timestamp::new(u32::MAX as i64, 0),
            Timestamp::new((1 << 34) - 1, 999_999_999),
            Timestamp::new(i64::MIN, 1),
        ] {
            let bytes = value.to_extension_bytes();
            assert_eq!(Timestamp::from_extension_bytes(&bytes).unwrap(), value);
        }
    }

    #[test]
    fn test_rejects_bad_payloads() {
        assert!(Timestamp::from_extension_bytes(&[0; 5]).is_err());

        let mut bytes = 1_000_000_000u32.to_be_bytes().to_vec();
        bytes.extend_from_slice(&0i64.to_be_bytes());
        assert!(Timestamp::from_extension_bytes(&bytes).is_err());
    }

    #[test]
    fn test_seconds_layout() {
        let bytes = Timestamp::new(86_400, 7).to_seconds_bytes();
        assert_eq!(hex::encode(&bytes), "0000000000015180");
        assert_eq!(Timestamp::from_seconds_bytes(&bytes).unwrap(), Timestamp::new(86_400, 0));
    }
}
