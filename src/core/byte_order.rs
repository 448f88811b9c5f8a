//! TIFF byte order
//!
//! Every multi-byte integer in a TIFF structure follows the byte order named
//! by the first two bytes of the header: `II` for little-endian, `MM` for
//! big-endian.

/// Byte order of a TIFF structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrder {
    /// `II`
    LittleEndian,
    /// `MM`
    #[default]
    BigEndian,
}

impl ByteOrder {
    /// Parse the two-byte header marker
    pub fn from_marker(marker: [u8; 2]) -> Option<Self> {
        match &marker {
            b"II" => Some(ByteOrder::LittleEndian),
            b"MM" => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    pub fn marker(self) -> [u8; 2] {
        match self {
            ByteOrder::LittleEndian => *b"II",
            ByteOrder::BigEndian => *b"MM",
        }
    }

    /// Read u16 with byte order. `bytes` must hold at least two bytes.
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        let raw = [bytes[0], bytes[1]];
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(raw),
            ByteOrder::BigEndian => u16::from_be_bytes(raw),
        }
    }

    /// Read u32 with byte order. `bytes` must hold at least four bytes.
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        let raw = [bytes[0], bytes[1], bytes[2], bytes[3]];
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(raw),
            ByteOrder::BigEndian => u32::from_be_bytes(raw),
        }
    }

    pub fn read_i32(self, bytes: &[u8]) -> i32 {
        self.read_u32(bytes) as i32
    }

    /// Write u16 with byte order
    pub fn write_u16(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrder::LittleEndian => value.to_le_bytes(),
            ByteOrder::BigEndian => value.to_be_bytes(),
        }
    }

    /// Write u32 with byte order
    pub fn write_u32(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrder::LittleEndian => value.to_le_bytes(),
            ByteOrder::BigEndian => value.to_be_bytes(),
        }
    }

    pub fn write_i32(self, value: i32) -> [u8; 4] {
        self.write_u32(value as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        assert_eq!(ByteOrder::from_marker(*b"II"), Some(ByteOrder::LittleEndian));
        assert_eq!(ByteOrder::from_marker(*b"MM"), Some(ByteOrder::BigEndian));
        assert_eq!(ByteOrder::from_marker(*b"IM"), None);
        assert_eq!(ByteOrder::default().marker(), *b"MM");
    }

    #[test]
    fn test_read_write() {
        for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
            assert_eq!(order.read_u16(&order.write_u16(0x1234)), 0x1234);
            assert_eq!(order.read_u32(&order.write_u32(0xDEADBEEF)), 0xDEADBEEF);
            assert_eq!(order.read_i32(&order.write_i32(-5)), -5);
        }
        assert_eq!(ByteOrder::LittleEndian.write_u16(1), [1, 0]);
        assert_eq!(ByteOrder::BigEndian.write_u16(1), [0, 1]);
    }
}
