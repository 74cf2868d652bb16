//! H4 packet kinds and their header layouts.
//!
//! Every H4 frame on the UART is laid out as:
//!
//! ```text
//! [type] [header ...] [payload ...]
//! ```
//!
//! The header shape depends on the packet kind, and its last field carries the
//! payload length. [`HeaderLayout`] describes where that field sits so the
//! receive state machine never hard-codes offsets into its buffer.
//!
//! | Kind      | Type | Header                                   | Length field        |
//! |-----------|------|------------------------------------------|---------------------|
//! | Command   | 0x01 | opcode group, opcode, parameter length   | 1 byte at offset 2  |
//! | ACL Data  | 0x02 | handle/flags (2), data length (2, LE)    | 2 bytes at offset 2 |
//! | Sync Data | 0x03 | handle/flags (2), data length (1)        | 1 byte at offset 2  |
//! | Event     | 0x04 | event code, parameter length             | 1 byte at offset 1  |

use crate::consts::{
    H4_ACL_HEADER_LEN, H4_CMD_HEADER_LEN, H4_EVT_HEADER_LEN, H4_SYNC_HEADER_LEN,
    H4_TYPE_ACL_DATA, H4_TYPE_COMMAND, H4_TYPE_EVENT, H4_TYPE_SYNC_DATA,
};
use crate::error::Error;

/// The H4 packet-type discriminant carried in the first byte of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PacketKind {
    /// Host to controller instruction.
    Command = H4_TYPE_COMMAND,
    /// Asynchronous connection-oriented data, either direction.
    AclData = H4_TYPE_ACL_DATA,
    /// Synchronous (SCO/eSCO) data; not carried by this transport.
    SyncData = H4_TYPE_SYNC_DATA,
    /// Controller to host notification.
    Event = H4_TYPE_EVENT,
}

impl PacketKind {
    /// The H4 packet-type byte for this kind.
    pub const fn indicator(self) -> u8 {
        self as u8
    }

    /// Header layout that follows the type byte.
    pub const fn header(self) -> HeaderLayout {
        match self {
            PacketKind::Command => HeaderLayout::COMMAND,
            PacketKind::AclData => HeaderLayout::ACL_DATA,
            PacketKind::SyncData => HeaderLayout::SYNC_DATA,
            PacketKind::Event => HeaderLayout::EVENT,
        }
    }
}

impl TryFrom<u8> for PacketKind {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            H4_TYPE_COMMAND => Ok(PacketKind::Command),
            H4_TYPE_ACL_DATA => Ok(PacketKind::AclData),
            H4_TYPE_SYNC_DATA => Ok(PacketKind::SyncData),
            H4_TYPE_EVENT => Ok(PacketKind::Event),
            other => Err(Error::UnsupportedPacketType(other)),
        }
    }
}

/// Position and width of the payload length inside a packet header.
///
/// Offsets are relative to the first header byte, i.e. the byte right after
/// the H4 packet-type indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    /// Number of header bytes after the type byte.
    pub len: usize,
    /// Offset of the payload length field.
    pub length_offset: usize,
    /// Width of the payload length field (1 or 2 bytes, little-endian).
    pub length_width: usize,
}

impl HeaderLayout {
    /// Command: opcode group, opcode, 8-bit parameter length.
    pub const COMMAND: Self = Self {
        len: H4_CMD_HEADER_LEN,
        length_offset: 2,
        length_width: 1,
    };

    /// ACL Data: two handle/flag bytes, 16-bit little-endian data length.
    pub const ACL_DATA: Self = Self {
        len: H4_ACL_HEADER_LEN,
        length_offset: 2,
        length_width: 2,
    };

    /// Synchronous Data: two handle/flag bytes, 8-bit data length.
    pub const SYNC_DATA: Self = Self {
        len: H4_SYNC_HEADER_LEN,
        length_offset: 2,
        length_width: 1,
    };

    /// Event: event code, 8-bit parameter length.
    pub const EVENT: Self = Self {
        len: H4_EVT_HEADER_LEN,
        length_offset: 1,
        length_width: 1,
    };

    /// Reads the payload length out of a complete header.
    ///
    /// # Arguments
    /// - `header`: the header bytes, starting right after the type byte. Must be
    ///   at least [`len`](HeaderLayout::len) bytes long.
    pub fn payload_len(&self, header: &[u8]) -> usize {
        let field = &header[self.length_offset..self.length_offset + self.length_width];
        field
            .iter()
            .rev()
            .fold(0usize, |acc, &b| (acc << 8) | usize::from(b))
    }
}
