//! Constants used across the H4 transport and the random number pools.
//!
//! This module defines the wire-level packet-type indicators, the per-kind
//! header sizes, and the buffer sizing for both the UART framing engine and
//! the random byte pools.
//!
//! ## Key Concepts
//!
//! - **Packet types**: The first byte of every H4 frame selects how the
//!   remaining header is laid out.
//! - **Header sizes**: Fixed per packet kind; the last header field(s) carry the
//!   payload length.
//! - **Buffer sizing**: Receive and transmit buffers hold one packet-type byte,
//!   the largest header and the largest payload accepted by this transport.
//! - **Pool sizing**: Each random pool has one slot more than its capacity so a
//!   read/write index pair can tell full from empty.

/// H4 packet-type indicator for an HCI Command packet (host to controller).
pub const H4_TYPE_COMMAND: u8 = 0x01;

/// H4 packet-type indicator for an HCI ACL Data packet (both directions).
pub const H4_TYPE_ACL_DATA: u8 = 0x02;

/// H4 packet-type indicator for an HCI Synchronous Data packet.
///
/// Recognised on the wire but not carried by this transport.
pub const H4_TYPE_SYNC_DATA: u8 = 0x03;

/// H4 packet-type indicator for an HCI Event packet (controller to host).
pub const H4_TYPE_EVENT: u8 = 0x04;

/// Length (in bytes) of the H4 packet-type prefix.
pub const H4_TYPE_LEN: usize = 1;

/// Command header: opcode (2 bytes, group and command) + parameter length (1 byte).
pub const H4_CMD_HEADER_LEN: usize = 3;

/// ACL Data header: handle and flags (2 bytes) + little-endian data length (2 bytes).
pub const H4_ACL_HEADER_LEN: usize = 4;

/// Synchronous Data header: handle and flags (2 bytes) + data length (1 byte).
pub const H4_SYNC_HEADER_LEN: usize = 3;

/// Event header: event code (1 byte) + parameter length (1 byte).
pub const H4_EVT_HEADER_LEN: usize = 2;

/// Largest payload (in bytes) accepted after any header.
///
/// Matches the largest command parameter block an 8-bit length field can announce.
pub const H4_MAX_PAYLOAD_LEN: usize = 255;

/// Size (in bytes) of the inbound reassembly buffer.
///
/// Type byte, the largest inbound header (ACL Data), and the largest payload.
pub const H4_RX_BUF_LEN: usize = H4_TYPE_LEN + H4_ACL_HEADER_LEN + H4_MAX_PAYLOAD_LEN;

/// Size (in bytes) of the outbound frame buffer, including the type byte.
pub const H4_TX_BUF_LEN: usize = H4_TYPE_LEN + H4_ACL_HEADER_LEN + H4_MAX_PAYLOAD_LEN;

/// Number of random bytes each priority pool can hold.
pub const RAND_POOL_CAPACITY: usize = 64;

/// Backing storage of a random pool; one slot is always left unused.
pub const RAND_POOL_SIZE: usize = RAND_POOL_CAPACITY + 1;
