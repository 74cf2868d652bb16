//! Error type shared by the framing engine, the multiplexer and the random pools.
//!
//! Every variant except [`Error::PoolFull`] is fatal at this layer: the byte stream
//! is unsynchronized, the controller broke its contract, or the platform failed.
//! Callers hand them to their fault handler; nothing here is retried.

use embedded_hal_nb::serial::ErrorKind;

use crate::packet::PacketKind;

/// Errors reported by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The byte received while waiting for a packet-type indicator is not an
    /// inbound packet kind this transport carries.
    #[error("unsupported H4 packet type 0x{0:02x}")]
    UnsupportedPacketType(u8),

    /// A header announced a payload larger than the receive buffer.
    #[error("{kind:?} payload of {len} bytes exceeds the {max} byte buffer")]
    PayloadTooLong {
        /// Kind of the frame being reassembled.
        kind: PacketKind,
        /// Payload length read from the header.
        len: usize,
        /// Largest payload the buffer can hold.
        max: usize,
    },

    /// The controller refused a well-formed inbound frame.
    #[error("controller rejected {kind:?} frame with status {status}")]
    ControllerRejected {
        /// Kind of the rejected frame.
        kind: PacketKind,
        /// Status code returned by the controller.
        status: i32,
    },

    /// The controller reported an outbound frame longer than the transmit buffer.
    #[error("controller produced a {kind:?} frame of {len} bytes")]
    OutboundFrameTooLong {
        /// Kind of the outbound frame.
        kind: PacketKind,
        /// Length reported by the controller.
        len: usize,
    },

    /// A byte was offered to a pool with no free slot.
    #[error("random pool is full")]
    PoolFull,

    /// A blocking read asked for more bytes than a pool can ever hold.
    #[error("requested {requested} random bytes from a pool of {capacity}")]
    RequestTooLarge {
        /// Number of bytes requested.
        requested: usize,
        /// Capacity of the pool.
        capacity: usize,
    },

    /// A shared context was used before it was set up.
    #[error("shared context used before setup")]
    NotInstalled,

    /// The UART reported an error.
    #[error("UART error: {0:?}")]
    Uart(ErrorKind),

    /// A fatal error was already reported; the transport stays halted until reset.
    #[error("transport halted after a fatal error")]
    Faulted,
}

impl Error {
    /// Whether the condition leaves the transport unusable.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::PoolFull)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::UnsupportedPacketType(t) => defmt::write!(f, "unsupported H4 packet type {=u8:#04x}", t),
            Error::PayloadTooLong { kind, len, max } => {
                defmt::write!(f, "{} payload of {} bytes exceeds {}", kind, len, max)
            }
            Error::ControllerRejected { kind, status } => {
                defmt::write!(f, "controller rejected {} frame: {}", kind, status)
            }
            Error::OutboundFrameTooLong { kind, len } => {
                defmt::write!(f, "controller produced a {} frame of {} bytes", kind, len)
            }
            Error::PoolFull => defmt::write!(f, "random pool is full"),
            Error::RequestTooLarge { requested, capacity } => {
                defmt::write!(f, "requested {} random bytes from a pool of {}", requested, capacity)
            }
            Error::NotInstalled => defmt::write!(f, "shared context used before setup"),
            Error::Uart(kind) => defmt::write!(f, "UART error: {:?}", defmt::Debug2Format(kind)),
            Error::Faulted => defmt::write!(f, "transport halted after a fatal error"),
        }
    }
}
