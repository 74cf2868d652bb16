//! H4 receive state machine.
//!
//! [`H4Framer`] reassembles the inbound UART byte stream into complete Command
//! and ACL Data frames and hands each one to the [`Controller`].
//!
//! The machine is purely reactive. At any time exactly one receive request is
//! outstanding, described by [`H4Framer::request`]; it covers a window of the
//! internal buffer. Once that window is filled the machine transitions and
//! issues the next request:
//!
//! | State               | Completed request | Next                                      |
//! |---------------------|-------------------|-------------------------------------------|
//! | `AwaitingType`      | 1 type byte       | header of the announced kind              |
//! | `AwaitingCmdHeader` | 3 header bytes    | payload, or deliver and await type if 0   |
//! | `AwaitingAclHeader` | 4 header bytes    | payload, or deliver and await type if 0   |
//! | `AwaitingPayload`   | `length` bytes    | deliver and await type                    |
//!
//! The window can be filled one byte at a time with [`H4Framer::push_byte`]
//! (FIFO or polled UARTs) or all at once through [`H4Framer::rx_window`] and
//! [`H4Framer::rx_complete`] (DMA UARTs).
//!
//! There is no resynchronization. An unknown type byte, an oversized payload,
//! or a controller rejection is reported as a fatal [`Error`]; the machine is
//! left awaiting a type byte so a caller that chooses to restart can do so.

use crate::consts::{H4_RX_BUF_LEN, H4_TYPE_LEN};
use crate::controller::Controller;
use crate::error::Error;
use crate::fmt::{debug, error};
use crate::packet::{HeaderLayout, PacketKind};

/// Receive state of the framer.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxState {
    /// Waiting for the one-byte packet-type indicator.
    #[default]
    AwaitingType,
    /// Waiting for the 3-byte Command header.
    AwaitingCmdHeader,
    /// Waiting for the 4-byte ACL Data header.
    AwaitingAclHeader,
    /// Waiting for the payload announced by the header.
    AwaitingPayload,
}

/// The outstanding receive: `len` bytes into the buffer at `offset`.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxRequest {
    /// Buffer offset the next byte lands at.
    pub offset: usize,
    /// Bytes still needed to complete the request.
    pub len: usize,
}

/// Reassembles H4 Command and ACL Data frames from a byte stream.
#[derive(Debug)]
pub struct H4Framer {
    buf: [u8; H4_RX_BUF_LEN],
    state: RxState,
    /// Next buffer index to fill.
    cursor: usize,
    /// End of the outstanding request.
    end: usize,
}

impl Default for H4Framer {
    fn default() -> Self {
        Self::new()
    }
}

impl H4Framer {
    /// Creates a framer awaiting a type byte, with that one-byte receive already requested.
    pub const fn new() -> Self {
        Self {
            buf: [0; H4_RX_BUF_LEN],
            state: RxState::AwaitingType,
            cursor: 0,
            end: H4_TYPE_LEN,
        }
    }

    /// Drops any partial frame and requests a fresh type byte.
    pub fn reset(&mut self) {
        self.state = RxState::AwaitingType;
        self.request_at(0, H4_TYPE_LEN);
    }

    /// Current receive state.
    pub fn state(&self) -> RxState {
        self.state
    }

    /// The outstanding receive request.
    pub fn request(&self) -> RxRequest {
        RxRequest {
            offset: self.cursor,
            len: self.end - self.cursor,
        }
    }

    /// The part of the buffer the outstanding request will fill.
    ///
    /// Hand this to a DMA transfer and call [`rx_complete`](H4Framer::rx_complete)
    /// once it has been written completely.
    pub fn rx_window(&mut self) -> &mut [u8] {
        &mut self.buf[self.cursor..self.end]
    }

    /// Completes the outstanding request after [`rx_window`](H4Framer::rx_window)
    /// has been filled, and issues the next one.
    ///
    /// # Returns
    /// The kind of frame delivered to `controller`, if this completion finished one.
    pub fn rx_complete<C: Controller>(
        &mut self,
        controller: &mut C,
    ) -> Result<Option<PacketKind>, Error> {
        self.cursor = self.end;
        self.advance(controller)
    }

    /// Stores one received byte and completes the request once it is full.
    ///
    /// # Returns
    /// The kind of frame delivered to `controller`, if this byte finished one.
    pub fn push_byte<C: Controller>(
        &mut self,
        byte: u8,
        controller: &mut C,
    ) -> Result<Option<PacketKind>, Error> {
        self.buf[self.cursor] = byte;
        self.cursor += 1;
        if self.cursor < self.end {
            return Ok(None);
        }
        self.advance(controller)
    }

    fn request_at(&mut self, offset: usize, len: usize) {
        self.cursor = offset;
        self.end = offset + len;
    }

    fn advance<C: Controller>(&mut self, controller: &mut C) -> Result<Option<PacketKind>, Error> {
        let result = self.transition(controller);
        if let Err(e) = &result {
            error!("h4 rx: {}", e);
            self.reset();
        }
        result
    }

    fn transition<C: Controller>(
        &mut self,
        controller: &mut C,
    ) -> Result<Option<PacketKind>, Error> {
        match self.state {
            RxState::AwaitingType => {
                let (state, layout) = match PacketKind::try_from(self.buf[0])? {
                    PacketKind::Command => (RxState::AwaitingCmdHeader, HeaderLayout::COMMAND),
                    PacketKind::AclData => (RxState::AwaitingAclHeader, HeaderLayout::ACL_DATA),
                    other => return Err(Error::UnsupportedPacketType(other.indicator())),
                };
                self.state = state;
                self.request_at(H4_TYPE_LEN, layout.len);
                Ok(None)
            }
            RxState::AwaitingCmdHeader | RxState::AwaitingAclHeader => {
                let kind = self.kind()?;
                let layout = kind.header();
                let header_end = H4_TYPE_LEN + layout.len;
                let len = layout.payload_len(&self.buf[H4_TYPE_LEN..header_end]);
                if len == 0 {
                    return self.deliver(controller).map(Some);
                }
                let max = self.buf.len() - header_end;
                if len > max {
                    return Err(Error::PayloadTooLong { kind, len, max });
                }
                self.state = RxState::AwaitingPayload;
                self.request_at(header_end, len);
                Ok(None)
            }
            RxState::AwaitingPayload => self.deliver(controller).map(Some),
        }
    }

    fn kind(&self) -> Result<PacketKind, Error> {
        PacketKind::try_from(self.buf[0])
    }

    /// Passes the completed frame, minus its type byte, to the controller and
    /// requests the next type byte.
    fn deliver<C: Controller>(&mut self, controller: &mut C) -> Result<PacketKind, Error> {
        let kind = self.kind()?;
        let frame = &self.buf[H4_TYPE_LEN..self.end];
        let status = match kind {
            PacketKind::Command => controller.ingest_command(frame),
            PacketKind::AclData => controller.ingest_data(frame),
            other => return Err(Error::UnsupportedPacketType(other.indicator())),
        };
        status.map_err(|status| Error::ControllerRejected { kind, status })?;
        debug!("h4 rx: {:?} frame, {} bytes", kind, frame.len());
        self.reset();
        Ok(kind)
    }
}
