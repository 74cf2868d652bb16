//! Outbound frame arbitration.
//!
//! The controller can have Events and ACL Data waiting at the same time.
//! [`H4Multiplexer::poll`] pulls at most one frame per call, alternating which
//! kind it asks for so neither can starve the other under sustained traffic.
//! A kind with nothing pending simply costs one empty poll; the other kind is
//! asked for on the next call, never within the same one.
//!
//! The transmit path is single-flight: once a frame is handed out, polling is a
//! no-op until the UART reports completion through
//! [`H4Multiplexer::on_tx_complete`]. The idle flag is the only state touched
//! from the transmit-complete interrupt, so that method takes `&self`.

use core::sync::atomic::{AtomicBool, Ordering};

use heapless::Vec;

use crate::consts::{H4_TX_BUF_LEN, H4_TYPE_LEN};
use crate::controller::Controller;
use crate::error::Error;
use crate::fmt::debug;
use crate::packet::PacketKind;

/// Alternates controller Events and ACL Data onto a single transmit path.
#[derive(Debug)]
pub struct H4Multiplexer {
    frame: Vec<u8, H4_TX_BUF_LEN>,
    /// Whether the last poll asked the controller for an Event.
    last_polled_event: bool,
    tx_idle: AtomicBool,
}

impl Default for H4Multiplexer {
    fn default() -> Self {
        Self::new()
    }
}

impl H4Multiplexer {
    /// Creates an idle multiplexer that asks for an Event first.
    pub const fn new() -> Self {
        Self {
            frame: Vec::new(),
            last_polled_event: false,
            tx_idle: AtomicBool::new(true),
        }
    }

    /// Whether the transmit path can take a new frame.
    pub fn is_idle(&self) -> bool {
        self.tx_idle.load(Ordering::Acquire)
    }

    /// Marks the transmit path idle. Call from the UART transmit-complete handler.
    pub fn on_tx_complete(&self) {
        self.tx_idle.store(true, Ordering::Release);
    }

    /// The frame handed out by the last successful [`poll`](H4Multiplexer::poll),
    /// type byte included.
    pub fn pending_frame(&self) -> &[u8] {
        &self.frame
    }

    /// Pulls the next outbound frame from `controller`, if the transmit path is idle.
    ///
    /// On success the frame is prefixed with its H4 type byte, the transmit path
    /// is marked busy, and the caller must send [`pending_frame`](H4Multiplexer::pending_frame).
    ///
    /// # Returns
    /// - `Ok(Some(kind))`: a frame of `kind` is ready to send
    /// - `Ok(None)`: the path is busy, or the kind asked for had nothing pending
    ///
    /// # Errors
    /// [`Error::OutboundFrameTooLong`] if the controller reports more bytes than
    /// the transmit buffer holds.
    pub fn poll<C: Controller>(&mut self, controller: &mut C) -> Result<Option<PacketKind>, Error> {
        if !self.is_idle() {
            return Ok(None);
        }

        let kind = if self.last_polled_event {
            PacketKind::AclData
        } else {
            PacketKind::Event
        };
        self.last_polled_event = kind == PacketKind::Event;

        self.frame.clear();
        if self.frame.resize_default(H4_TX_BUF_LEN).is_err() {
            return Err(Error::OutboundFrameTooLong {
                kind,
                len: H4_TX_BUF_LEN,
            });
        }
        let body = &mut self.frame[H4_TYPE_LEN..];
        let capacity = body.len();
        let len = match kind {
            PacketKind::Event => controller.pending_event(body),
            _ => controller.pending_data(body),
        };

        if len == 0 {
            self.frame.clear();
            return Ok(None);
        }
        if len > capacity {
            self.frame.clear();
            return Err(Error::OutboundFrameTooLong { kind, len });
        }

        self.frame.truncate(H4_TYPE_LEN + len);
        self.frame[0] = kind.indicator();
        self.tx_idle.store(false, Ordering::Release);
        debug!("h4 tx: {:?} frame, {} bytes", kind, len);
        Ok(Some(kind))
    }
}
