//! H4 transport driver.
//!
//! This module provides the [`H4Transport`] struct, which connects a UART to a
//! link-layer [`Controller`] using the H4 framing. It owns the receive state
//! machine ([`H4Framer`]) and the transmit arbitration ([`H4Multiplexer`]) and
//! drives both from three entry points:
//!
//! - [`on_rx_ready()`](H4Transport::on_rx_ready): UART receive interrupt. Drains
//!   every byte the UART has buffered into the framer, delivering complete
//!   frames to the controller.
//! - [`on_tx_ready()`](H4Transport::on_tx_ready): UART transmit interrupt. Pushes
//!   the rest of the frame in flight and marks the path idle once the UART has
//!   flushed it.
//! - [`poll()`](H4Transport::poll): main loop. Pulls the next outbound frame from
//!   the controller when the transmit path is idle and starts sending it.
//!
//! The UART is any [`embedded_hal_nb::serial`] implementation; every access is
//! non-blocking and stops at the first `WouldBlock`.
//!
//! ## Errors
//!
//! Fatal errors (garbled framing, controller rejection, UART failure) are
//! returned once and latched. Until [`reset()`](H4Transport::reset) every entry
//! point returns [`Error::Faulted`] without touching the UART.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::serial::{Mock as SerialMock, Transaction as SerialTransaction};
//! use h4_rng::controller::Controller;
//! use h4_rng::driver::H4Transport;
//!
//! struct Sink;
//!
//! impl Controller for Sink {
//!     fn ingest_command(&mut self, _packet: &[u8]) -> Result<(), i32> { Ok(()) }
//!     fn ingest_data(&mut self, _packet: &[u8]) -> Result<(), i32> { Ok(()) }
//!     fn pending_event(&mut self, _buf: &mut [u8]) -> usize { 0 }
//!     fn pending_data(&mut self, _buf: &mut [u8]) -> usize { 0 }
//! }
//!
//! # let serial = SerialMock::new(&[
//! #     SerialTransaction::read_many([0x01, 0x03, 0x0c, 0x00]),
//! #     SerialTransaction::read_error(nb::Error::WouldBlock),
//! # ]);
//! let mut transport = H4Transport::new(serial, Sink);
//!
//! // From the UART receive interrupt:
//! assert_eq!(transport.on_rx_ready(), Ok(1));
//!
//! // From the main loop:
//! assert_eq!(transport.poll(), Ok(None));
//! # transport.serial.done();
//! ```

use embedded_hal_nb::serial::{Error as _, Read, Write};

use crate::controller::Controller;
use crate::error::Error;
use crate::fmt::error;
use crate::framer::H4Framer;
use crate::mux::H4Multiplexer;
use crate::packet::PacketKind;

/// A UART-backed H4 transport in front of a link-layer controller.
///
/// ## Type Parameters
///
/// - `S`: the UART, implementing [`embedded_hal_nb::serial::Read`] and
///   [`embedded_hal_nb::serial::Write`] for bytes
/// - `C`: the controller receiving inbound frames and supplying outbound ones
///
/// ## Notes
///
/// - Only one context may call into the transport at a time; see
///   [`crate::irq`] for sharing it between interrupts and the main loop.
#[derive(Debug)]
pub struct H4Transport<S, C>
where
    S: Read<u8> + Write<u8>,
    C: Controller,
{
    /// The UART
    pub serial: S,
    /// The link-layer controller
    pub controller: C,
    framer: H4Framer,
    mux: H4Multiplexer,
    /// Bytes of the in-flight frame already accepted by the UART.
    tx_cursor: usize,
    fault: Option<Error>,

    /// Counter of inbound frames accepted by the controller.
    pub rx_frames: u32,

    /// Counter of outbound frames completely flushed to the UART.
    pub tx_frames: u32,
}

impl<S, C> H4Transport<S, C>
where
    S: Read<u8> + Write<u8>,
    C: Controller,
{
    /// Creates a transport awaiting its first packet-type byte with an idle transmit path.
    pub fn new(serial: S, controller: C) -> Self {
        Self {
            serial,
            controller,
            framer: H4Framer::new(),
            mux: H4Multiplexer::new(),
            tx_cursor: 0,
            fault: None,
            rx_frames: 0,
            tx_frames: 0,
        }
    }

    /// The receive state machine.
    pub fn framer(&self) -> &H4Framer {
        &self.framer
    }

    /// The transmit multiplexer.
    pub fn mux(&self) -> &H4Multiplexer {
        &self.mux
    }

    /// The fatal error that halted the transport, if any.
    pub fn fault(&self) -> Option<Error> {
        self.fault
    }

    /// Clears a latched fault and restarts reception at a packet-type byte.
    ///
    /// A frame in flight on the transmit path is left to complete.
    pub fn reset(&mut self) {
        self.fault = None;
        self.framer.reset();
    }

    fn check(&self) -> Result<(), Error> {
        match self.fault {
            Some(_) => Err(Error::Faulted),
            None => Ok(()),
        }
    }

    fn latch<T>(&mut self, result: Result<T, Error>) -> Result<T, Error> {
        if let Err(e) = &result {
            if e.is_fatal() {
                error!("h4 transport halted: {}", e);
                self.fault = Some(*e);
            }
        }
        result
    }

    /// Body of the UART receive interrupt.
    ///
    /// Reads until the UART reports `WouldBlock`, feeding every byte through the
    /// framer.
    ///
    /// # Returns
    /// The number of frames delivered to the controller.
    pub fn on_rx_ready(&mut self) -> Result<usize, Error> {
        self.check()?;
        let mut delivered = 0;
        loop {
            let byte = match self.serial.read() {
                Ok(byte) => byte,
                Err(nb::Error::WouldBlock) => return Ok(delivered),
                Err(nb::Error::Other(e)) => return self.latch(Err(Error::Uart(e.kind()))),
            };
            let result = self.framer.push_byte(byte, &mut self.controller);
            if self.latch(result)?.is_some() {
                delivered += 1;
                self.rx_frames = self.rx_frames.wrapping_add(1);
            }
        }
    }

    /// Body of the UART transmit interrupt.
    ///
    /// Writes the remainder of the frame in flight, then flushes. Once the flush
    /// completes the transmit path is marked idle.
    pub fn on_tx_ready(&mut self) -> Result<(), Error> {
        self.check()?;
        if self.mux.is_idle() {
            return Ok(());
        }

        let frame = self.mux.pending_frame();
        while self.tx_cursor < frame.len() {
            match self.serial.write(frame[self.tx_cursor]) {
                Ok(()) => self.tx_cursor += 1,
                Err(nb::Error::WouldBlock) => return Ok(()),
                Err(nb::Error::Other(e)) => {
                    let kind = e.kind();
                    return self.latch(Err(Error::Uart(kind)));
                }
            }
        }

        match self.serial.flush() {
            Ok(()) => {
                self.tx_cursor = 0;
                self.tx_frames = self.tx_frames.wrapping_add(1);
                self.mux.on_tx_complete();
                Ok(())
            }
            Err(nb::Error::WouldBlock) => Ok(()),
            Err(nb::Error::Other(e)) => self.latch(Err(Error::Uart(e.kind()))),
        }
    }

    /// One main-loop pass over the transmit side.
    ///
    /// Progresses the frame in flight, and if the path is idle pulls the next
    /// frame from the controller (alternating Events and ACL Data) and starts
    /// sending it.
    ///
    /// # Returns
    /// The kind of frame started by this call, if any.
    pub fn poll(&mut self) -> Result<Option<PacketKind>, Error> {
        self.on_tx_ready()?;
        let result = self.mux.poll(&mut self.controller);
        let started = self.latch(result)?;
        if started.is_some() {
            self.tx_cursor = 0;
            self.on_tx_ready()?;
        }
        Ok(started)
    }
}
