//! The link-layer controller, as seen from the transport.
//!
//! The controller owns all protocol logic. The transport only hands it
//! complete inbound frames and asks it for pending outbound ones; frames are
//! passed without the H4 packet-type byte.

/// Packet sink and source implemented by the controller core.
pub trait Controller {
    /// Accepts one HCI Command packet (header and parameters).
    ///
    /// # Errors
    /// A controller status code; any rejection is fatal to the transport.
    fn ingest_command(&mut self, packet: &[u8]) -> Result<(), i32>;

    /// Accepts one HCI ACL Data packet (header and payload).
    ///
    /// # Errors
    /// A controller status code; any rejection is fatal to the transport.
    fn ingest_data(&mut self, packet: &[u8]) -> Result<(), i32>;

    /// Copies the next pending HCI Event packet into `buf`.
    ///
    /// # Returns
    /// The packet length, or 0 if no event is pending.
    fn pending_event(&mut self, buf: &mut [u8]) -> usize;

    /// Copies the next pending HCI ACL Data packet into `buf`.
    ///
    /// # Returns
    /// The packet length, or 0 if no data is pending.
    fn pending_data(&mut self, buf: &mut [u8]) -> usize;
}

impl<C: Controller + ?Sized> Controller for &mut C {
    fn ingest_command(&mut self, packet: &[u8]) -> Result<(), i32> {
        (**self).ingest_command(packet)
    }

    fn ingest_data(&mut self, packet: &[u8]) -> Result<(), i32> {
        (**self).ingest_data(packet)
    }

    fn pending_event(&mut self, buf: &mut [u8]) -> usize {
        (**self).pending_event(buf)
    }

    fn pending_data(&mut self, buf: &mut [u8]) -> usize {
        (**self).pending_data(buf)
    }
}
