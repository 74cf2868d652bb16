use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal_nb::serial::{Read, Write};

use crate::controller::Controller;
use crate::driver::H4Transport;
use crate::error::Error;
use crate::packet::PacketKind;

/// A transport shared between the UART interrupt and the main loop.
pub type GlobalTransport<S, C> = Mutex<RefCell<Option<H4Transport<S, C>>>>;

/// Used to initialize the global static `H4Transport` for use with
/// `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
///
/// # Example
/// ```rust,ignore
/// use h4_rng::irq::{GlobalTransport, global_transport_init};
///
/// static H4: GlobalTransport<Uarte, Sdc> = global_transport_init();
/// ```
pub const fn global_transport_init<S, C>() -> GlobalTransport<S, C>
where
    S: Read<u8> + Write<u8>,
    C: Controller,
{
    Mutex::new(RefCell::new(None))
}

/// Builds an `H4Transport` from `serial` and `controller` and stores it in
/// `global`, replacing any previous one.
///
/// # Example
/// ```rust,ignore
/// fn main() {
///     global_transport_setup(&H4, uart, controller);
/// }
/// ```
pub fn global_transport_setup<S, C>(global: &'static GlobalTransport<S, C>, serial: S, controller: C)
where
    S: Read<u8> + Write<u8>,
    C: Controller,
{
    critical_section::with(|cs| {
        let _ = global
            .borrow(cs)
            .replace(Some(H4Transport::new(serial, controller)));
    });
}

fn with_transport<S, C, R>(
    global: &'static GlobalTransport<S, C>,
    f: impl FnOnce(&mut H4Transport<S, C>) -> Result<R, Error>,
) -> Result<R, Error>
where
    S: Read<u8> + Write<u8>,
    C: Controller,
{
    critical_section::with(|cs| match global.borrow(cs).borrow_mut().as_mut() {
        Some(transport) => f(transport),
        None => Err(Error::NotInstalled),
    })
}

/// Runs the receive side at each UART receive interrupt.
///
/// # Returns
/// The number of frames delivered to the controller.
pub fn global_uart_rx<S, C>(global: &'static GlobalTransport<S, C>) -> Result<usize, Error>
where
    S: Read<u8> + Write<u8>,
    C: Controller,
{
    with_transport(global, |transport| transport.on_rx_ready())
}

/// Runs the transmit side at each UART transmit interrupt.
pub fn global_uart_tx<S, C>(global: &'static GlobalTransport<S, C>) -> Result<(), Error>
where
    S: Read<u8> + Write<u8>,
    C: Controller,
{
    with_transport(global, |transport| transport.on_tx_ready())
}

/// Runs both sides, for UARTs that share one interrupt vector.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn UARTE0_UART0() {
///     if let Err(e) = global_uart_irq(&H4) {
///         fault(e);
///     }
/// }
/// ```
pub fn global_uart_irq<S, C>(global: &'static GlobalTransport<S, C>) -> Result<usize, Error>
where
    S: Read<u8> + Write<u8>,
    C: Controller,
{
    with_transport(global, |transport| {
        let delivered = transport.on_rx_ready()?;
        transport.on_tx_ready()?;
        Ok(delivered)
    })
}

/// One main-loop pass of the transmit side.
///
/// # Returns
/// The kind of frame started, if any.
pub fn global_transport_poll<S, C>(
    global: &'static GlobalTransport<S, C>,
) -> Result<Option<PacketKind>, Error>
where
    S: Read<u8> + Write<u8>,
    C: Controller,
{
    with_transport(global, |transport| transport.poll())
}
