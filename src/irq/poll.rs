use embedded_hal::delay::DelayNs;
use embedded_hal_nb::serial::{Read, Write};

use crate::controller::Controller;
use crate::driver::H4Transport;
use crate::error::Error;

/// Runs a blocking loop that repeatedly calls `poll()` on the provided transport.
///
/// This is the main loop for firmware with nothing else to do: the UART and RNG
/// interrupts feed the receive side and the random pools, and this loop keeps
/// the transmit side moving.
///
/// # Arguments
/// - `transport`: A mutable reference to an `H4Transport` instance.
/// - `delay`: A delay provider implementing `DelayNs`, typically from the HAL.
/// - `interval_us`: The pause between polls, in microseconds.
///
/// # Returns
/// Only when the transport reports a fatal error, which is returned for the
/// caller's fault handler.
///
/// # Example
/// ```rust,ignore
/// use h4_rng::irq::run_poll_loop;
/// let mut transport = H4Transport::new(uart, controller);
/// let fault = run_poll_loop(&mut transport, &mut delay, 50);
/// ```
pub fn run_poll_loop<D: DelayNs, S, C>(
    transport: &mut H4Transport<S, C>,
    delay: &mut D,
    interval_us: u32,
) -> Error
where
    S: Read<u8> + Write<u8>,
    C: Controller,
{
    loop {
        if let Err(e) = transport.poll() {
            return e;
        }
        delay.delay_us(interval_us);
    }
}
