/// Declares a static global `H4_TRANSPORT` instance protected by a `critical_section` mutex.
///
/// This macro creates a `static` singleton `H4_TRANSPORT` suitable for use in
/// interrupt-based environments, where both the main loop and the UART ISR need
/// to safely access the shared transport state.
///
/// # Arguments
/// - `$serial`: The concrete UART type (must implement `embedded_hal_nb::serial::{Read, Write}`)
/// - `$controller`: The concrete controller type (must implement [`Controller`](crate::controller::Controller))
///
/// # Example
/// ```rust,ignore
/// init_h4_transport!(Uarte<'static>, Sdc);
/// ```
#[macro_export]
macro_rules! init_h4_transport {
    ( $serial:ty, $controller:ty ) => {
        pub static H4_TRANSPORT: $crate::irq::GlobalTransport<$serial, $controller> =
            $crate::irq::global_transport_init();
    };
}

/// Initializes the global `H4_TRANSPORT` singleton with a new transport instance.
///
/// # Arguments
/// - `$serial`: The UART instance
/// - `$controller`: The controller instance
///
/// # Example
/// ```rust,ignore
/// main() {
///     setup_h4_transport!(uart, controller);
/// }
/// ```
///
/// # Notes
/// - Requires `init_h4_transport!` to have been used earlier.
#[macro_export]
macro_rules! setup_h4_transport {
    ( $serial:expr, $controller:expr $(,)? ) => {
        $crate::irq::global_transport_setup(&H4_TRANSPORT, $serial, $controller)
    };
}

/// Runs both sides of the global `H4_TRANSPORT` from the UART interrupt.
///
/// Evaluates to the `Result` of [`global_uart_irq`](crate::irq::global_uart_irq),
/// so fatal errors can be routed to the fault handler.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn UARTE0_UART0() {
///     if let Err(e) = uart_irq!() {
///         fault(e);
///     }
/// }
/// ```
#[macro_export]
macro_rules! uart_irq {
    () => {
        $crate::irq::global_uart_irq(&H4_TRANSPORT)
    };
}

/// Declares a static global `RANDOM_SOURCE`, a
/// [`SharedRandomSource`](crate::rng::SharedRandomSource) for the given generator type.
///
/// # Example
/// ```rust,ignore
/// init_random_source!(Rng<'static>);
///
/// fn main() {
///     let _ = RANDOM_SOURCE.install(RandomSource::new(rng));
/// }
/// ```
#[macro_export]
macro_rules! init_random_source {
    ( $rng:ty ) => {
        pub static RANDOM_SOURCE: $crate::rng::SharedRandomSource<$rng> =
            $crate::rng::SharedRandomSource::new();
    };
}

/// Feeds the global `RANDOM_SOURCE` from the RNG interrupt.
///
/// Safe to call before the source is installed; it then does nothing.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn RNG() {
///     rng_irq!();
/// }
/// ```
#[macro_export]
macro_rules! rng_irq {
    () => {
        $crate::rng::SharedRandomSource::on_interrupt(&RANDOM_SOURCE)
    };
}
