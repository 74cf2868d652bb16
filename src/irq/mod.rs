//! Interrupt and main-loop integration for the transport and the random pools.
//!
//! The core types ([`H4Transport`](crate::driver::H4Transport),
//! [`RandomSource`](crate::rng::RandomSource)) are plain owned structs. This
//! module provides the glue for running them from interrupt handlers and a
//! main loop:
//!
//! - `isr` feature (default): `critical_section`-protected globals
//!   ([`global_transport_init`], [`global_uart_irq`], ...) plus the
//!   [`init_h4_transport!`](crate::init_h4_transport),
//!   [`setup_h4_transport!`](crate::setup_h4_transport),
//!   [`uart_irq!`](crate::uart_irq), [`init_random_source!`](crate::init_random_source)
//!   and [`rng_irq!`](crate::rng_irq) macros.
//! - `poll-loop` feature: [`run_poll_loop`], a blocking main loop that polls the
//!   transmit side at a fixed interval using an `embedded_hal::delay::DelayNs`.
//!
//! Interrupt handlers only drain hardware into the owned state and return; all
//! framing and controller calls happen inside whichever context holds the
//! critical section, so they never run concurrently with themselves.

#[cfg(feature = "isr")]
mod global;
#[cfg_attr(feature = "isr", allow(unused_imports))]
#[cfg(feature = "isr")]
pub use global::*;

#[cfg(feature = "isr")]
mod macros;

#[cfg(feature = "poll-loop")]
mod poll;
#[cfg_attr(feature = "poll-loop", allow(unused_imports))]
#[cfg(feature = "poll-loop")]
pub use poll::*;
