//! # h4-rng
//!
//! A portable, no_std Rust implementation of the host-facing side of a Bluetooth
//! Low Energy controller: the H4 UART transport that frames HCI packets between
//! a host and the link-layer controller, and the priority-segregated pools of
//! hardware random bytes the controller draws from.
//!
//! This crate provides:
//! - `embedded-hal-nb` serial traits for the UART, so any HAL's UART plugs in
//! - an H4 receive state machine that reassembles Command and ACL Data frames
//! - a transmit multiplexer alternating controller Events and ACL Data
//! - interrupt-safe shared state with `critical-section`
//! - a blocking-aware random number source fed by the RNG interrupt
//!
//! ## Crate features
//! | Feature         | Description |
//! |-----------------|-------------|
//! | `std`           | Disables `#![no_std]` support |
//! | `isr` (default) | `critical_section` globals and macros for interrupt handlers |
//! | `poll-loop`     | Uses `embedded_hal::delay::DelayNs` for a blocking main loop |
//! | `defmt`         | Uses `defmt` logging |
//! | `log`           | Uses `log` logging |
//! | `cortex-m`      | `CortexMProbe`, reading the live interrupt context for the blocking random getter |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use h4_rng::driver::H4Transport;
//!
//! let mut transport = H4Transport::new(uart, controller);
//! loop {
//!     transport.on_rx_ready()?; // from the UART receive interrupt
//!     transport.poll()?;        // from the main loop
//!     transport.on_tx_ready()?; // from the UART transmit interrupt
//! }
//! ```
//!
//! Or, with the `isr` feature, share the transport with the interrupt handlers:
//!
//! ```rust,ignore
//! h4_rng::init_h4_transport!(Uarte<'static>, Sdc);
//! h4_rng::init_random_source!(Rng<'static>);
//!
//! #[interrupt]
//! fn UARTE0_UART0() {
//!     if let Err(e) = h4_rng::uart_irq!() {
//!         fault(e);
//!     }
//! }
//!
//! #[interrupt]
//! fn RNG() {
//!     h4_rng::rng_irq!();
//! }
//! ```
//!
//! ## Integration Notes
//!
//! - Only Command and ACL Data are accepted from the host; only Events and ACL
//!   Data are sent to it.
//! - Every error except a full random pool is fatal; route it to a fault handler.
//! - Only one transport instance should be active at a time in interrupt-driven mode.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "isr")]
pub use critical_section;

pub use heapless;

pub(crate) mod fmt;

pub mod consts;
pub mod controller;
pub mod driver;
pub mod error;
pub mod framer;
pub mod irq;
pub mod mux;
pub mod packet;
pub mod pool;
pub mod rng;

pub use error::Error;
