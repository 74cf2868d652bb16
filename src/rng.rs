//! Priority-segregated pools of hardware random bytes.
//!
//! The hardware random number generator produces one byte per interrupt.
//! [`RandomSource`] routes each byte to the first non-full pool in priority
//! order (`High`, then `Low`) and drops it if both are full. The producer runs
//! in interrupt context, so it never blocks and never reports an error.
//!
//! Consumers read whole vectors at a time, all or nothing:
//!
//! - [`RandomSource::get_high_priority`] and [`RandomSource::get_low_priority`]
//!   return immediately.
//! - [`SharedRandomSource::get_low_priority_blocking`] (feature `isr`) waits for
//!   enough bytes. When the caller runs at or above the RNG interrupt priority
//!   the interrupt can never preempt it, so the caller pumps the generator
//!   itself instead of waiting on a handler it is blocking.
//!
//! ## Example
//!
//! ```rust
//! use h4_rng::rng::{PoolPriority, RandomSource, RngPeripheral};
//!
//! struct Counter(u8);
//!
//! impl RngPeripheral for Counter {
//!     fn start(&mut self) {}
//!     fn stop(&mut self) {}
//!     fn value_ready(&self) -> bool { true }
//!     fn take_value(&mut self) -> u8 { self.0 = self.0.wrapping_add(1); self.0 }
//! }
//!
//! let mut source = RandomSource::new(Counter(0));
//! source.init();
//! assert_eq!(source.on_interrupt(), Some(PoolPriority::High));
//!
//! let mut buf = [0u8; 1];
//! assert!(source.get_high_priority(&mut buf));
//! assert_eq!(buf, [1]);
//! ```

use crate::error::Error;
use crate::fmt::{info, trace};
use crate::pool::RandPool;

/// The two consumer-facing pools, in routing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PoolPriority {
    /// Realtime-critical consumers; filled first.
    High,
    /// Everyone else; filled once `High` is full.
    Low,
}

/// The hardware random number generator, as seen by the pools.
pub trait RngPeripheral {
    /// Starts producing values.
    fn start(&mut self);

    /// Stops producing values.
    fn stop(&mut self);

    /// Whether a value is ready to be read (the "value ready" event).
    fn value_ready(&self) -> bool;

    /// Reads the ready value and clears the "value ready" event.
    fn take_value(&mut self) -> u8;
}

/// Interrupt priority query for the running context.
///
/// Priorities follow the Cortex-M convention: a numerically lower value is
/// more urgent. Every method is asked at call time, so an implementation
/// should read the live state of the core rather than a value captured at
/// setup.
pub trait PriorityProbe {
    /// Priority of the interrupt currently executing, or `None` in thread mode.
    fn current_priority(&self) -> Option<u8>;

    /// Priority assigned to the RNG interrupt.
    fn rng_priority(&self) -> u8;

    /// Whether interrupts are globally masked, for example inside a
    /// `critical_section::with` on a single-core target.
    ///
    /// Defaults to `true`: when the mask state is unknown the caller pumps the
    /// generator itself, which always makes progress.
    fn interrupts_masked(&self) -> bool {
        true
    }

    /// Whether the RNG interrupt is unable to preempt the running context.
    fn blocks_rng_irq(&self) -> bool {
        self.interrupts_masked()
            || self
                .current_priority()
                .is_some_and(|current| current <= self.rng_priority())
    }
}

/// A [`PriorityProbe`] answering from fixed values.
///
/// Only correct when the calling context is known statically, and on hosted
/// targets. On a Cortex-M core use [`CortexMProbe`] (feature `cortex-m`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPriority {
    /// Priority of the calling context, `None` for thread mode.
    pub current: Option<u8>,
    /// Priority of the RNG interrupt.
    pub rng: u8,
    /// Whether the caller runs with interrupts masked.
    pub masked: bool,
}

impl PriorityProbe for FixedPriority {
    fn current_priority(&self) -> Option<u8> {
        self.current
    }

    fn rng_priority(&self) -> u8 {
        self.rng
    }

    fn interrupts_masked(&self) -> bool {
        self.masked
    }
}

#[cfg(feature = "cortex-m")]
pub use cortex::CortexMProbe;

#[cfg(feature = "cortex-m")]
mod cortex {
    use cortex_m::interrupt::InterruptNumber;
    use cortex_m::peripheral::scb::VectActive;
    use cortex_m::peripheral::{NVIC, SCB};
    use cortex_m::register::primask;

    use super::PriorityProbe;

    #[derive(Clone, Copy)]
    struct ActiveIrq(u16);

    // SAFETY: the number comes from the VECTACTIVE field, so it names a
    // vector the core is executing.
    unsafe impl InterruptNumber for ActiveIrq {
        fn number(self) -> u16 {
            self.0
        }
    }

    /// A [`PriorityProbe`] reading the core registers on every call: the active
    /// vector from `SCB->ICSR`, its NVIC priority, and `PRIMASK`.
    ///
    /// System exceptions (SysTick, PendSV, faults) are reported as priority 0,
    /// so a caller running in one always pumps.
    #[derive(Debug, Clone, Copy)]
    pub struct CortexMProbe<I: InterruptNumber> {
        rng_irq: I,
    }

    impl<I: InterruptNumber> CortexMProbe<I> {
        /// Creates a probe for the RNG interrupt `rng_irq`.
        pub const fn new(rng_irq: I) -> Self {
            Self { rng_irq }
        }
    }

    impl<I: InterruptNumber> PriorityProbe for CortexMProbe<I> {
        fn current_priority(&self) -> Option<u8> {
            match SCB::vect_active() {
                VectActive::ThreadMode => None,
                VectActive::Interrupt { irqn } => {
                    Some(NVIC::get_priority(ActiveIrq(u16::from(irqn))))
                }
                VectActive::Exception(_) => Some(0),
            }
        }

        fn rng_priority(&self) -> u8 {
            NVIC::get_priority(self.rng_irq)
        }

        fn interrupts_masked(&self) -> bool {
            primask::read().is_inactive()
        }
    }
}

/// The random-number interface registered with the controller.
pub trait RandomNumberSource {
    /// Fills `buf` from the high priority pool, or returns `false` without consuming anything.
    fn get_high_priority(&self, buf: &mut [u8]) -> bool;

    /// Fills `buf` from the low priority pool, or returns `false` without consuming anything.
    fn get_low_priority(&self, buf: &mut [u8]) -> bool;

    /// Fills `buf` from the low priority pool, waiting as long as it takes.
    fn get_low_priority_blocking(&self, buf: &mut [u8]) -> Result<(), Error>;
}

/// Two random byte pools fed by one hardware generator.
#[derive(Debug)]
pub struct RandomSource<P: RngPeripheral> {
    /// The hardware generator.
    pub rng: P,
    high: RandPool,
    low: RandPool,
    /// Bytes discarded because both pools were full.
    pub dropped: u32,
}

impl<P: RngPeripheral> RandomSource<P> {
    /// Creates a source with empty pools. The generator is not started.
    pub const fn new(rng: P) -> Self {
        Self {
            rng,
            high: RandPool::new(),
            low: RandPool::new(),
            dropped: 0,
        }
    }

    /// Empties both pools and starts the generator.
    pub fn init(&mut self) {
        self.high.clear();
        self.low.clear();
        self.rng.start();
        info!("rng started");
    }

    /// Stops the generator. Buffered bytes stay available.
    pub fn stop(&mut self) {
        self.rng.stop();
        info!("rng stopped");
    }

    /// Read-only view of one pool.
    pub fn pool(&self, priority: PoolPriority) -> &RandPool {
        match priority {
            PoolPriority::High => &self.high,
            PoolPriority::Low => &self.low,
        }
    }

    /// Routes one freshly produced byte to the first pool with room.
    ///
    /// # Returns
    /// The pool that took the byte, or `None` if it was dropped.
    pub fn on_byte_produced(&mut self, byte: u8) -> Option<PoolPriority> {
        for (priority, pool) in [
            (PoolPriority::High, &mut self.high),
            (PoolPriority::Low, &mut self.low),
        ] {
            if pool.enqueue(byte).is_ok() {
                return Some(priority);
            }
        }
        self.dropped = self.dropped.wrapping_add(1);
        trace!("rng pools full, dropped byte");
        None
    }

    /// Body of the RNG interrupt handler.
    ///
    /// Reads the ready value, if there is one, and routes it.
    pub fn on_interrupt(&mut self) -> Option<PoolPriority> {
        if !self.rng.value_ready() {
            return None;
        }
        let value = self.rng.take_value();
        self.on_byte_produced(value)
    }

    /// Non-blocking, all-or-nothing read from the high priority pool.
    pub fn get_high_priority(&mut self, buf: &mut [u8]) -> bool {
        self.high.try_take(buf)
    }

    /// Non-blocking, all-or-nothing read from the low priority pool.
    pub fn get_low_priority(&mut self, buf: &mut [u8]) -> bool {
        self.low.try_take(buf)
    }
}

#[cfg(feature = "isr")]
pub use shared::{RandomSourceHandle, SharedRandomSource};

#[cfg(feature = "isr")]
mod shared {
    use core::cell::RefCell;
    use core::fmt;

    use critical_section::Mutex;

    use super::{PriorityProbe, RandomNumberSource, RandomSource, RngPeripheral};
    use crate::consts::RAND_POOL_CAPACITY;
    use crate::error::Error;
    use crate::fmt::debug;

    /// A [`RandomSource`] shared between the RNG interrupt and its consumers.
    ///
    /// Every access runs inside a `critical_section`, which is held only for a
    /// single pool operation at a time.
    ///
    /// ```rust,ignore
    /// static RANDOM: SharedRandomSource<Rng> = SharedRandomSource::new();
    ///
    /// let _ = RANDOM.install(RandomSource::new(rng));
    ///
    /// #[interrupt]
    /// fn RNG() {
    ///     RANDOM.on_interrupt();
    /// }
    /// ```
    pub struct SharedRandomSource<P: RngPeripheral> {
        inner: Mutex<RefCell<Option<RandomSource<P>>>>,
    }

    impl<P: RngPeripheral> fmt::Debug for SharedRandomSource<P> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("SharedRandomSource").finish_non_exhaustive()
        }
    }

    impl<P: RngPeripheral> Default for SharedRandomSource<P> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<P: RngPeripheral> SharedRandomSource<P> {
        /// Creates an empty slot, suitable for a `static`.
        pub const fn new() -> Self {
            Self {
                inner: Mutex::new(RefCell::new(None)),
            }
        }

        /// Stores `source`, then initializes it (empties its pools, starts the
        /// generator) within the same critical section.
        ///
        /// # Returns
        /// The previously installed source, already stopped.
        pub fn install(&self, source: RandomSource<P>) -> Option<RandomSource<P>> {
            critical_section::with(|cs| {
                let mut slot = self.inner.borrow_ref_mut(cs);
                let mut previous = slot.replace(source);
                if let Some(previous) = previous.as_mut() {
                    previous.stop();
                }
                if let Some(installed) = slot.as_mut() {
                    installed.init();
                }
                previous
            })
        }

        /// Runs `f` on the installed source inside a critical section.
        ///
        /// # Errors
        /// [`Error::NotInstalled`] if [`install`](SharedRandomSource::install) was never called.
        pub fn with<R>(&self, f: impl FnOnce(&mut RandomSource<P>) -> R) -> Result<R, Error> {
            critical_section::with(|cs| {
                self.inner
                    .borrow_ref_mut(cs)
                    .as_mut()
                    .map(f)
                    .ok_or(Error::NotInstalled)
            })
        }

        /// Body of the RNG interrupt handler. Does nothing before setup.
        pub fn on_interrupt(&self) {
            let _ = self.with(|source| source.on_interrupt());
        }

        /// Routes one byte as if the generator had just produced it.
        pub fn deliver(&self, byte: u8) {
            let _ = self.with(|source| source.on_byte_produced(byte));
        }

        /// Non-blocking read from the high priority pool; `false` before setup.
        pub fn get_high_priority(&self, buf: &mut [u8]) -> bool {
            self.with(|source| source.get_high_priority(buf))
                .unwrap_or(false)
        }

        /// Non-blocking read from the low priority pool; `false` before setup.
        pub fn get_low_priority(&self, buf: &mut [u8]) -> bool {
            self.with(|source| source.get_low_priority(buf))
                .unwrap_or(false)
        }

        /// Fills `buf` from the low priority pool, waiting until enough bytes exist.
        ///
        /// There is no timeout. If `probe` reports that the caller blocks the RNG
        /// interrupt, either by priority or because interrupts are masked (as
        /// inside a controller callback run from [`crate::irq`]), each retry polls
        /// the generator's "value ready" flag and runs the interrupt body by hand.
        /// Otherwise the caller spins and lets the interrupt fill the pool.
        ///
        /// # Errors
        /// - [`Error::RequestTooLarge`] if `buf` is longer than a pool can hold
        /// - [`Error::NotInstalled`] before setup
        pub fn get_low_priority_blocking<Q: PriorityProbe>(
            &self,
            buf: &mut [u8],
            probe: &Q,
        ) -> Result<(), Error> {
            if buf.len() > RAND_POOL_CAPACITY {
                return Err(Error::RequestTooLarge {
                    requested: buf.len(),
                    capacity: RAND_POOL_CAPACITY,
                });
            }

            let pump = probe.blocks_rng_irq();
            if pump {
                debug!(
                    "caller blocks rng irq (priority {:?}), pumping",
                    probe.current_priority()
                );
            }

            while !self.with(|source| source.get_low_priority(buf))? {
                if pump {
                    let _ = self.with(|source| source.on_interrupt())?;
                } else {
                    core::hint::spin_loop();
                }
            }
            Ok(())
        }
    }

    /// A [`SharedRandomSource`] paired with the probe of the context that reads it.
    ///
    /// This is what gets registered with the controller as its
    /// [`RandomNumberSource`]. The handle keeps the probe, not an answer: `Q`
    /// must read the live execution context on every call (see
    /// [`CortexMProbe`](crate::rng::CortexMProbe) with feature `cortex-m`), since
    /// the controller may call from thread mode, from an interrupt, or inside a
    /// critical section.
    #[derive(Debug)]
    pub struct RandomSourceHandle<'a, P: RngPeripheral, Q: PriorityProbe> {
        source: &'a SharedRandomSource<P>,
        probe: Q,
    }

    impl<'a, P: RngPeripheral, Q: PriorityProbe> RandomSourceHandle<'a, P, Q> {
        /// Pairs `source` with `probe`.
        pub const fn new(source: &'a SharedRandomSource<P>, probe: Q) -> Self {
            Self { source, probe }
        }
    }

    impl<P: RngPeripheral, Q: PriorityProbe> RandomNumberSource for RandomSourceHandle<'_, P, Q> {
        fn get_high_priority(&self, buf: &mut [u8]) -> bool {
            self.source.get_high_priority(buf)
        }

        fn get_low_priority(&self, buf: &mut [u8]) -> bool {
            self.source.get_low_priority(buf)
        }

        fn get_low_priority_blocking(&self, buf: &mut [u8]) -> Result<(), Error> {
            self.source.get_low_priority_blocking(buf, &self.probe)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::RAND_POOL_CAPACITY;
    use std::collections::VecDeque;

    /// Generator that replays a scripted sequence of values.
    #[derive(Debug, Default)]
    struct ScriptedRng {
        values: VecDeque<u8>,
        running: bool,
        reads: usize,
    }

    impl ScriptedRng {
        fn with_values(values: impl IntoIterator<Item = u8>) -> Self {
            Self {
                values: values.into_iter().collect(),
                ..Default::default()
            }
        }
    }

    impl RngPeripheral for ScriptedRng {
        fn start(&mut self) {
            self.running = true;
        }

        fn stop(&mut self) {
            self.running = false;
        }

        fn value_ready(&self) -> bool {
            self.running && !self.values.is_empty()
        }

        fn take_value(&mut self) -> u8 {
            self.reads += 1;
            self.values.pop_front().unwrap()
        }
    }

    fn fill_high(source: &mut RandomSource<ScriptedRng>) {
        for b in 0..RAND_POOL_CAPACITY {
            assert_eq!(source.on_byte_produced(b as u8), Some(PoolPriority::High));
        }
    }

    #[test]
    fn test_init_starts_generator_with_empty_pools() {
        let mut source = RandomSource::new(ScriptedRng::default());
        let _ = source.on_byte_produced(1);
        source.init();
        assert!(source.rng.running);
        assert!(source.pool(PoolPriority::High).is_empty());
        assert!(source.pool(PoolPriority::Low).is_empty());
        source.stop();
        assert!(!source.rng.running);
    }

    #[test]
    fn test_high_pool_is_filled_first() {
        let mut source = RandomSource::new(ScriptedRng::default());
        assert_eq!(source.on_byte_produced(0x11), Some(PoolPriority::High));
        assert_eq!(source.pool(PoolPriority::High).len(), 1);
        assert!(source.pool(PoolPriority::Low).is_empty());
    }

    #[test]
    fn test_overflow_routes_to_low_then_drops() {
        let mut source = RandomSource::new(ScriptedRng::default());
        fill_high(&mut source);

        for b in 0..RAND_POOL_CAPACITY {
            assert_eq!(source.on_byte_produced(b as u8), Some(PoolPriority::Low));
        }
        for b in 0..10u8 {
            assert_eq!(source.on_byte_produced(b), None);
        }

        assert!(source.pool(PoolPriority::High).is_full());
        assert!(source.pool(PoolPriority::Low).is_full());
        assert_eq!(source.pool(PoolPriority::Low).len(), RAND_POOL_CAPACITY);
        assert_eq!(source.dropped, 10);
    }

    #[test]
    fn test_draining_high_makes_room_before_low() {
        let mut source = RandomSource::new(ScriptedRng::default());
        fill_high(&mut source);
        let mut buf = [0u8; 2];
        assert!(source.get_high_priority(&mut buf));
        assert_eq!(buf, [0, 1]);

        assert_eq!(source.on_byte_produced(0xee), Some(PoolPriority::High));
        assert!(source.pool(PoolPriority::Low).is_empty());
    }

    #[test]
    fn test_getters_are_all_or_nothing_per_pool() {
        let mut source = RandomSource::new(ScriptedRng::default());
        for b in 0..3u8 {
            let _ = source.on_byte_produced(b);
        }

        let mut buf = [0u8; 4];
        assert!(!source.get_high_priority(&mut buf));
        assert!(!source.get_low_priority(&mut [0u8; 1]));
        assert_eq!(source.pool(PoolPriority::High).len(), 3);

        let mut buf = [0u8; 3];
        assert!(source.get_high_priority(&mut buf));
        assert_eq!(buf, [0, 1, 2]);
    }

    #[test]
    fn test_on_interrupt_reads_only_when_ready() {
        let mut source = RandomSource::new(ScriptedRng::with_values([0x42]));
        assert_eq!(source.on_interrupt(), None);
        source.init();
        assert_eq!(source.on_interrupt(), Some(PoolPriority::High));
        assert_eq!(source.on_interrupt(), None);
        assert_eq!(source.rng.reads, 1);
    }

    #[test]
    fn test_priority_probe_comparison() {
        let thread = FixedPriority { current: None, rng: 7, masked: false };
        let urgent = FixedPriority { current: Some(2), rng: 7, masked: false };
        let equal = FixedPriority { current: Some(7), rng: 7, masked: false };
        let relaxed = FixedPriority { current: Some(9), rng: 7, masked: false };
        let thread_masked = FixedPriority { current: None, rng: 7, masked: true };
        assert!(!thread.blocks_rng_irq());
        assert!(thread_masked.blocks_rng_irq());
        assert!(urgent.blocks_rng_irq());
        assert!(equal.blocks_rng_irq());
        assert!(!relaxed.blocks_rng_irq());
    }

    #[cfg(feature = "isr")]
    mod shared {
        use super::*;
        use std::sync::atomic::{AtomicBool, Ordering};

        fn installed_with_full_high(values: impl IntoIterator<Item = u8>) -> SharedRandomSource<ScriptedRng> {
            let shared = SharedRandomSource::new();
            let _ = shared.install(RandomSource::new(ScriptedRng::with_values(values)));
            for b in 0..RAND_POOL_CAPACITY {
                shared.deliver(b as u8);
            }
            shared
        }

        #[test]
        fn test_uninstalled_source_reports_nothing() {
            let shared: SharedRandomSource<ScriptedRng> = SharedRandomSource::new();
            let mut buf = [0u8; 1];
            assert!(!shared.get_high_priority(&mut buf));
            assert!(!shared.get_low_priority(&mut buf));
            let probe = FixedPriority { current: Some(1), rng: 7, masked: false };
            assert_eq!(
                shared.get_low_priority_blocking(&mut buf, &probe),
                Err(Error::NotInstalled)
            );
        }

        #[test]
        fn test_blocking_rejects_oversized_request() {
            let shared = installed_with_full_high(std::iter::empty());
            let mut buf = [0u8; RAND_POOL_CAPACITY + 1];
            let probe = FixedPriority { current: None, rng: 7, masked: false };
            assert_eq!(
                shared.get_low_priority_blocking(&mut buf, &probe),
                Err(Error::RequestTooLarge {
                    requested: RAND_POOL_CAPACITY + 1,
                    capacity: RAND_POOL_CAPACITY,
                })
            );
        }

        #[test]
        fn test_blocking_pumps_generator_when_irq_is_masked() {
            let shared = installed_with_full_high(100..110);
            let probe = FixedPriority { current: Some(2), rng: 7, masked: false };

            let mut buf = [0u8; 5];
            shared.get_low_priority_blocking(&mut buf, &probe).unwrap();
            assert_eq!(buf, [100, 101, 102, 103, 104]);

            // Pumped exactly as many values as were needed.
            let (reads, low) = shared
                .with(|s| (s.rng.reads, s.pool(PoolPriority::Low).len()))
                .unwrap();
            assert_eq!(reads, 5);
            assert_eq!(low, 0);
        }

        #[test]
        fn test_blocking_waits_for_interrupt_delivery() {
            let shared = installed_with_full_high(std::iter::empty());
            let probe = FixedPriority { current: None, rng: 7, masked: false };
            let done = AtomicBool::new(false);

            std::thread::scope(|scope| {
                let _ = scope.spawn(|| {
                    for b in 200..=207u8 {
                        shared.deliver(b);
                        std::thread::yield_now();
                    }
                    done.store(true, Ordering::SeqCst);
                });

                let mut buf = [0u8; 6];
                shared.get_low_priority_blocking(&mut buf, &probe).unwrap();
                assert_eq!(buf, [200, 201, 202, 203, 204, 205]);
            });

            assert!(done.load(Ordering::SeqCst));
            let mut rest = [0u8; 2];
            assert!(shared.get_low_priority(&mut rest));
            assert_eq!(rest, [206, 207]);
        }

        #[test]
        fn test_handle_exposes_registered_interface() {
            let shared = installed_with_full_high([1, 2, 3]);
            let handle = RandomSourceHandle::new(&shared, FixedPriority { current: Some(0), rng: 7, masked: false });

            let mut buf = [0u8; 3];
            handle.get_low_priority_blocking(&mut buf).unwrap();
            assert_eq!(buf, [1, 2, 3]);

            let mut buf = [0u8; 2];
            assert!(handle.get_high_priority(&mut buf));
            assert_eq!(buf, [0, 1]);
            assert!(!handle.get_low_priority(&mut buf));
        }

        #[test]
        fn test_unknown_mask_state_defaults_to_pumping() {
            struct ThreadMode;

            impl PriorityProbe for ThreadMode {
                fn current_priority(&self) -> Option<u8> {
                    None
                }

                fn rng_priority(&self) -> u8 {
                    7
                }
            }

            assert!(ThreadMode.blocks_rng_irq());
            let shared = installed_with_full_high([9, 8]);
            let mut buf = [0u8; 2];
            shared.get_low_priority_blocking(&mut buf, &ThreadMode).unwrap();
            assert_eq!(buf, [9, 8]);
        }

        #[test]
        fn test_blocking_inside_critical_section_pumps() {
            let shared = installed_with_full_high(50..58);
            let probe = FixedPriority { current: None, rng: 7, masked: true };
            let ticking = AtomicBool::new(true);

            std::thread::scope(|scope| {
                // Stands in for the RNG interrupt, which cannot run while the
                // caller holds the critical section.
                let _ = scope.spawn(|| {
                    while ticking.load(Ordering::SeqCst) {
                        shared.on_interrupt();
                        std::thread::sleep(std::time::Duration::from_millis(1));
                    }
                });

                let mut buf = [0u8; 8];
                let result = critical_section::with(|_| {
                    shared.get_low_priority_blocking(&mut buf, &probe)
                });
                ticking.store(false, Ordering::SeqCst);

                assert_eq!(result, Ok(()));
                assert_eq!(buf, [50, 51, 52, 53, 54, 55, 56, 57]);
            });
        }

        #[test]
        fn test_install_stops_replaced_source() {
            let shared = SharedRandomSource::new();
            assert!(shared.install(RandomSource::new(ScriptedRng::with_values([1]))).is_none());

            let previous = shared
                .install(RandomSource::new(ScriptedRng::with_values([2])))
                .unwrap();
            assert!(!previous.rng.running);

            // The new source is running as soon as it is visible.
            shared.on_interrupt();
            let mut buf = [0u8; 1];
            assert!(shared.get_high_priority(&mut buf));
            assert_eq!(buf, [2]);
        }
    }
}
