//! Shared per-adapter state.
//!
//! [`AdapterState`] is the state block shared between the lifecycle
//! controller, the interrupt relay, and the protocol driver. It is allocated
//! at attach, filled in during configure, and freed only after detach has
//! cancelled the timer and released every hardware resource.

use alloc::boxed::Box;
use core::sync::atomic::{AtomicBool, Ordering};

use pccard_api::{IrqLine, MmioRegion};
use spin::Mutex;

use crate::driver::PeriodicTimer;

/// MMIO offset of the adapter's global interrupt-enable latch.
pub const GLOBAL_INT_ENABLE: u16 = 0x02f0;

/// Hardware addresses and routing recorded during configure.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdapterInfo {
    /// Base of the reserved I/O port range.
    pub io_base: u16,
    /// Assigned interrupt line.
    pub irq: u8,
    /// Interrupt-enable latch offset for the assigned line.
    pub global_int_enable: u16,
    /// Mapped MMIO register window.
    pub mmio: Option<MmioRegion>,
    /// Mapped shared-RAM window.
    pub sram_virt: Option<MmioRegion>,
    /// Host-physical base of the shared-RAM window.
    pub sram_phys: u64,
    /// Card-side shared-RAM page (card offset >> 12).
    pub sram_page: u16,
}

/// State block shared with the protocol driver and the interrupt relay.
pub struct AdapterState {
    /// Removal guard: set before any teardown step, checked by the
    /// interrupt relay before forwarding.
    removing: AtomicBool,
    info: Mutex<AdapterInfo>,
    timer: Mutex<Option<Box<dyn PeriodicTimer + Send>>>,
}

impl AdapterState {
    /// Creates an empty state block for a freshly attached slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            removing: AtomicBool::new(false),
            info: Mutex::new(AdapterInfo::default()),
            timer: Mutex::new(None),
        }
    }

    /// Marks the adapter as mid-removal.
    ///
    /// Must happen before any resource teardown; every interrupt delivered
    /// after this call returns without touching the hardware.
    pub fn begin_removal(&self) {
        self.removing.store(true, Ordering::Release);
    }

    /// Returns `true` once removal has begun.
    pub fn is_removing(&self) -> bool {
        self.removing.load(Ordering::Acquire)
    }

    /// Returns a copy of the recorded hardware addresses.
    pub fn info(&self) -> AdapterInfo {
        *self.info.lock()
    }

    /// Updates the recorded hardware addresses.
    pub fn update_info(&self, f: impl FnOnce(&mut AdapterInfo)) {
        f(&mut self.info.lock());
    }

    /// Records the assigned interrupt line and derives the interrupt-enable
    /// latch offset.
    ///
    /// The latch encodes the line number directly, except line 9 which the
    /// adapter expects as the reserved encoding 2.
    pub fn set_irq(&self, line: IrqLine) {
        let encoded = if line.0 == 9 { 2 } else { line.0 };
        self.update_info(|info| {
            info.irq = line.0;
            info.global_int_enable = GLOBAL_INT_ENABLE + u16::from(encoded);
        });
    }

    /// Installs the protocol driver's periodic timer.
    pub fn set_timer(&self, timer: Box<dyn PeriodicTimer + Send>) {
        *self.timer.lock() = Some(timer);
    }

    /// Cancels the periodic timer and waits for any in-flight invocation to
    /// finish.
    ///
    /// Must complete before the state block is freed, so no timer callback
    /// can fire into freed memory. No-op if no timer was installed.
    pub fn cancel_timer_sync(&self) {
        if let Some(mut timer) = self.timer.lock().take() {
            timer.cancel_sync();
        }
    }
}

impl Default for AdapterState {
    fn default() -> Self {
        Self::new()
    }
}
