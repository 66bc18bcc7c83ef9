//! Device lifecycle state machine.
//!
//! One [`TokenRingCard`] exists per physical slot, created on the insertion
//! event and consumed by [`detach`](TokenRingCard::detach) on removal. The
//! attach path reserves every host resource in a fixed order, programs the
//! adapter, and hands it to the protocol driver; any failure rolls the slot
//! all the way back before the error is logged. Nothing partially configured
//! is ever visible outside.

use alloc::string::String;
use alloc::sync::Arc;

use log::{debug, info, warn};
use pccard_api::{CardSocket, DriverError};

use crate::config::AdapterConfig;
use crate::driver::TokenRingDriver;
use crate::hw;
use crate::irq::IrqRelay;
use crate::resources::Reservations;
use crate::state::AdapterState;

/// Lifecycle position of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Record allocated, no resources held.
    Unattached,
    /// Resource configuration in progress.
    Attaching,
    /// Fully configured and handed to the protocol driver.
    Configured,
    /// Hardware kept, detached from network-stack scheduling.
    Suspended,
    /// Teardown of held resources in progress.
    Releasing,
    /// Terminal. Only observable conceptually: detach consumes the record.
    Detached,
}

/// Per-slot device record and lifecycle controller.
pub struct TokenRingCard {
    socket: Arc<dyn CardSocket>,
    driver: Arc<dyn TokenRingDriver>,
    config: AdapterConfig,
    adapter: Arc<AdapterState>,
    reservations: Reservations,
    dev_name: Option<String>,
    state: LifecycleState,
}

impl TokenRingCard {
    /// Handles a card-insertion event: allocates the device record and runs
    /// the full resource configuration.
    ///
    /// On failure the slot is rolled back completely and a diagnostic is
    /// logged; the record itself survives in [`LifecycleState::Unattached`]
    /// so the platform frees it through the usual
    /// [`detach`](Self::detach) path. The insertion event is considered
    /// handled either way — retrying means a fresh attach.
    pub fn attach(
        socket: Arc<dyn CardSocket>,
        driver: Arc<dyn TokenRingDriver>,
        config: AdapterConfig,
    ) -> Self {
        debug!("tokenring_cs: attach");
        let mut card = Self {
            socket,
            driver,
            config,
            adapter: Arc::new(AdapterState::new()),
            reservations: Reservations::new(),
            dev_name: None,
            state: LifecycleState::Attaching,
        };
        match card.configure() {
            Ok(()) => card.state = LifecycleState::Configured,
            Err(err) => {
                warn!("tokenring_cs: configure failed: {err}");
                card.release();
            }
        }
        card
    }

    /// Reserves resources, programs the adapter, and hands it to the
    /// protocol driver.
    ///
    /// Order matters: I/O (primary base with one alternate retry), IRQ with
    /// the relay bound, MMIO window, shared-RAM window, configuration
    /// enable, register program, probe. The first failure aborts; the caller
    /// rolls back.
    fn configure(&mut self) -> Result<(), DriverError> {
        debug!("tokenring_cs: configure");

        let io = self.reservations.reserve_io(&*self.socket)?;
        self.adapter.update_info(|info| info.io_base = io.base);

        let relay = Arc::new(IrqRelay::new(
            Arc::clone(&self.adapter),
            Arc::clone(&self.driver),
        ));
        let irq = self.reservations.reserve_irq(&*self.socket, relay)?;
        self.adapter.set_irq(irq);

        let mmio = self
            .reservations
            .reserve_mmio(&*self.socket, self.config.mmio_base)?;
        let (sram, sram_phys) = self.reservations.reserve_sram(
            &*self.socket,
            self.config.sram_base,
            self.config.sram_size.bytes(),
        )?;
        let sram_page = (self.config.sram_base >> 12) as u16;
        self.adapter.update_info(|info| {
            info.mmio = Some(mmio);
            info.sram_virt = Some(sram);
            info.sram_phys = sram_phys;
            info.sram_page = sram_page;
        });

        crate::resources::request_configuration(&*self.socket)?;

        hw::hw_setup(
            &*self.socket,
            io.base,
            &self.config,
            self.reservations.is_alternate(),
        );

        let name = self.driver.probe_device(&self.adapter)?;
        info!(
            "{name}: port {:#x}, irq {irq}, mmio {:#x}, sram {:#x}",
            io.base, mmio.base, sram.base,
        );
        self.dev_name = Some(name);
        Ok(())
    }

    /// Releases every held resource and returns the slot to
    /// [`LifecycleState::Unattached`].
    ///
    /// Best-effort and idempotent; never escalates a release failure.
    pub fn release(&mut self) {
        debug!("tokenring_cs: release");
        self.state = LifecycleState::Releasing;
        self.reservations.release_all(&*self.socket);
        self.state = LifecycleState::Unattached;
    }

    /// Handles a card-removal event (or module unload), consuming the
    /// record.
    ///
    /// The removal guard is set before anything else, so an interrupt
    /// racing with removal bails out instead of touching resources that are
    /// mid-teardown. Then: unregister the published device, cancel the
    /// protocol driver's timer (waiting out any in-flight invocation),
    /// release all resources, free the record.
    pub fn detach(mut self) {
        debug!("tokenring_cs: detach");
        self.adapter.begin_removal();
        if self.dev_name.take().is_some() {
            self.driver.unregister(&self.adapter);
        }
        self.adapter.cancel_timer_sync();
        self.release();
        // Record and adapter state dropped here, exactly once.
    }

    /// Handles a suspend event: detaches an open device from network-stack
    /// scheduling without touching hardware resources.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::InvalidState`] unless the slot is
    /// [`LifecycleState::Configured`].
    pub fn suspend(&mut self) -> Result<(), DriverError> {
        if self.state != LifecycleState::Configured {
            return Err(DriverError::InvalidState);
        }
        if self.driver.is_open(&self.adapter) {
            self.driver.set_scheduling(&self.adapter, false);
        }
        self.state = LifecycleState::Suspended;
        Ok(())
    }

    /// Handles a resume event: revalidates an open device and reattaches it
    /// to network-stack scheduling.
    ///
    /// A probe failure on resume is logged but not escalated; the device
    /// stays configured and scheduling is restored regardless.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::InvalidState`] unless the slot is
    /// [`LifecycleState::Suspended`].
    pub fn resume(&mut self) -> Result<(), DriverError> {
        if self.state != LifecycleState::Suspended {
            return Err(DriverError::InvalidState);
        }
        if self.driver.is_open(&self.adapter) {
            if let Err(err) = self.driver.probe(&self.adapter) {
                warn!("tokenring_cs: re-probe on resume failed: {err}");
            }
            self.driver.set_scheduling(&self.adapter, true);
        }
        self.state = LifecycleState::Configured;
        Ok(())
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Stack-assigned device name, once configured.
    #[must_use]
    pub fn device_name(&self) -> Option<&str> {
        self.dev_name.as_deref()
    }

    /// Shared adapter state block.
    #[must_use]
    pub fn adapter(&self) -> &Arc<AdapterState> {
        &self.adapter
    }
}
