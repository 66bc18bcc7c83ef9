//! The per-slot socket services contract.

use alloc::sync::Arc;

use crate::error::DriverError;
use crate::irq::InterruptHandler;
use crate::resource::{
    ConfigRequest, IoPortRange, IoRequest, IrqLine, IrqRequest, MmioRegion, WindowHandle,
    WindowRequest,
};

/// Reservation and release primitives for one physical card slot.
///
/// Implemented by the socket (bus) subsystem and handed to a driver with each
/// insertion event. Drivers reserve scarce host resources through this trait
/// and must release everything they acquired before the slot can be reused.
///
/// Reservation calls are synchronous: they either complete or fail
/// immediately, with no internal retry. Release primitives are best-effort
/// and idempotent — releasing a resource that is not held is a no-op.
pub trait CardSocket: Send + Sync {
    /// Reserves an I/O port range with the given attributes.
    ///
    /// Returns the range actually assigned. Fails with
    /// [`DriverError::ResourceUnavailable`] on contention for the requested
    /// base.
    fn request_io(&self, req: &IoRequest) -> Result<IoPortRange, DriverError>;

    /// Reserves an interrupt line and binds `handler` to it.
    ///
    /// The line actually assigned may differ from any requested value,
    /// depending on platform routing. The handler stays bound until the
    /// configuration is disabled; no delivery occurs after release.
    fn request_irq(
        &self,
        req: &IrqRequest,
        handler: Arc<dyn InterruptHandler>,
    ) -> Result<IrqLine, DriverError>;

    /// Reserves a mappable memory window of the requested size and
    /// electrical characteristics.
    ///
    /// The host-visible base address is chosen by the socket controller and
    /// read back from the returned handle.
    fn request_window(&self, req: &WindowRequest) -> Result<WindowHandle, DriverError>;

    /// Binds a card-relative memory offset into `window` at the given page.
    fn map_mem_page(
        &self,
        window: &WindowHandle,
        card_offset: u32,
        page: u8,
    ) -> Result<(), DriverError>;

    /// Applies the card configuration, routing its interrupt and enabling
    /// the reserved resources.
    fn request_configuration(&self, req: &ConfigRequest) -> Result<(), DriverError>;

    /// Maps a window's host-physical range into host-accessible address
    /// space.
    fn map_mmio(&self, base: u64, size: u64) -> Result<MmioRegion, DriverError>;

    /// Unmaps a region previously mapped with [`map_mmio`](Self::map_mmio).
    fn unmap_mmio(&self, region: MmioRegion);

    /// Releases a reserved memory window.
    fn release_window(&self, window: WindowHandle);

    /// Disables the card configuration.
    ///
    /// Releases the configuration together with any still-held I/O range,
    /// interrupt line, and remaining windows. Idempotent: disabling a slot
    /// that was never configured is a no-op.
    fn disable(&self);

    /// Writes one byte to a port inside a reserved I/O range.
    fn write_io(&self, port: u16, value: u8);
}
