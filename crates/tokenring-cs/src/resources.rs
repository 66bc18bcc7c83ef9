//! Resource negotiation and rollback.
//!
//! [`Reservations`] tracks every host resource acquired for one slot: the
//! I/O range (primary or alternate wiring variant), the interrupt line, and
//! the two memory windows with their host mappings. Each slot is an
//! `Option`, so release is per-resource idempotent — teardown can run from
//! any failure point of configure without tracking how far setup got.

use alloc::sync::Arc;

use pccard_api::{
    CardSocket, ConfigAttributes, ConfigRequest, DriverError, IntType, InterruptHandler,
    IoAttributes, IoPortRange, IoRequest, IrqAttributes, IrqLine, IrqRequest, MmioRegion,
    WindowAttributes, WindowHandle, WindowRequest,
};

/// I/O base of the primary card wiring variant.
pub const PRIMARY_IO_BASE: u16 = 0x0a20;
/// I/O base of the alternate card wiring variant.
pub const ALTERNATE_IO_BASE: u16 = 0x0a24;
/// Number of consecutive I/O ports the card decodes.
pub const IO_PORT_COUNT: u16 = 4;
/// Number of address lines the card decodes.
pub const IO_ADDR_LINES: u8 = 16;
/// Size of the MMIO register window.
pub const MMIO_WINDOW_SIZE: u64 = 0x2000;
/// Access speed requested for both memory windows.
pub const WINDOW_ACCESS_SPEED_NS: u32 = 250;
/// Configuration option register index for this card family.
pub const CONFIG_INDEX: u8 = 0x61;

/// Host resources held for one slot.
#[derive(Default)]
pub struct Reservations {
    io: Option<IoPortRange>,
    alternate: bool,
    irq: Option<IrqLine>,
    mmio_window: Option<WindowHandle>,
    mmio_map: Option<MmioRegion>,
    sram_window: Option<WindowHandle>,
    sram_map: Option<MmioRegion>,
}

impl Reservations {
    /// Creates an empty reservation set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the card's I/O range, trying the primary base first and
    /// retrying exactly once at the alternate base on contention.
    ///
    /// The two bases correspond to two physical wiring variants of the same
    /// card family; which one is present cannot be known up front.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::ResourceUnavailable`] if both bases are taken.
    pub fn reserve_io(&mut self, socket: &dyn CardSocket) -> Result<IoPortRange, DriverError> {
        let mut req = IoRequest {
            attributes: IoAttributes::DATA_PATH_WIDTH_8,
            base: PRIMARY_IO_BASE,
            len: IO_PORT_COUNT,
            addr_lines: IO_ADDR_LINES,
        };
        let range = match socket.request_io(&req) {
            Ok(range) => range,
            Err(_) => {
                req.base = ALTERNATE_IO_BASE;
                let range = socket.request_io(&req)?;
                self.alternate = true;
                range
            }
        };
        self.io = Some(range);
        Ok(range)
    }

    /// Reserves an exclusive interrupt line with `handler` bound to it.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::ResourceUnavailable`] if no line can be
    /// routed.
    pub fn reserve_irq(
        &mut self,
        socket: &dyn CardSocket,
        handler: Arc<dyn InterruptHandler>,
    ) -> Result<IrqLine, DriverError> {
        let req = IrqRequest {
            attributes: IrqAttributes::EXCLUSIVE,
        };
        let line = socket.request_irq(&req, handler)?;
        self.irq = Some(line);
        Ok(line)
    }

    /// Reserves the MMIO register window, binds `card_offset` into it, and
    /// maps it into host address space.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::ResourceUnavailable`] if the window cannot be
    /// reserved or mapped.
    pub fn reserve_mmio(
        &mut self,
        socket: &dyn CardSocket,
        card_offset: u32,
    ) -> Result<MmioRegion, DriverError> {
        let window = request_window(socket, MMIO_WINDOW_SIZE)?;
        self.mmio_window = Some(window);
        socket.map_mem_page(&window, card_offset, 0)?;
        let region = socket.map_mmio(window.base, window.size)?;
        self.mmio_map = Some(region);
        Ok(region)
    }

    /// Reserves the shared-RAM window, binds `card_offset` into it, and maps
    /// it into host address space.
    ///
    /// Returns the mapped region together with the host-physical window
    /// base.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::ResourceUnavailable`] if the window cannot be
    /// reserved or mapped.
    pub fn reserve_sram(
        &mut self,
        socket: &dyn CardSocket,
        card_offset: u32,
        size: u64,
    ) -> Result<(MmioRegion, u64), DriverError> {
        let window = request_window(socket, size)?;
        self.sram_window = Some(window);
        socket.map_mem_page(&window, card_offset, 0)?;
        let region = socket.map_mmio(window.base, window.size)?;
        self.sram_map = Some(region);
        Ok((region, window.base))
    }

    /// Releases everything held, in reverse acquisition order.
    ///
    /// Unmaps the shared-RAM and MMIO mappings that were actually opened,
    /// releases the shared-RAM window handle, then unconditionally disables
    /// the configuration, which sweeps the I/O range, interrupt line, and
    /// remaining window. Safe to call from any failure point and more than
    /// once; resources already released are skipped.
    pub fn release_all(&mut self, socket: &dyn CardSocket) {
        if let Some(region) = self.sram_map.take() {
            socket.unmap_mmio(region);
        }
        if let Some(window) = self.sram_window.take() {
            socket.release_window(window);
        }
        if let Some(region) = self.mmio_map.take() {
            socket.unmap_mmio(region);
        }
        socket.disable();
        self.mmio_window = None;
        self.irq = None;
        self.io = None;
    }

    /// Returns `true` if the alternate wiring variant's I/O base was
    /// selected.
    #[must_use]
    pub fn is_alternate(&self) -> bool {
        self.alternate
    }

    /// The reserved I/O range, if any.
    #[must_use]
    pub fn io(&self) -> Option<IoPortRange> {
        self.io
    }

    /// The assigned interrupt line, if any.
    #[must_use]
    pub fn irq(&self) -> Option<IrqLine> {
        self.irq
    }
}

/// Applies the card configuration, enabling the reserved interrupt routing.
///
/// # Errors
///
/// Returns [`DriverError::ResourceUnavailable`] if the socket rejects the
/// configuration.
pub fn request_configuration(socket: &dyn CardSocket) -> Result<(), DriverError> {
    let req = ConfigRequest {
        attributes: ConfigAttributes::ENABLE_IRQ,
        int_type: IntType::MemoryAndIo,
        index: CONFIG_INDEX,
    };
    socket.request_configuration(&req)
}

/// Requests a memory window with the card's standard electrical attributes.
fn request_window(socket: &dyn CardSocket, size: u64) -> Result<WindowHandle, DriverError> {
    let req = WindowRequest {
        attributes: WindowAttributes::DATA_WIDTH_16
            | WindowAttributes::MEMORY_COMMON
            | WindowAttributes::ENABLE
            | WindowAttributes::USE_WAIT,
        size,
        access_speed_ns: WINDOW_ACCESS_SPEED_NS,
    };
    socket.request_window(&req)
}
