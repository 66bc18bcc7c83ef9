//! Socket resource handles and request templates.
//!
//! Handles ([`IoPortRange`], [`IrqLine`], [`WindowHandle`], [`MmioRegion`])
//! represent exclusive claims handed out by a [`CardSocket`](crate::socket::CardSocket).
//! Request templates carry the attributes a driver asks for; the socket fills
//! in what was actually assigned (port base, interrupt line, window base).

use bitflags::bitflags;

/// A reserved I/O port range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoPortRange {
    /// First port of the range, as assigned by the socket.
    pub base: u16,
    /// Number of consecutive ports.
    pub len: u16,
}

/// An assigned interrupt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrqLine(pub u8);

impl core::fmt::Display for IrqLine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reserved memory window.
///
/// The host-visible base address is chosen by the socket controller, not the
/// driver; it is read back from this handle after a successful
/// [`request_window`](crate::socket::CardSocket::request_window).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHandle {
    /// Socket-local window index.
    pub index: u8,
    /// Host-visible physical base address assigned by the socket.
    pub base: u64,
    /// Window size in bytes.
    pub size: u64,
}

/// A memory window mapped into host address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MmioRegion {
    /// Host-accessible base address.
    pub base: u64,
    /// Size of the mapped region in bytes.
    pub size: u64,
}

bitflags! {
    /// Attributes for an I/O range request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IoAttributes: u16 {
        /// 8-bit data path.
        const DATA_PATH_WIDTH_8 = 1 << 0;
        /// 16-bit data path.
        const DATA_PATH_WIDTH_16 = 1 << 1;
    }
}

bitflags! {
    /// Attributes for an interrupt-line request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IrqAttributes: u16 {
        /// The line is for this device's exclusive use.
        const EXCLUSIVE = 1 << 0;
        /// The line may be shared with other devices.
        const SHARED = 1 << 1;
    }
}

bitflags! {
    /// Attributes for a memory-window request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WindowAttributes: u16 {
        /// 16-bit data width.
        const DATA_WIDTH_16 = 1 << 0;
        /// Common (as opposed to attribute) memory.
        const MEMORY_COMMON = 1 << 1;
        /// Enable the window immediately.
        const ENABLE = 1 << 2;
        /// Insert wait states on access.
        const USE_WAIT = 1 << 3;
    }
}

bitflags! {
    /// Attributes for a configuration request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ConfigAttributes: u16 {
        /// Route the card's interrupt once configured.
        const ENABLE_IRQ = 1 << 0;
    }
}

/// Interrupt signaling mode requested from the socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntType {
    /// Memory-only card.
    Memory,
    /// Memory and I/O card.
    MemoryAndIo,
}

/// An I/O range request template.
#[derive(Debug, Clone, Copy)]
pub struct IoRequest {
    /// Electrical attributes of the range.
    pub attributes: IoAttributes,
    /// Requested base port (0 = any).
    pub base: u16,
    /// Number of consecutive ports.
    pub len: u16,
    /// Number of address lines the card decodes.
    pub addr_lines: u8,
}

/// An interrupt-line request template.
#[derive(Debug, Clone, Copy)]
pub struct IrqRequest {
    /// Sharing attributes of the line.
    pub attributes: IrqAttributes,
}

/// A memory-window request template.
#[derive(Debug, Clone, Copy)]
pub struct WindowRequest {
    /// Electrical attributes of the window.
    pub attributes: WindowAttributes,
    /// Window size in bytes.
    pub size: u64,
    /// Requested access speed in nanoseconds.
    pub access_speed_ns: u32,
}

/// A configuration request template.
#[derive(Debug, Clone, Copy)]
pub struct ConfigRequest {
    /// Configuration attributes.
    pub attributes: ConfigAttributes,
    /// Interrupt signaling mode.
    pub int_type: IntType,
    /// Configuration option register index.
    pub index: u8,
}
