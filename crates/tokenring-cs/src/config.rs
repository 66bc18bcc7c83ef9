//! Per-adapter configuration.
//!
//! One [`AdapterConfig`] is captured at attach time and stored in the device
//! record, so concurrent attaches of multiple slots each see a consistent
//! snapshot. Parsing user-supplied parameter strings is the caller's job.

/// Shared-RAM size selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SramSize {
    /// 8 KB of shared RAM.
    K8,
    /// 16 KB of shared RAM.
    K16,
    /// 32 KB of shared RAM.
    K32,
    /// 64 KB of shared RAM.
    K64,
}

impl SramSize {
    /// Size in kilobytes.
    #[must_use]
    pub const fn kb(self) -> u32 {
        match self {
            Self::K8 => 8,
            Self::K16 => 16,
            Self::K32 => 32,
            Self::K64 => 64,
        }
    }

    /// Size in bytes.
    #[must_use]
    pub const fn bytes(self) -> u64 {
        (self.kb() as u64) * 1024
    }

    /// Page-size code programmed into the adapter's configuration register
    /// (8 KB = 0, 16 KB = 1, 32 KB = 2, 64 KB = 3).
    #[must_use]
    pub const fn page_code(self) -> u8 {
        let code = ((self.kb() >> 4) & 0x07) as u8;
        // 64 KB computes to 4 but the register encodes it as 3.
        if code == 4 { 3 } else { code }
    }
}

/// Ring operating speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingSpeed {
    /// 4 Mbps ring.
    Mbps4,
    /// 16 Mbps ring.
    Mbps16,
}

/// Adapter parameters applied to a slot at attach time.
#[derive(Debug, Clone, Copy)]
pub struct AdapterConfig {
    /// Card-relative base offset of the MMIO register window.
    pub mmio_base: u32,
    /// Card-relative base offset of the shared-RAM window.
    pub sram_base: u32,
    /// Shared-RAM size.
    pub sram_size: SramSize,
    /// Ring operating speed.
    pub ring_speed: RingSpeed,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            mmio_base: 0x000c_e000,
            sram_base: 0x000d_0000,
            sram_size: SramSize::K64,
            ring_speed: RingSpeed::Mbps16,
        }
    }
}
