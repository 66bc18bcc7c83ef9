//! Adapter configuration-register programming.
//!
//! The adapter takes sixteen bits of configuration through a single byte-wide
//! control port, four bits at a time: bits 7..4 of each written byte select
//! which field is being set, bits 3..0 carry the value. The layout and write
//! order are fixed by the card's control protocol; the hardware gives no
//! acknowledgement, so correctness shows up only in whether the subsequent
//! probe succeeds.

use pccard_api::CardSocket;

use crate::config::{AdapterConfig, RingSpeed};

/// Written last to release the card into active operation.
const RELEASE_CARD: u8 = 0x40;

/// Computes the five configuration bytes for the given parameters.
///
/// Field tags (high nibble): `0x0` = MMIO base bits 19..16, `0x1` = MMIO
/// base bits 15..12 (low bit always zero), `0x2` = fixed vendor value,
/// `0x3` = shared-RAM page size, ring speed, and port-variant select.
#[must_use]
pub fn setup_bytes(config: &AdapterConfig, alternate_port: bool) -> [u8; 5] {
    // First nibble provides 4 bits of mmio.
    let b0 = ((config.mmio_base >> 16) & 0x0f) as u8;

    // Second nibble provides 3 bits of mmio; the low bit is not used.
    let b1 = 0x10 | ((config.mmio_base >> 12) & 0x0e) as u8;

    // Third nibble is a fixed vendor-defined value.
    let b2 = 0x26;

    // Fourth nibble: page-size code in bits 3..2, ring speed in bit 1,
    // port variant in bit 0.
    let mut b3 = 0x30 | (config.sram_size.page_code() << 2);
    if config.ring_speed == RingSpeed::Mbps16 {
        b3 |= 0x02;
    }
    if alternate_port {
        b3 |= 0x01;
    }

    [b0, b1, b2, b3, RELEASE_CARD]
}

/// Programs the adapter's configuration register and releases the card.
///
/// Fire-and-forget: the write sequence reports no status.
pub fn hw_setup(
    socket: &dyn CardSocket,
    io_base: u16,
    config: &AdapterConfig,
    alternate_port: bool,
) {
    for byte in setup_bytes(config, alternate_port) {
        socket.write_io(io_base, byte);
    }
}
