//! Interrupt relay.
//!
//! The relay is what actually gets registered against the reserved line. It
//! checks the removal guard before every forward, so an interrupt racing
//! with card removal returns without touching resources that may already be
//! freed or mid-free on the detach path.

use alloc::sync::Arc;

use pccard_api::{InterruptHandler, IrqLine, IrqStatus};

use crate::driver::TokenRingDriver;
use crate::state::AdapterState;

/// Forwards interrupts to the protocol driver unless removal has begun.
pub struct IrqRelay {
    adapter: Arc<AdapterState>,
    driver: Arc<dyn TokenRingDriver>,
}

impl IrqRelay {
    /// Creates a relay bound to the given adapter and protocol driver.
    #[must_use]
    pub fn new(adapter: Arc<AdapterState>, driver: Arc<dyn TokenRingDriver>) -> Self {
        Self { adapter, driver }
    }
}

impl InterruptHandler for IrqRelay {
    fn handle_interrupt(&self, line: IrqLine) -> IrqStatus {
        // Card removal in progress: the delivery is consumed but nothing
        // is forwarded.
        if self.adapter.is_removing() {
            return IrqStatus::Handled;
        }
        self.driver.handle_interrupt(line, &self.adapter)
    }
}
