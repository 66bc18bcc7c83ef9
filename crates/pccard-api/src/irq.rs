//! Interrupt delivery types.

use crate::resource::IrqLine;

/// Result of an interrupt handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqStatus {
    /// The interrupt was processed by this device's handler.
    Handled,
    /// The interrupt did not originate from this device.
    NotHandled,
}

/// An interrupt handler registered against a reserved line.
///
/// The platform invokes [`handle_interrupt`](Self::handle_interrupt) once per
/// delivery, in interrupt context, never concurrently for the same device.
/// No interrupt is delivered after the underlying line has been released.
pub trait InterruptHandler: Send + Sync {
    /// Called on each interrupt delivery for the bound device.
    fn handle_interrupt(&self, line: IrqLine) -> IrqStatus;
}
