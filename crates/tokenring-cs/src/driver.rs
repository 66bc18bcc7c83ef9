//! The protocol-driver contract.
//!
//! The protocol driver owns everything past bring-up: it validates the
//! configured hardware, registers the network device, and services
//! interrupts. This crate only prepares the adapter and hands it over
//! through [`TokenRingDriver`].

use alloc::string::String;
use alloc::sync::Arc;

use pccard_api::{DriverError, IrqLine, IrqStatus};

use crate::state::AdapterState;

/// Entry points the external protocol driver exposes to the lifecycle
/// controller.
pub trait TokenRingDriver: Send + Sync {
    /// Performs remaining hardware validation and registers the network
    /// device, returning the stack-assigned name.
    ///
    /// Called once per successful resource configuration. The driver may
    /// install its periodic timer on `adapter` here.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::ProbeFailed`] if the configured hardware does
    /// not respond as a supported adapter.
    fn probe_device(&self, adapter: &Arc<AdapterState>) -> Result<String, DriverError>;

    /// Revalidates the hardware without re-registering, used on resume.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::ProbeFailed`] if the adapter no longer
    /// responds.
    fn probe(&self, adapter: &AdapterState) -> Result<(), DriverError>;

    /// Services one interrupt for the adapter.
    fn handle_interrupt(&self, line: IrqLine, adapter: &AdapterState) -> IrqStatus;

    /// Removes the published network device from the stack.
    fn unregister(&self, adapter: &AdapterState);

    /// Returns `true` while the network device is open.
    fn is_open(&self, adapter: &AdapterState) -> bool;

    /// Attaches (`true`) or detaches (`false`) the device from active
    /// network-stack scheduling. Releases no hardware resources.
    fn set_scheduling(&self, adapter: &AdapterState, active: bool);
}

/// A periodic timer owned by the protocol driver's state block.
pub trait PeriodicTimer {
    /// Cancels the timer, blocking until any in-flight invocation has
    /// completed. After this returns the timer will never fire again.
    fn cancel_sync(&mut self);
}
