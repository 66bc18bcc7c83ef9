//! Socket-attached token-ring adapter lifecycle driver.
//!
//! Manages the insertion-to-removal lifecycle of a hot-pluggable token-ring
//! adapter card: reserving an I/O range, an interrupt line, and two memory
//! windows from the socket subsystem, programming the adapter's nibble-wide
//! configuration register, and handing the initialized card to the protocol
//! driver that operates it.
//!
//! This crate only brings the adapter into a usable state — frame exchange
//! and MAC-layer logic live in the protocol driver behind the
//! [`TokenRingDriver`] trait. The socket subsystem is consumed through
//! [`pccard_api::CardSocket`].
//!
//! The central piece is [`TokenRingCard`], the per-slot lifecycle state
//! machine. Teardown safety against an in-flight interrupt rests on the
//! removal guard in [`AdapterState`]: set before any resource is torn down,
//! checked by the interrupt relay before every forward.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod driver;
pub mod hw;
pub mod ident;
pub mod irq;
pub mod lifecycle;
pub mod resources;
pub mod state;

#[cfg(test)]
mod testutil;

pub use config::{AdapterConfig, RingSpeed, SramSize};
pub use driver::{PeriodicTimer, TokenRingDriver};
pub use irq::IrqRelay;
pub use lifecycle::{LifecycleState, TokenRingCard};
pub use state::{AdapterInfo, AdapterState};
