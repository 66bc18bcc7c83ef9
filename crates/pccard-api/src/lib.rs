//! Card Services driver API traits and types.
//!
//! This crate defines the contract between a socket (bus) subsystem and the
//! card drivers it hosts:
//!
//! - **Resource types** ([`IoPortRange`], [`IrqLine`], [`WindowHandle`],
//!   [`MmioRegion`]) representing exclusive hardware claims handed out by a
//!   socket.
//! - **Request templates** ([`IoRequest`], [`IrqRequest`], [`WindowRequest`],
//!   [`ConfigRequest`]) describing the electrical and routing attributes a
//!   driver asks for.
//! - **The [`CardSocket`] trait** — the per-slot reservation and release
//!   primitives a socket implementation must provide.
//! - **Interrupt delivery** ([`InterruptHandler`], [`IrqStatus`]) for
//!   handlers registered against a reserved line.
//! - **Identity matching** ([`ProductId`]) for recognizing a card by its
//!   vendor/product strings.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod error;
pub mod ident;
pub mod irq;
pub mod resource;
pub mod socket;

// Re-export all public types at the crate root for ergonomic imports.
pub use error::DriverError;
pub use ident::ProductId;
pub use irq::{InterruptHandler, IrqStatus};
pub use resource::{
    ConfigAttributes, ConfigRequest, IntType, IoAttributes, IoPortRange, IoRequest, IrqAttributes,
    IrqLine, IrqRequest, MmioRegion, WindowAttributes, WindowHandle, WindowRequest,
};
pub use socket::CardSocket;
