//! # Synchronization Primitives
//!
//! ## The Problem
//!
//! ```text
//! Toggling loop (producer):  publishes every phase change, must never block
//! Waiters (consumers):       block until the next change arrives
//! ```
//!
//! A growing queue would let a slow consumer act on stale transitions.
//!
//! ## The Solution: Single-Slot Overwrite
//!
//! ```text
//!   send(red)   -> [red]
//!   send(green) -> [green]      (red discarded, never seen)
//!   receive()   -> green, []    (next receive blocks)
//! ```
//!
//! Both locks in this module are leaf locks: nothing else is acquired while
//! they are held.

mod phase_channel;
mod shutdown;

pub use phase_channel::PhaseChannel;
pub use shutdown::ShutdownSignal;
