//! # Intersection Core
//!
//! Thread handoff primitives used by the traffic light controller:
//!
//! - [`PhaseChannel`]: a single-slot channel where every send replaces the
//!   pending value and receivers block until something arrives
//! - [`ShutdownSignal`]: a cloneable stop flag whose wait doubles as a
//!   bounded sleep
//!
//! ## Example
//!
//! ```rust
//! use intersection_core::PhaseChannel;
//!
//! let channel = PhaseChannel::new();
//! channel.send(1);
//! channel.send(2);
//! // Only the latest value survives.
//! assert_eq!(channel.receive(), 2);
//! assert!(channel.is_empty());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod sync;

pub use sync::{PhaseChannel, ShutdownSignal};
