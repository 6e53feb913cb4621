//! # Intersection
//!
//! A single traffic light whose phase toggles between red and green on a
//! randomized 4-6 second cycle, and a blocking handoff that lets other
//! threads wait for the light to turn green.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────┐
//!   │      Toggling Loop       │  (background thread, one per light)
//!   │  sleep 1ms, check timer  │
//!   └────────────┬─────────────┘
//!                │ flip phase (phase lock)
//!                │ send(new phase) (channel lock)
//!                ▼
//!   ┌──────────────────────────┐
//!   │  PhaseChannel<Phase>     │  single slot, latest wins
//!   └────────────┬─────────────┘
//!                │ receive()
//!     ┌──────────┼──────────┐
//!     ▼          ▼          ▼
//!  waiter     waiter     waiter      wait_for_green()
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use intersection::{Phase, TrafficLight};
//!
//! let light = TrafficLight::new();
//! assert_eq!(light.current_phase(), Phase::Red);
//!
//! light.start()?;
//! light.wait_for_green(); // blocks until the next green transition
//! # Ok::<(), intersection::LightError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod light;
pub mod phase;
pub mod stats;
pub mod timer;

pub use config::{LightConfig, DEFAULT_MAX_CYCLE_MS, DEFAULT_MIN_CYCLE_MS, DEFAULT_POLL_SLICE_MS};
pub use error::{LightError, LightResult};
pub use light::TrafficLight;
pub use phase::Phase;
pub use stats::LightStats;
pub use timer::CycleTimer;
