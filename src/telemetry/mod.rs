//! Client-side behavior collection.
//!
//! The tracker mirrors what the exam page records in the browser so the same
//! folding rules can be replayed and tested on the server.

pub mod throttle;
pub mod tracker;

pub use throttle::Throttle;
pub use tracker::{BehaviorTracker, TelemetryEvent};
