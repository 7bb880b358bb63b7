//! Calculation telemetry.
//!
//! The subnet engine knows nothing about telemetry; [`crate::Calculator`]
//! reports to whichever [`EventSink`] it was given.

mod event;
mod sink;

pub use event::{
    new_session_id, CalculationEvent, CalculationType, EVENT_FAILED, EVENT_PERFORMED,
};
pub use sink::{EventSink, JsonlSink, LogSink, MemorySink, NullSink};
