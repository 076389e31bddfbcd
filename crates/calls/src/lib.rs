//! Emergency-call client pipeline.
//!
//! The three moving parts on the call path:
//!
//! - [`CallObserver`] — nurse-side polling loop that detects
//!   newly-arrived calls against a session seen-set and hands each
//!   one to an [`AlertSink`] exactly once.
//! - [`CallEmitter`] — bedside-side submission with a client-side
//!   cooldown throttle.
//! - [`bedside`] — data loading for the public QR page, with the
//!   backend URL kept in the error state for field debugging.

pub mod bedside;
pub mod emitter;
pub mod observer;

pub use bedside::BedsideView;
pub use emitter::{CallEmitter, SubmitError};
pub use observer::{AlertSink, CallObserver, CallSource, NurseCalls};
