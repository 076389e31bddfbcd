//! Shared wire types for the wardcall client workspace.
//!
//! Everything here mirrors the JSON shapes exposed by the hospital
//! backend REST API. These are plain serde models with no behavior
//! beyond display-text helpers; the backend owns every resource and
//! the client never mutates a call after creation.

pub mod call;
pub mod push;
pub mod qr;
pub mod types;

pub use call::{Call, CallReceipt};
pub use push::{PushSubscription, SubscriptionKeys};
pub use qr::QrCodeData;
