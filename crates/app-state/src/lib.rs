//! Shared UI state for Reveal Kit
//!
//! This crate provides tree-scoped state that several components read and
//! write: the scroll-lock flag an ancestor scroll view shares with nested
//! gesture controllers, and small boolean state cells.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod scroll;
pub mod toggle;

pub use scroll::{ScrollContext, ScrollLock};
pub use toggle::Toggle;
