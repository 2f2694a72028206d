//! Image composition: rendering stored quotes onto a background template
//!
//! Best-effort by design: a missing background or font is logged and
//! skipped rather than raised, so a render failure never blocks the quote
//! from being stored.

mod composer;

pub use composer::{ComposeError, OutputFormat, QuoteComposer};
