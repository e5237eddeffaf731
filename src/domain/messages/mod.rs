//! Messages module - everything a user reads.
//!
//! - `catalog` - prompts, acknowledgements and notices per locale
//! - `composer` - decision and fraud result rendering
//! - `format` - rupee and percent formatting

pub mod catalog;
mod composer;
mod format;

pub use catalog::Table;
pub use composer::MessageComposer;
pub use format::{format_percent, format_rupees, format_rupees_paise};
