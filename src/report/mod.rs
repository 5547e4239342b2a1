//! Report outputs: formatted terminal text and the PDF document.
//!
//! We keep presentation code in one place so:
//! - the screening code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;
pub mod pdf;
