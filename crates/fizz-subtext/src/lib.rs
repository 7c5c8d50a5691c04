//! fizz-subtext — core transforms for divisor-annotated range reports and fragment search.

pub mod locate;
pub mod payload;
pub mod report;
pub mod types;

pub use locate::{locate, matches_at, NO_MATCH_MARKER};
pub use payload::{parse_fragments, parse_text};
pub use report::build_report;
pub use types::*;
