//! Localization primitives and relative-date parsing

mod date;
mod locale;
pub mod patterns;
mod time_ago;

pub use date::DateWrapper;
pub use locale::{ContentCountry, Localization};
pub use patterns::{ChronoUnit, PatternsHolder, PatternsManager};
pub use time_ago::{time_ago_parser_for, TimeAgoParser};
