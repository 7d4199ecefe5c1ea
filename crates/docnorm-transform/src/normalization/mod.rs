//! Locale-specific value normalization.
//!
//! - **datetime**: country date patterns and lenient date parsing
//! - **phone**: phone number parsing and rendering

pub mod datetime;
pub mod phone;

pub use datetime::{
    DatePattern, DateToken, format_date, format_iso_date, normalize_date, parse_iso_date,
    parse_with_pattern, try_format_date,
};
pub use phone::{ParsedPhone, format_phone, parse_phone, try_format_phone};
