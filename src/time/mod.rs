pub mod error;
pub mod timestamp;

pub use self::timestamp::{duration_seconds, parse_timestamp};
