pub mod error;
pub mod relative_time;
pub mod shell;
pub mod unescape;

pub use error::{ExtractError, Result};
