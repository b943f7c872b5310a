//! Cookie Module - Input data model
//!
//! `CookieRecord` (input), `Category` (label) và file I/O.

pub mod category;
pub mod io;
pub mod record;

pub use category::{Category, UnknownCategory};
pub use io::{load_cookies, save_cookies};
pub use record::{CookieRecord, Expiration};
