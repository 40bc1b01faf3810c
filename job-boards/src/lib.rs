mod board;
mod board_url;
mod client;
mod credentials;
mod error;
mod records;
pub mod domain;

pub(crate) use board_url::*;

pub use board::*;
pub use client::*;
pub use credentials::*;
pub use error::*;
pub use records::{decode_records, RawId};
