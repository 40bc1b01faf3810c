//! Raw record shapes for each board, plus the request that fetches them.
//!
//! Records mirror the provider payloads closely and keep every field optional
//! except the native id; mapping them into a common job shape is left to the caller.

mod adzuna;
mod arbeitnow;
mod himalayas;
mod jobicy;
mod jooble;
mod muse;
mod remoteok;
mod remotive;

pub use adzuna::*;
pub use arbeitnow::*;
pub use himalayas::*;
pub use jobicy::*;
pub use jooble::*;
pub use muse::*;
pub use remoteok::*;
pub use remotive::*;
