#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]
mod cluster;
mod geocoding;
mod photo;
mod pin;

pub use cluster::*;
pub use geocoding::*;
pub use photo::*;
pub use pin::*;
