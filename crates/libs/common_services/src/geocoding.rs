mod cache;
mod error;
mod interfaces;
mod nominatim;

pub use cache::*;
pub use error::*;
pub use interfaces::*;
pub use nominatim::*;
