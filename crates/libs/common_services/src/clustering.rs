mod distance;
mod partition;
mod service;

pub use distance::*;
pub use partition::*;
pub use service::*;
