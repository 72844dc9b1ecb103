pub mod hierarchy;
pub mod naming;
pub mod sst;
pub mod usage;

pub use hierarchy::*;
pub use naming::*;
pub use sst::*;
pub use usage::*;
