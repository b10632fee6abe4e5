pub mod collector;
pub mod kill;
pub mod platform;
pub mod sampler;
pub mod snapshot;
pub mod source;
