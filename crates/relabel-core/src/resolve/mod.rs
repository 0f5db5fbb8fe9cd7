pub mod engine;

pub use engine::{PageResolution, Resolver};
