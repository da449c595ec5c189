pub mod metric;
pub mod sample;

pub use metric::*;
pub use sample::*;
