mod bbcpu;
mod catalog;
mod gen;

pub use bbcpu::*;
pub use catalog::*;
pub use gen::*;
