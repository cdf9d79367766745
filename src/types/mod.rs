pub mod draw;
pub mod prediction;

pub use draw::*;
pub use prediction::*;
