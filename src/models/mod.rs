pub mod common;
pub mod generation;
pub mod workflow;

pub use common::*;
pub use generation::*;
pub use workflow::*;
