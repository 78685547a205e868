pub mod sentence;

pub use sentence::*;
