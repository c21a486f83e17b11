pub mod annotation;
pub mod example;

pub use annotation::*;
pub use example::*;

pub type Id = String;
