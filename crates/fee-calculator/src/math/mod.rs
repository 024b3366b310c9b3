mod error;
mod fixed_point;
mod log;

pub use {error::MathError, fixed_point::Sd59x18};
