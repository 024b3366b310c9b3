pub mod conversions;
pub mod serialization;
