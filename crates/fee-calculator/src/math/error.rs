#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum MathError {
    #[error("fixed point value outside of the signed 256-bit range")]
    Overflow,
    #[error("division by zero")]
    ZeroDivision,
    #[error("logarithm input must be greater than zero")]
    LogInputTooSmall,
    #[error("negative fixed point value cannot be converted to an amount")]
    NegativeToUnsigned,
}
