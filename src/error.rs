use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors reported by the frame, calibration and controller operations.
///
/// Every variant is returned before anything is mutated or transmitted, except
/// [`Error::Persistence`] during a calibration update (the values still reach
/// the chips) and the hardware variants, which can interrupt a transmission.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A drive value, calibration value or voltage is outside its domain.
    #[display("Value out of range")]
    OutOfRange,

    /// A symbol, digit or channel index is outside its domain.
    #[display("Index out of bounds")]
    InvalidIndex,

    /// The product layout lacks the hardware the operation needs (e.g. digits).
    #[display("Operation not supported by this product")]
    UnsupportedProduct,

    /// The chips have not been through the reset sequence yet.
    #[display("Chips not initialized")]
    NotReady,

    /// The calibration store failed to read or write.
    #[display("Calibration storage failed")]
    Persistence,

    /// An output pin refused a level change.
    #[display("Error setting output state")]
    Bus,

    /// A PWM channel refused a duty cycle.
    #[display("Error setting PWM duty cycle")]
    Pwm,
}
