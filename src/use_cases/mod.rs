pub mod donate;

pub use donate::{Donate, DonateInput, DonateOptions, DonateOutput, FieldError};
