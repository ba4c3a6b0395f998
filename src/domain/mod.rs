//! Framework-agnostic domain entities.

pub mod account;
pub mod donation;

pub use account::Account;
pub use donation::{CardDetails, Donation, DonationStatus};
