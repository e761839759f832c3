//! Registered form definitions.

pub mod asam;
pub mod intake;
pub mod phq9;
