pub mod payments;
pub mod plans;
