pub mod payments;
pub mod plans;
pub mod receipt_delivery;
pub mod receipts;
