pub mod enums;
pub mod payments;
pub mod plans;
pub mod receipts;
pub mod responses;
pub mod transactions;
pub mod user_subscriptions;
