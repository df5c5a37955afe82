pub mod plans;
pub mod transactions;
pub mod user_subscriptions;
pub mod users;
