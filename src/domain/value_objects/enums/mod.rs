pub mod plan_statuses;
pub mod transaction_statuses;
