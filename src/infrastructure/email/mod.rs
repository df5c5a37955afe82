pub mod email_delivery;
