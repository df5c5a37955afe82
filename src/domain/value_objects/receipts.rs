use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything the receipt document shows, in render order. The card number
/// must already be masked before it gets here.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptModel {
    pub issuer: String,
    pub transaction_id: i64,
    pub ordered_at: DateTime<Utc>,
    pub item_name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub client_name: String,
    pub payment_method: String,
}

impl ReceiptModel {
    pub fn total_amount(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Display-safe card representation: only the last 4 characters survive.
pub fn mask_card(card_number: &str) -> String {
    let chars: Vec<char> = card_number.chars().collect();
    if chars.len() < 4 {
        return "****".to_string();
    }
    let last4: String = chars[chars.len() - 4..].iter().collect();
    format!("**** **** **** {}", last4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_down_to_the_last_four_characters() {
        assert_eq!(mask_card("4111111111111111"), "**** **** **** 1111");
        assert_eq!(mask_card("1234"), "**** **** **** 1234");
        assert_eq!(mask_card("55554444"), "**** **** **** 4444");
    }

    #[test]
    fn short_numbers_collapse_to_a_placeholder() {
        assert_eq!(mask_card(""), "****");
        assert_eq!(mask_card("12"), "****");
        assert_eq!(mask_card("123"), "****");
    }

    #[test]
    fn masked_output_never_contains_the_full_number() {
        let card = "4111111111111111";
        let masked = mask_card(card);
        assert!(!masked.contains(card));
    }

    #[test]
    fn total_is_unit_price_times_quantity() {
        let receipt = ReceiptModel {
            issuer: "Example Corp".to_string(),
            transaction_id: 7,
            ordered_at: Utc::now(),
            item_name: "Premium".to_string(),
            unit_price: 100.0,
            quantity: 3,
            client_name: "Alice".to_string(),
            payment_method: mask_card("4111111111111111"),
        };
        assert_eq!(receipt.total_amount(), 300.0);
    }
}
