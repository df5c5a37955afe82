use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of `POST /payment`. Card data is transient: it is validated, masked
/// for the receipt and echoed back to the caller, but never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentModel {
    pub user_id: i64,
    pub subscription_id: i64,
    pub payment_form: PaymentForm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentForm {
    pub card_number: String,
    pub expiration_date: String,
    pub cvv: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardValidationError {
    #[error("Invalid payment details")]
    MissingDetails,
    #[error("Invalid expiration date format")]
    MalformedExpiration,
    #[error("Payment rejected: Card expired")]
    Expired,
}

impl PaymentForm {
    /// Pure gate: checks the form shape and the card expiry against `now`.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), CardValidationError> {
        if self.card_number.is_empty() || self.expiration_date.is_empty() || self.cvv.is_empty() {
            return Err(CardValidationError::MissingDetails);
        }

        let expires_at = self.parse_expiration()?;
        if expires_at < now {
            return Err(CardValidationError::Expired);
        }

        Ok(())
    }

    /// Parses `MM/YYYY` into the first instant of that month (UTC), the way
    /// the card networks print it. A card stated to expire this month is
    /// already past its expiry instant.
    fn parse_expiration(&self) -> Result<DateTime<Utc>, CardValidationError> {
        let (month_raw, year_raw) = self
            .expiration_date
            .split_once('/')
            .ok_or(CardValidationError::MalformedExpiration)?;

        if month_raw.is_empty() || month_raw.len() > 2 || year_raw.len() != 4 {
            return Err(CardValidationError::MalformedExpiration);
        }

        let month: u32 = month_raw
            .parse()
            .map_err(|_| CardValidationError::MalformedExpiration)?;
        let year: i32 = year_raw
            .parse()
            .map_err(|_| CardValidationError::MalformedExpiration)?;

        let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(CardValidationError::MalformedExpiration)?;

        Ok(first_of_month.and_time(NaiveTime::MIN).and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn form(card_number: &str, expiration_date: &str, cvv: &str) -> PaymentForm {
        PaymentForm {
            card_number: card_number.to_string(),
            expiration_date: expiration_date.to_string(),
            cvv: cvv.to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn accepts_a_future_expiry() {
        let form = form("4111111111111111", "01/2099", "123");
        assert!(form.validate(now()).is_ok());
    }

    #[test]
    fn rejects_empty_fields() {
        for candidate in [
            form("", "01/2099", "123"),
            form("4111111111111111", "", "123"),
            form("4111111111111111", "01/2099", ""),
        ] {
            assert_eq!(
                candidate.validate(now()),
                Err(CardValidationError::MissingDetails)
            );
        }
    }

    #[test]
    fn rejects_malformed_expirations() {
        for expiration in ["2099-01", "13/2099", "0/2099", "01/99", "012099", "ab/cdef"] {
            let candidate = form("4111111111111111", expiration, "123");
            assert_eq!(
                candidate.validate(now()),
                Err(CardValidationError::MalformedExpiration),
                "expiration {expiration:?} should be malformed"
            );
        }
    }

    #[test]
    fn rejects_past_expiries() {
        let candidate = form("4111111111111111", "10/2024", "123");
        assert_eq!(candidate.validate(now()), Err(CardValidationError::Expired));
    }

    #[test]
    fn a_card_expiring_the_current_month_counts_as_expired() {
        // The expiry instant is the first of the month, which is already behind now.
        let candidate = form("4111111111111111", "11/2024", "123");
        assert_eq!(candidate.validate(now()), Err(CardValidationError::Expired));
    }

    #[test]
    fn accepts_a_single_digit_month() {
        let candidate = form("4111111111111111", "1/2099", "123");
        assert!(candidate.validate(now()).is_ok());
    }
}
