use anyhow::Result;

use crate::domain::value_objects::receipts::ReceiptModel;

/// Produces the opaque receipt document. A failed buffer is fatal for the
/// payment attempt; no partial receipt is acceptable.
#[cfg_attr(test, mockall::automock)]
pub trait ReceiptRenderer: Send + Sync {
    fn render(&self, receipt: &ReceiptModel) -> Result<Vec<u8>>;
}
