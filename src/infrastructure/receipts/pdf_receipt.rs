use anyhow::Result;
use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::domain::{repositories::receipts::ReceiptRenderer, value_objects::receipts::ReceiptModel};

const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_LEFT_MM: f64 = 20.0;
const LINE_STEP_MM: f64 = 10.0;

pub struct PdfReceiptRenderer;

impl PdfReceiptRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfReceiptRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptRenderer for PdfReceiptRenderer {
    fn render(&self, receipt: &ReceiptModel) -> Result<Vec<u8>> {
        let (doc, page, layer) = PdfDocument::new(
            "Payment Receipt",
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );

        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;

        let current_layer = doc.get_page(page).get_layer(layer);

        let mut y = PAGE_HEIGHT_MM - 30.0;
        current_layer.use_text(
            receipt.issuer.to_owned(),
            16.0,
            Mm(MARGIN_LEFT_MM),
            Mm(y),
            &bold,
        );
        y -= LINE_STEP_MM * 2.0;

        let lines = [
            format!("Transaction Number: {}", receipt.transaction_id),
            format!(
                "Order Date and Time: {}",
                receipt.ordered_at.format("%Y-%m-%d %H:%M:%S")
            ),
            format!("Item/Service: {}", receipt.item_name),
            format!("Unit Price: {:.2}", receipt.unit_price),
            format!("Quantity: {}", receipt.quantity),
            format!("Total Amount: {:.2}", receipt.total_amount()),
            format!("Client Name: {}", receipt.client_name),
            format!("Payment Method: {}", receipt.payment_method),
        ];

        for line in lines {
            current_layer.use_text(line, 12.0, Mm(MARGIN_LEFT_MM), Mm(y), &regular);
            y -= LINE_STEP_MM;
        }

        let bytes = doc.save_to_bytes()?;

        Ok(bytes)
    }
}
