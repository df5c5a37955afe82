pub mod pdf_receipt;
