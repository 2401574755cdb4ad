pub mod fixtures;
pub mod pdf_assertions;
