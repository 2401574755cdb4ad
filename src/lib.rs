//! CAPA portal: a record store and report renderer for Corrective/Preventive
//! Action incident records.
//!
//! Submissions are validated and appended as rows to a spreadsheet-style
//! backing table; stored records can be queried by department, area, and an
//! inclusive incident-date range, or looked up by CAPA number; a stored
//! record renders into a filled copy of a placeholder template exported as
//! PDF bytes.
//!
//! Storage and the document service sit behind traits ([`RecordStore`],
//! [`DocumentBackend`]) so the core logic runs unchanged against the
//! production adapters or the in-memory fakes.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use capa_portal::{
//!     FilesystemDocumentBackend, PortalBuilder, Record, WorksheetRecordStore,
//! };
//!
//! # fn main() -> Result<(), capa_portal::PortalError> {
//! let portal = PortalBuilder::new()
//!     .with_store(Arc::new(WorksheetRecordStore::new("CAPA_PORTAL_INDEX.json")))
//!     .with_document_backend(Arc::new(FilesystemDocumentBackend::new(
//!         "capa_template.txt",
//!         "capa_work",
//!     )))
//!     .build()?;
//!
//! let record = Record::new()
//!     .with("CAPA_NO", "CAPA-2025-001")
//!     .with("DEPARTMENT", "Engineering");
//! portal.submit(&record)?;
//! let pdf = portal.render_report("CAPA-2025-001")?;
//! # let _ = pdf;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod portal;
pub mod record;
pub mod render;
pub mod store;

pub use auth::{AuthError, Credentials};
pub use error::PortalError;
pub use portal::{CapaPortal, PortalBuilder, SearchFilter};
pub use record::{CHECK_MARK, Record, SHEET_COLUMNS, TICK_COLUMNS};
pub use render::{
    DocumentBackend, FilesystemDocumentBackend, InMemoryDocumentBackend, RenderError,
    ReportRenderer,
};
pub use store::{
    InMemoryRecordStore, RecordQuery, RecordStore, StoreError, WorksheetRecordStore,
};
