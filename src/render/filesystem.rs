//! Filesystem-based document backend.
//!
//! The template is a local text file carrying `{{NAME}}` placeholders;
//! copies live as files in a working directory and PDF export happens
//! locally via [`crate::render::pdf`]. This adapter stands in for a remote
//! document service while keeping the same copy/replace/export/delete
//! contract.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::render::backend::{DocumentBackend, DocumentId};
use crate::render::{RenderError, pdf};

/// A document backend over a template file and a working directory.
#[derive(Debug)]
pub struct FilesystemDocumentBackend {
    template_path: PathBuf,
    work_dir: PathBuf,
    copy_seq: AtomicU64,
}

impl FilesystemDocumentBackend {
    /// Backend reading the template from `template_path` and keeping
    /// document copies under `work_dir` (created on first copy).
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(template_path: P, work_dir: Q) -> Self {
        Self {
            template_path: template_path.as_ref().to_path_buf(),
            work_dir: work_dir.as_ref().to_path_buf(),
            copy_seq: AtomicU64::new(0),
        }
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// Copies are named after the document title with filesystem-hostile
    /// characters replaced and a sequence number so concurrent renders of
    /// the same record get independent files.
    fn copy_path(&self, id: &DocumentId) -> PathBuf {
        self.work_dir.join(format!("{id}.txt"))
    }

    fn read_copy(&self, id: &DocumentId) -> Result<String, RenderError> {
        fs::read_to_string(self.copy_path(id)).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                RenderError::DocumentNotFound(id.clone())
            } else {
                RenderError::Io(err)
            }
        })
    }
}

fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

impl DocumentBackend for FilesystemDocumentBackend {
    fn copy_template(&self, title: &str) -> Result<DocumentId, RenderError> {
        let template = fs::read_to_string(&self.template_path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                RenderError::TemplateNotFound(self.template_path.display().to_string())
            } else {
                RenderError::Io(err)
            }
        })?;

        fs::create_dir_all(&self.work_dir)?;
        let seq = self.copy_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("{}-{seq}", sanitize_title(title));
        fs::write(self.copy_path(&id), template)?;
        Ok(id)
    }

    fn replace_text(
        &self,
        id: &DocumentId,
        needle: &str,
        replacement: &str,
    ) -> Result<usize, RenderError> {
        let body = self.read_copy(id)?;
        let count = body.matches(needle).count();
        if count > 0 {
            fs::write(self.copy_path(id), body.replace(needle, replacement))?;
        }
        Ok(count)
    }

    fn export_pdf(&self, id: &DocumentId) -> Result<Vec<u8>, RenderError> {
        let body = self.read_copy(id)?;
        // Strip the copy sequence number so the exported title matches the
        // requested document title.
        let title = id.rsplit_once('-').map(|(t, _)| t).unwrap_or(id);
        pdf::text_to_pdf(title, &body)
    }

    fn delete(&self, id: &DocumentId) -> Result<(), RenderError> {
        fs::remove_file(self.copy_path(id)).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                RenderError::DocumentNotFound(id.clone())
            } else {
                RenderError::Io(err)
            }
        })?;
        log::debug!("deleted document copy '{id}'");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "FilesystemDocumentBackend"
    }
}
