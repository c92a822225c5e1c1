//! LibreOffice headless adapter - infrastructure layer
//!
//! Drives a local `soffice` binary in headless mode to implement the
//! document service contract for the CLI frontend. One known gap: the
//! headless converter has no way to pass an open password, so encrypted
//! documents fail with a password-signalling diagnostic and flow into the
//! orchestrator's prompt path, where a supplied password fails the same way.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::infrastructure::document_service::{
    DocumentHandle, DocumentService, OpenRequest, ServiceError, ServiceResult,
};

/// Magic bytes of an OLE compound file. Password-protected OOXML documents
/// are wrapped in one of these containers.
const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

static SCRATCH_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Headless LibreOffice as the external document application.
pub struct SofficeService {
    binary: String,
    timeout: Duration,
    launched: bool,
}

impl SofficeService {
    pub fn new(config: &Config) -> Self {
        Self {
            binary: config.soffice_binary.clone(),
            timeout: Duration::from_secs(config.convert_timeout_secs),
            launched: false,
        }
    }
}

#[async_trait]
impl DocumentService for SofficeService {
    type Doc = SofficeDocument;

    async fn launch(&mut self) -> ServiceResult<()> {
        info!("probing LibreOffice binary: {}", self.binary);

        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .await
            .map_err(|e| ServiceError::Launch {
                app: self.binary.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ServiceError::Launch {
                app: self.binary.clone(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        info!("✓ document service ready: {version}");
        self.launched = true;
        Ok(())
    }

    async fn open(&mut self, request: &OpenRequest) -> ServiceResult<Self::Doc> {
        let path = &request.path;
        debug!("opening {}", path.display());

        let header = tokio::fs::read(path).await.map_err(|e| ServiceError::Open {
            path: path.clone(),
            message: format!("cannot open {}: {e}", path.display()),
        })?;

        if is_encrypted_ooxml(path, &header) {
            // With or without a candidate password the headless converter
            // cannot decrypt; the message keeps the orchestrator's substring
            // contract intact either way.
            let message = match &request.password {
                None => format!("{} is password protected", path.display()),
                Some(_) => format!(
                    "cannot decrypt password protected document {} with the headless converter",
                    path.display()
                ),
            };
            return Err(ServiceError::Open {
                path: path.clone(),
                message,
            });
        }

        Ok(SofficeDocument {
            binary: self.binary.clone(),
            source: path.clone(),
            timeout: self.timeout,
            scratch: None,
        })
    }

    async fn quit(&mut self) -> ServiceResult<()> {
        // Each conversion runs its own short-lived process, so there is no
        // long-running instance to tear down.
        self.launched = false;
        Ok(())
    }
}

/// One source document scheduled for headless conversion.
///
/// The open/export split of the contract collapses here: the actual work all
/// happens in `save_as_pdf`, because `soffice --convert-to` is a single shot.
/// Tracked changes are flattened by the export itself, so the revision
/// operations are no-ops.
pub struct SofficeDocument {
    binary: String,
    source: PathBuf,
    timeout: Duration,
    scratch: Option<PathBuf>,
}

#[async_trait]
impl DocumentHandle for SofficeDocument {
    async fn revision_count(&mut self) -> ServiceResult<usize> {
        Ok(0)
    }

    async fn accept_all_revisions(&mut self) -> ServiceResult<()> {
        Ok(())
    }

    async fn save_as_pdf(&mut self, output: &Path) -> ServiceResult<()> {
        let scratch = scratch_dir();
        tokio::fs::create_dir_all(&scratch)
            .await
            .map_err(|e| ServiceError::Export {
                path: output.to_path_buf(),
                message: format!("cannot create scratch directory: {e}"),
            })?;
        self.scratch = Some(scratch.clone());

        let run = Command::new(&self.binary)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf:writer_pdf_Export")
            .arg("--outdir")
            .arg(&scratch)
            .arg(&self.source)
            .output();

        let result = tokio::time::timeout(self.timeout, run).await;
        let command_output = match result {
            Ok(Ok(out)) => out,
            Ok(Err(e)) => {
                return Err(ServiceError::Export {
                    path: output.to_path_buf(),
                    message: e.to_string(),
                })
            }
            Err(_) => {
                return Err(ServiceError::Export {
                    path: output.to_path_buf(),
                    message: format!("conversion timed out after {:?}", self.timeout),
                })
            }
        };

        if !command_output.status.success() {
            return Err(ServiceError::Export {
                path: output.to_path_buf(),
                message: String::from_utf8_lossy(&command_output.stderr)
                    .trim()
                    .to_string(),
            });
        }

        let produced = scratch.join(produced_pdf_name(&self.source));
        if tokio::fs::metadata(&produced).await.is_err() {
            return Err(ServiceError::Export {
                path: output.to_path_buf(),
                message: format!("no PDF was produced at {}", produced.display()),
            });
        }

        move_into_place(&produced, output).await?;
        debug!("exported {} -> {}", self.source.display(), output.display());
        Ok(())
    }

    async fn close(&mut self) -> ServiceResult<()> {
        if let Some(scratch) = self.scratch.take() {
            if let Err(e) = tokio::fs::remove_dir_all(&scratch).await {
                warn!("could not clean scratch dir {}: {e}", scratch.display());
            }
        }
        Ok(())
    }
}

fn scratch_dir() -> PathBuf {
    let id = SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("word2pdf-{}-{id}", std::process::id()))
}

/// `soffice` names its output after the source stem.
fn produced_pdf_name(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}.pdf")
}

/// Rename with a copy fallback for cross-filesystem targets.
async fn move_into_place(from: &Path, to: &Path) -> ServiceResult<()> {
    if tokio::fs::rename(from, to).await.is_ok() {
        return Ok(());
    }
    tokio::fs::copy(from, to)
        .await
        .map_err(|e| ServiceError::Export {
            path: to.to_path_buf(),
            message: format!("cannot place PDF at {}: {e}", to.display()),
        })?;
    let _ = tokio::fs::remove_file(from).await;
    Ok(())
}

/// Encrypted OOXML documents are OLE compound files; plain ones are ZIPs.
/// Legacy `.doc` files are OLE either way, so only the OOXML extensions are
/// sniffed.
fn is_encrypted_ooxml(path: &Path, header: &[u8]) -> bool {
    let ooxml = path
        .extension()
        .map(|e| {
            let e = e.to_string_lossy().to_lowercase();
            matches!(e.as_str(), "docx" | "docm" | "dotx" | "dotm")
        })
        .unwrap_or(false);
    ooxml && header.len() >= OLE_MAGIC.len() && header[..OLE_MAGIC.len()] == OLE_MAGIC
}
