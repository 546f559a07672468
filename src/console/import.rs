use crate::gateway::{GatewayError, ImportResult};
use thiserror::Error;
use tracing::{info, warn};

pub const ACCEPTED_MEDIA_TYPES: [&str; 2] = [
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
];

/// Created units and row errors beyond this are summarised in one line.
pub const DISPLAY_CAP: usize = 10;

pub const UPLOAD_FAILED: &str = "Erro ao fazer upload do arquivo. Tente novamente.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Por favor, selecione um arquivo Excel (.xlsx ou .xls)")]
    UnsupportedMediaType(String),
    #[error("O arquivo selecionado está vazio")]
    EmptyFile,
    #[error("O arquivo excede o limite de {limit} bytes")]
    TooLarge { limit: usize },
    #[error("Por favor, selecione um arquivo")]
    NoFileSelected,
    #[error("Um envio já está em andamento")]
    Busy,
    #[error("Reinicie a importação antes de selecionar outro arquivo")]
    ResultPending,
}

#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl SelectedFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportState {
    Idle,
    FileSelected(SelectedFile),
    Uploading { file_name: String },
    ResultReady(ImportResult),
    Failed,
}

/// Spreadsheet import, from file choice to the decomposed result.
///
/// ```text
/// idle ──select──▶ fileSelected ──begin_upload──▶ uploading ──┬─▶ resultReady
///   ▲                                                         └─▶ failed
///   └──────────────────────── reset ◀─────────────────────────────┘
/// ```
///
/// A failed upload also accepts a new selection directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportWorkflow {
    state: ImportState,
    message: Option<String>,
    max_upload_bytes: usize,
}

impl ImportWorkflow {
    pub fn new(max_upload_bytes: usize) -> Self {
        Self {
            state: ImportState::Idle,
            message: None,
            max_upload_bytes,
        }
    }

    pub fn state(&self) -> &ImportState {
        &self.state
    }

    /// Validation or upload failure shown above the picker.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match &self.state {
            ImportState::FileSelected(file) => Some(file),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&ImportResult> {
        match &self.state {
            ImportState::ResultReady(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.state, ImportState::Uploading { .. })
    }

    pub fn upload_enabled(&self) -> bool {
        matches!(self.state, ImportState::FileSelected(_))
    }

    pub fn picker_enabled(&self) -> bool {
        matches!(
            self.state,
            ImportState::Idle | ImportState::FileSelected(_) | ImportState::Failed
        )
    }

    fn validate(&self, file: &SelectedFile) -> Result<(), ImportError> {
        let essence = file
            .media_type
            .parse::<mime::Mime>()
            .map(|m| m.essence_str().to_ascii_lowercase())
            .unwrap_or_default();

        if !ACCEPTED_MEDIA_TYPES.contains(&essence.as_str()) {
            return Err(ImportError::UnsupportedMediaType(file.media_type.clone()));
        }
        if file.bytes.is_empty() {
            return Err(ImportError::EmptyFile);
        }
        if file.bytes.len() > self.max_upload_bytes {
            return Err(ImportError::TooLarge {
                limit: self.max_upload_bytes,
            });
        }
        Ok(())
    }

    /// Picker or drop-zone selection. Only the declared media type and size
    /// are checked here; row contents are judged by the API.
    pub fn select_file(&mut self, file: SelectedFile) -> Result<(), ImportError> {
        match self.state {
            ImportState::Uploading { .. } => return Err(ImportError::Busy),
            ImportState::ResultReady(_) => return Err(ImportError::ResultPending),
            _ => {}
        }

        match self.validate(&file) {
            Ok(()) => {
                info!(file = %file.name, size = file.size(), "spreadsheet selected");
                self.state = ImportState::FileSelected(file);
                self.message = None;
                Ok(())
            }
            Err(err) => {
                warn!(file = %file.name, media_type = %file.media_type, error = %err, "spreadsheet rejected");
                self.state = ImportState::Idle;
                self.message = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Move to `uploading`, handing the file to the caller for transmission.
    pub fn begin_upload(&mut self) -> Result<SelectedFile, ImportError> {
        let file = match std::mem::replace(&mut self.state, ImportState::Idle) {
            ImportState::FileSelected(file) => file,
            other => {
                self.state = other;
                let err = match self.state {
                    ImportState::Uploading { .. } => ImportError::Busy,
                    ImportState::ResultReady(_) => ImportError::ResultPending,
                    _ => ImportError::NoFileSelected,
                };
                if err == ImportError::NoFileSelected {
                    self.message = Some(err.to_string());
                }
                return Err(err);
            }
        };

        self.state = ImportState::Uploading {
            file_name: file.name.clone(),
        };
        self.message = None;
        Ok(file)
    }

    /// Apply the API's answer. Ignored unless an upload is in flight.
    pub fn finish_upload(&mut self, result: Result<ImportResult, GatewayError>) {
        if !self.is_uploading() {
            return;
        }
        match result {
            Ok(result) => {
                info!(
                    developments = result.developments_processed,
                    units = result.units_processed,
                    errors = result.error_count,
                    "spreadsheet import finished"
                );
                self.state = ImportState::ResultReady(result);
            }
            Err(err) => {
                warn!(error = %err, "spreadsheet upload failed");
                self.state = ImportState::Failed;
                self.message = Some(err.user_message(UPLOAD_FAILED));
            }
        }
    }

    /// Back to `idle`, dropping file, result and message.
    pub fn reset(&mut self) -> Result<(), ImportError> {
        if self.is_uploading() {
            return Err(ImportError::Busy);
        }
        *self = Self::new(self.max_upload_bytes);
        Ok(())
    }
}

/// First `DISPLAY_CAP` items and how many were left out.
pub fn capped<T>(items: &[T]) -> (&[T], usize) {
    let shown = items.len().min(DISPLAY_CAP);
    (&items[..shown], items.len() - shown)
}
