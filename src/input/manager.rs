//! Input manager for handling different file types

use crate::error::{Result, ResumeScannerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{TextExtractor, PdfExtractor, DocxExtractor, PlainTextExtractor};
use std::path::Path;
use std::collections::HashMap;
use log::info;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        // Check cache first
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        // Validate file exists
        if !path.exists() {
            return Err(ResumeScannerError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }

        let extension = Self::file_extension(path)?;
        let file_type = FileType::from_extension(&extension);

        // Route to appropriate extractor
        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            },
            FileType::Docx => {
                info!("Extracting text from Word document: {}", path.display());
                DocxExtractor.extract(path).await?
            },
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            },
            FileType::Unknown => {
                return Err(ResumeScannerError::UnsupportedFormat(extension));
            }
        };

        // Cache the result
        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    fn file_extension(path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ResumeScannerError::InvalidInput(
                format!("File has no extension: {}", path.display())
            ))?;

        Ok(extension.to_lowercase())
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
