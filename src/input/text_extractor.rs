//! Text extraction from various file formats

use crate::error::{Result, ResumeScannerError};
use std::io::Read;
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(|e| {
            ResumeScannerError::Io(e)
        })?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ResumeScannerError::Extraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            ResumeScannerError::Io(e)
        })?;
        Ok(content)
    }
}

/// Extracts text from Word documents by reading the main document part out of
/// the ZIP container. Legacy binary `.doc` files are not ZIP archives and fail
/// with an extraction error carrying the decoder's message.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(|e| {
            ResumeScannerError::Io(e)
        })?;

        self.docx_to_text(&bytes)
    }
}

impl DocxExtractor {
    fn docx_to_text(&self, bytes: &[u8]) -> Result<String> {
        let cursor = std::io::Cursor::new(bytes);
        let mut archive = zip::ZipArchive::new(cursor).map_err(|e| {
            ResumeScannerError::Extraction(format!("Failed to open document archive: {}", e))
        })?;

        let mut document_xml = String::new();
        {
            let mut entry = archive.by_name("word/document.xml").map_err(|e| {
                ResumeScannerError::Extraction(format!("Document body missing from archive: {}", e))
            })?;
            entry.read_to_string(&mut document_xml).map_err(|e| {
                ResumeScannerError::Extraction(format!("Failed to read document body: {}", e))
            })?;
        }

        Ok(self.xml_to_text(&document_xml))
    }

    fn xml_to_text(&self, xml: &str) -> String {
        // Paragraphs, line breaks, and tabs carry layout; everything else is markup.
        let text = xml
            .replace("</w:p>", "\n")
            .replace("<w:br/>", "\n")
            .replace("<w:cr/>", "\n")
            .replace("<w:tab/>", "\t");

        let re = regex::Regex::new(r"<[^>]*>").unwrap();
        let clean_text = re.replace_all(&text, "");

        let unescaped = clean_text
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'");

        let lines: Vec<String> = unescaped
            .lines()
            .map(|line| line.trim_end().to_string())
            .collect();

        lines.join("\n").trim().to_string()
    }
}
