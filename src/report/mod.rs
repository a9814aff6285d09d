pub mod document;
pub mod json;
pub mod md;
pub mod pdf;
pub mod sanitize;

use crate::error::{FolioError, Result};
use crate::types::config::DocumentFormat;
use crate::types::report::{Portfolio, ProjectEntry};
use chrono::Local;
use document::Document;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
    Pdf,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Md => "md",
            OutputFormat::Pdf => "pdf",
        }
    }
}

impl From<DocumentFormat> for OutputFormat {
    fn from(format: DocumentFormat) -> Self {
        match format {
            DocumentFormat::Json => OutputFormat::Json,
            DocumentFormat::Md => OutputFormat::Md,
            DocumentFormat::Pdf => OutputFormat::Pdf,
        }
    }
}

pub fn render(document: &Document, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Json => Ok(json::to_json(document)?.into_bytes()),
        OutputFormat::Md => Ok(md::to_markdown(document).into_bytes()),
        OutputFormat::Pdf => pdf::to_pdf(document),
    }
}

/// Build, render and write the portfolio; returns the bytes written.
pub fn write_portfolio(portfolio: &Portfolio, path: &Path, format: OutputFormat) -> Result<u64> {
    let document = document::build_document(portfolio, Local::now().date_naive());
    let rendered = render(&document, format)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &rendered)?;
    Ok(rendered.len() as u64)
}

fn preflight_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "portfolio".to_string());
    let name = match output.extension() {
        Some(ext) => format!("{stem}.preflight.{}", ext.to_string_lossy()),
        None => format!("{stem}.preflight"),
    };
    output.with_file_name(name)
}

/// Render a throwaway document full of awkward characters next to `output`
/// and check it lands on disk, so a broken output path is caught before any
/// paid summarization call.
pub fn preflight(output: &Path, format: OutputFormat) -> Result<u64> {
    let sample = Portfolio {
        title: "Preflight".to_string(),
        projects: vec![ProjectEntry {
            title: "Test \u{2014} \u{201C}quotes\u{201D}".to_string(),
            summary: "**Project Overview:**\nRegular ASCII text, Project #1 - Feature list.\n\n\
                      **Key Features:**\n\u{2022} Bullet \u{2013} one\n* Special chars: @#$%^&*()[]{}\n"
                .to_string(),
        }],
    };

    let path = preflight_path(output);
    let result = write_portfolio(&sample, &path, format).and_then(|written| {
        let size = fs::metadata(&path)?.len();
        if written == 0 || size == 0 {
            return Err(FolioError::Preflight(format!(
                "{} is empty",
                path.display()
            )));
        }
        Ok(size)
    });

    if path.exists() {
        if let Err(e) = fs::remove_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove preflight file");
        }
    }

    result.map_err(|e| match e {
        FolioError::Preflight(_) => e,
        other => FolioError::Preflight(other.to_string()),
    })
}
