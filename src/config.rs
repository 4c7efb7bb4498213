//! Merge configuration.
//!
//! [`MergeOptions`] controls how the merged artifact is produced. Options can
//! be built in code or read from JSON; both paths go through
//! [`MergeOptions::validate`].

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::PdfPickError;
use crate::utils::default_parallelism;

/// File name given to the merged document.
pub const DEFAULT_OUTPUT_NAME: &str = "merged-document.pdf";

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// No compression - streams are written as copied.
    None,
    /// Compress streams.
    #[default]
    Standard,
    /// Compress streams and drop objects nothing refers to.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfPickError;

    /// Parse compression level from `"none"`, `"standard"` or `"maximum"`.
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfPickError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Document information written into the merged PDF.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Document title.
    pub title: Option<String>,
    /// Document author.
    pub author: Option<String>,
    /// Document subject.
    pub subject: Option<String>,
    /// Document keywords (comma-separated).
    pub keywords: Option<String>,
}

impl Metadata {
    /// Check if any metadata fields are set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_none()
    }

    /// Create metadata from optional strings, trimming whitespace.
    pub fn new(
        title: Option<String>,
        author: Option<String>,
        subject: Option<String>,
        keywords: Option<String>,
    ) -> Self {
        Self {
            title: clean(title),
            author: clean(author),
            subject: clean(subject),
            keywords: clean(keywords),
        }
    }

    /// Same fields with whitespace trimmed and blank values removed.
    pub fn normalized(&self) -> Self {
        Self::new(
            self.title.clone(),
            self.author.clone(),
            self.subject.clone(),
            self.keywords.clone(),
        )
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim().to_string())
}

/// Settings for one merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Name attached to the merged artifact.
    pub output_name: String,

    /// Compression applied when serializing.
    pub compression: CompressionLevel,

    /// Maximum number of documents loaded concurrently (None = auto-detect).
    pub jobs: Option<usize>,

    /// Information dictionary entries for the output.
    pub metadata: Metadata,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            compression: CompressionLevel::default(),
            jobs: None,
            metadata: Metadata::default(),
        }
    }
}

impl MergeOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    ///
    /// ```
    /// use pdfpick::config::{CompressionLevel, MergeOptions};
    ///
    /// let options = MergeOptions::from_json(r#"{ "compression": "maximum" }"#).unwrap();
    /// assert_eq!(options.compression, CompressionLevel::Maximum);
    /// assert_eq!(options.output_name, "merged-document.pdf");
    /// ```
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let mut options: Self =
            serde_json::from_str(json).context("Failed to parse merge options")?;
        options.metadata = options.metadata.normalized();
        options.validate()?;
        Ok(options)
    }

    /// Validate the options.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output name is blank or contains a path separator
    /// - Jobs count is zero
    pub fn validate(&self) -> anyhow::Result<()> {
        let name = self.output_name.trim();
        if name.is_empty() {
            bail!("Output name cannot be empty");
        }

        if name.contains(['/', '\\']) {
            bail!("Output name must be a file name, not a path: {name}");
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            bail!("Number of jobs must be at least 1");
        }

        Ok(())
    }

    /// Get the effective number of concurrent loads.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(default_parallelism)
    }
}
