use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, Result};

/// Sentinel for an unknown height or width.
pub const UNKNOWN_SIZE: i32 = -1;

/// Rough resolution bucket, derived from the height when nothing better is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionLevel {
    High,
    Medium,
    Low,
    Unknown,
}

impl ResolutionLevel {
    /// High from 720px, medium from 175px, low from 1px.
    #[must_use]
    pub const fn from_height(height: i32) -> Self {
        if height <= 0 {
            Self::Unknown
        } else if height < 175 {
            Self::Low
        } else if height < 720 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// A thumbnail, avatar or banner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Image {
    url: String,
    height: i32,
    width: i32,
    estimated_resolution_level: ResolutionLevel,
}

impl Image {
    pub fn new(
        url: impl Into<String>,
        height: i32,
        width: i32,
        estimated_resolution_level: ResolutionLevel,
    ) -> Result<Self> {
        let url = url.into();
        if url.is_empty() {
            return Err(ExtractionError::InvalidArgument(
                "image url must not be empty".to_string(),
            ));
        }
        Ok(Self {
            url,
            height,
            width,
            estimated_resolution_level,
        })
    }

    /// Image whose resolution level is estimated from its height.
    pub fn with_size(url: impl Into<String>, height: i32, width: i32) -> Result<Self> {
        Self::new(url, height, width, ResolutionLevel::from_height(height))
    }

    /// Image of unknown dimensions.
    pub fn without_size(url: impl Into<String>, estimated_resolution_level: ResolutionLevel) -> Result<Self> {
        Self::new(url, UNKNOWN_SIZE, UNKNOWN_SIZE, estimated_resolution_level)
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub const fn estimated_resolution_level(&self) -> ResolutionLevel {
        self.estimated_resolution_level
    }
}
