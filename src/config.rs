// SPDX-FileCopyrightText: The wedding-site authors
// SPDX-License-Identifier: MPL-2.0

//! Site configuration
//!
//! Loaded from a TOML file:
//!
//! ```toml
//! [couple]
//! groom = "Jerome"
//! bride = "Raine"
//!
//! [ceremony]
//! date = "February 6, 2026"
//! day = "Friday"
//! time = "1:00 PM"
//!
//! [gallery]
//! public_dir = "public"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use derive_more::{Display, Error, From};
use serde::Deserialize;

use crate::{
    ImageSource,
    countdown::{self, Ceremony, DEFAULT_UTC_OFFSET_HOURS},
    gallery,
};

/// Image directories below the public root, in display order.
pub const DEFAULT_GALLERY_DIRS: [&str; 3] = ["desktop-background", "mobile-background", "FrontGallery"];

/// A configuration error
#[derive(Debug, Display, Error, From)]
pub enum ConfigError {
    /// Invalid TOML or unexpected structure.
    #[display("invalid configuration: {_0}")]
    Toml(toml::de::Error),

    /// The ceremony date or time is invalid.
    #[display("{_0}")]
    Ceremony(countdown::ParseError),
}

/// The couple
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoupleConfig {
    /// Name of the groom
    pub groom: String,

    /// Name of the bride
    pub bride: String,
}

/// Date and time of the ceremony
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CeremonyConfig {
    /// E.g. `February 6, 2026`
    pub date: String,

    /// Displayed day of the week, e.g. `Friday`
    #[serde(default)]
    pub day: Option<String>,

    /// E.g. `1:00 PM`
    pub time: String,

    /// Offset of the local time from UTC
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i8,
}

const fn default_utc_offset_hours() -> i8 {
    DEFAULT_UTC_OFFSET_HOURS
}

/// Gallery image directories
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Root directory of the static site content
    pub public_dir: PathBuf,

    /// Image directories relative to `public_dir`
    pub dirs: Vec<String>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public"),
            dirs: DEFAULT_GALLERY_DIRS.map(ToOwned::to_owned).to_vec(),
        }
    }
}

/// The site configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SiteConfig {
    /// The couple
    #[serde(default)]
    pub couple: CoupleConfig,

    /// The ceremony
    pub ceremony: CeremonyConfig,

    /// The gallery
    #[serde(default)]
    pub gallery: GalleryConfig,
}

impl SiteConfig {
    /// Parse the configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the input is not a valid configuration.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(input)?;
        Ok(config)
    }

    /// Load the configuration from a TOML file.
    ///
    /// A relative `public_dir` is resolved against the directory of the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let input = fs::read_to_string(path)
            .with_context(|| format!("reading configuration from {}", path.display()))?;
        let mut config = Self::from_toml_str(&input)
            .with_context(|| format!("parsing configuration from {}", path.display()))?;
        if config.gallery.public_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.gallery.public_dir = parent.join(&config.gallery.public_dir);
            }
        }
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Resolve the ceremony.
    ///
    /// A configured day of the week that contradicts the date is only
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Ceremony`] if the date or offset is invalid.
    pub fn ceremony(&self) -> Result<Ceremony, ConfigError> {
        let CeremonyConfig {
            date,
            day,
            time,
            utc_offset_hours,
        } = &self.ceremony;
        let ceremony = Ceremony::parse(date, time, *utc_offset_hours)?;
        if let Some(day) = day {
            let weekday = ceremony.weekday();
            if !day.trim().eq_ignore_ascii_case(&weekday.to_string()) {
                log::warn!("Ceremony on {date} is a {weekday}, not a {day}");
            }
        }
        Ok(ceremony)
    }

    /// Scan the configured gallery directories.
    #[must_use]
    pub fn gallery_images(&self) -> Vec<ImageSource> {
        gallery::scan_public_dirs(&self.gallery.public_dir, &self.gallery.dirs)
    }
}
