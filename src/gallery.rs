// SPDX-FileCopyrightText: The wedding-site authors
// SPDX-License-Identifier: MPL-2.0

//! Gallery images

use std::{borrow::Cow, fmt, fs, path::Path};

use once_cell::sync::OnceCell;
use percent_encoding::utf8_percent_encode;
use regex::Regex;
use url::Url;

mod encoding {
    use percent_encoding::{AsciiSet, CONTROLS};

    /// <https://url.spec.whatwg.org/#query-percent-encode-set>
    const QUERY: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'#');

    /// <https://url.spec.whatwg.org/#path-percent-encode-set>
    pub(super) const PATH: &AsciiSet = &QUERY.add(b'`').add(b'?').add(b'{').add(b'}');
}

/// A site-relative image path, e.g. `/mobile-background/couple (1).jpg`
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageSource(String);

impl ImageSource {
    /// Create a new image source.
    ///
    /// The path is not validated.
    #[must_use]
    pub const fn new(path: String) -> Self {
        Self(path)
    }

    /// The unencoded path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.0
    }

    /// The percent-encoded path for use as a link target.
    #[must_use]
    pub fn href(&self) -> Cow<'_, str> {
        utf8_percent_encode(&self.0, encoding::PATH).into()
    }

    /// Resolve the image against the base URL of the site.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL is invalid.
    pub fn resolve(&self, base_url: &Url) -> Result<Url, url::ParseError> {
        base_url.join(&self.href())
    }
}

impl From<String> for ImageSource {
    fn from(from: String) -> Self {
        Self::new(from)
    }
}

impl From<&str> for ImageSource {
    fn from(from: &str) -> Self {
        Self::new(from.to_owned())
    }
}

impl AsRef<str> for ImageSource {
    fn as_ref(&self) -> &str {
        self.path()
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

const IMAGE_FILE_NAME_REGEX_STR: &str = r"(?i)\.(jpe?g|png|webp|gif)$";

static IMAGE_FILE_NAME_REGEX: OnceCell<Regex> = OnceCell::new();

#[must_use]
fn image_file_name_regex() -> &'static Regex {
    IMAGE_FILE_NAME_REGEX.get_or_init(|| IMAGE_FILE_NAME_REGEX_STR.parse().unwrap())
}

/// Check if the file name has a supported image extension.
#[must_use]
pub fn is_image_file_name(file_name: &str) -> bool {
    image_file_name_regex().is_match(file_name)
}

/// Collect the images of the given directories below the public root.
///
/// The images of each directory are sorted by path. Directories are
/// concatenated in the given order. Directories that cannot be read
/// contribute no images.
#[must_use]
pub fn scan_public_dirs<D>(public_root: &Path, dirs: impl IntoIterator<Item = D>) -> Vec<ImageSource>
where
    D: AsRef<str>,
{
    dirs.into_iter()
        .flat_map(|dir| scan_public_dir(public_root, dir.as_ref()))
        .collect()
}

fn scan_public_dir(public_root: &Path, dir: &str) -> Vec<ImageSource> {
    let entries = match fs::read_dir(public_root.join(dir)) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("Skipping image directory {dir}: {err}");
            return Vec::new();
        }
    };
    let mut images = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|file_type| file_type.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|file_name| is_image_file_name(file_name))
        .map(|file_name| ImageSource::new(format!("/{dir}/{file_name}")))
        .collect::<Vec<_>>();
    images.sort_unstable();
    log::debug!("Found {num_images} image(s) in {dir}", num_images = images.len());
    images
}
