// SPDX-FileCopyrightText: The wedding-site authors
// SPDX-License-Identifier: MPL-2.0

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(test), deny(clippy::panic_in_result_fn))]
#![cfg_attr(not(debug_assertions), deny(clippy::used_underscore_binding))]

//! Presentation logic of a single-page wedding invitation site.
//!
//! The crate contains no rendering code. It computes what a page renders:
//!
//! - [`roster`]: groups the wedding entourage by role category and lays the
//!   members out as centered or left/right paired rows.
//! - [`sponsors`]: lays out the pre-paired principal sponsors.
//! - [`viewer`]: the lightbox state machine with keyboard, swipe, pinch and
//!   pan handling.
//! - [`gallery`]: image source handles and the public image directory scan.
//! - [`countdown`]: ceremony date parsing and the time left until it starts.
//! - [`config`]: the site configuration.
//!
//! Refer to [`docs`] for more information.

use std::borrow::Cow;

pub mod config;
pub mod countdown;
pub mod docs;
pub mod gallery;
pub mod roster;
pub mod sponsors;
pub mod viewer;

pub use self::{
    gallery::ImageSource,
    roster::{Block, Category, Cell, LayoutRow, Member, compute_layout},
    sponsors::{SponsorCell, SponsorPair, SponsorRow, layout_sponsors},
    viewer::{Host, Viewer, ViewerState},
};

/// Common trait for string-typed values, e.g. names and titles.
pub trait StringTyped: AsRef<str> + Clone + Default + PartialEq + Eq + Sized {
    /// Create a value from a borrowed string slice.
    #[must_use]
    fn from_str(from: &str) -> Self {
        Self::from_cow_str(from.into())
    }

    /// Create a value from an owned string.
    #[must_use]
    fn from_string(from: String) -> Self {
        Self::from_cow_str(from.into())
    }

    /// Create a value from a copy-on-write string.
    #[must_use]
    fn from_cow_str(from: Cow<'_, str>) -> Self;
}

impl StringTyped for String {
    fn from_str(from: &str) -> Self {
        from.to_owned()
    }

    fn from_string(from: String) -> Self {
        from
    }

    fn from_cow_str(from: Cow<'_, str>) -> Self {
        from.into_owned()
    }
}

#[cfg(feature = "compact_str")]
impl StringTyped for compact_str::CompactString {
    fn from_str(from: &str) -> Self {
        from.into()
    }

    fn from_string(from: String) -> Self {
        from.into()
    }

    fn from_cow_str(from: Cow<'_, str>) -> Self {
        from.into()
    }
}

#[cfg(feature = "smol_str")]
impl StringTyped for smol_str::SmolStr {
    fn from_str(from: &str) -> Self {
        Self::new(from)
    }

    fn from_string(from: String) -> Self {
        from.into()
    }

    fn from_cow_str(from: Cow<'_, str>) -> Self {
        Self::new(from)
    }
}

/// Case-insensitive substring containment.
///
/// `needle` must be lowercase.
#[must_use]
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    debug_assert_eq!(needle, needle.to_lowercase());
    haystack.to_lowercase().contains(needle)
}
