// SPDX-FileCopyrightText: The wedding-site authors
// SPDX-License-Identifier: MPL-2.0

//! Principal sponsors
//!
//! Sponsors arrive already paired, one record per couple. Unlike the
//! [roster](crate::roster) they are never regrouped.

use serde::{Deserialize, Deserializer};

use crate::StringTyped;

/// A pair of principal sponsors as delivered by the data source.
///
/// Either side might be empty. Names are used verbatim, a name that
/// consists only of whitespace is not empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(bound(deserialize = "S: StringTyped + Deserialize<'de>"))]
pub struct SponsorPair<S = String> {
    /// Rendered in the left column
    #[serde(rename = "MalePrincipalSponsor", default, deserialize_with = "nullable")]
    pub male: S,

    /// Rendered in the right column
    #[serde(
        rename = "FemalePrincipalSponsor",
        default,
        deserialize_with = "nullable"
    )]
    pub female: S,
}

fn nullable<'de, D, S>(deserializer: D) -> Result<S, D::Error>
where
    D: Deserializer<'de>,
    S: Deserialize<'de> + Default,
{
    Option::<S>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl<S> SponsorPair<S>
where
    S: StringTyped,
{
    /// Create a new pair.
    #[must_use]
    pub fn new(male: &str, female: &str) -> Self {
        Self {
            male: S::from_str(male),
            female: S::from_str(female),
        }
    }

    /// Check if both sides are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.male.as_ref().is_empty() && self.female.as_ref().is_empty()
    }
}

/// A cell of a [`SponsorRow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SponsorCell<'a> {
    /// The name of a sponsor
    Sponsor(&'a str),

    /// Empty space of the same height as a sponsor cell
    Placeholder,
}

impl<'a> SponsorCell<'a> {
    /// Return the name, if any.
    #[must_use]
    pub const fn name(self) -> Option<&'a str> {
        match self {
            Self::Sponsor(name) => Some(name),
            Self::Placeholder => None,
        }
    }

    /// Check for a placeholder.
    #[must_use]
    pub const fn is_placeholder(self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

impl<'a> From<&'a str> for SponsorCell<'a> {
    fn from(from: &'a str) -> Self {
        if from.is_empty() {
            Self::Placeholder
        } else {
            Self::Sponsor(from)
        }
    }
}

/// A rendered row of sponsors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SponsorRow<'a> {
    /// Right-aligned
    pub left: SponsorCell<'a>,

    /// Left-aligned
    pub right: SponsorCell<'a>,
}

/// Lay out the sponsors, one row per non-empty pair.
#[must_use]
pub fn layout_sponsors<S>(pairs: &[SponsorPair<S>]) -> Vec<SponsorRow<'_>>
where
    S: StringTyped,
{
    pairs
        .iter()
        .filter(|pair| !pair.is_empty())
        .map(|pair| SponsorRow {
            left: pair.male.as_ref().into(),
            right: pair.female.as_ref().into(),
        })
        .collect()
}

/// Decode the pairs delivered by the principal sponsors endpoint.
///
/// # Errors
///
/// Returns an error if the input is not a JSON array of pairs.
pub fn decode_json<S>(json: &str) -> Result<Vec<SponsorPair<S>>, serde_json::Error>
where
    S: StringTyped + for<'de> Deserialize<'de>,
{
    serde_json::from_str(json)
}
