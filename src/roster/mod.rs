// SPDX-FileCopyrightText: The wedding-site authors
// SPDX-License-Identifier: MPL-2.0

//! Roster layout
//!
//! The wedding entourage arrives as a flat list of members, each tagged
//! with a role category. [`compute_layout()`] groups the members by
//! category and emits one [`Block`] per rendered category (or pair of
//! categories) in display order.
//!
//! Each block consists of rows that are either a single centered member
//! or a left/right pair of cells. Left cells are aligned towards the
//! center axis on the right, right cells towards the center axis on the
//! left. A [`Cell::Placeholder`] keeps the row height when one column is
//! shorter than the other.

use std::{
    collections::{HashMap, HashSet},
    iter,
};

use itertools::{EitherOrBoth, Itertools as _};
use serde::{Deserialize, Deserializer};

use crate::{StringTyped, contains_ignore_case};

pub mod category;

pub use self::category::{Category, PairingRule, SortRule, Strategy};

/// Category label of members without a category.
pub const OTHER_CATEGORY_LABEL: &str = "Other";

/// A member of the wedding entourage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(bound(deserialize = "S: StringTyped + Deserialize<'de>"))]
pub struct Member<S = String> {
    /// The display name
    #[serde(rename = "Name", default, deserialize_with = "nullable")]
    pub name: S,

    /// The role category label
    ///
    /// Either one of the [canonical](Category) labels or arbitrary text.
    #[serde(rename = "RoleCategory", default, deserialize_with = "nullable")]
    pub category: S,

    /// The optional role title, e.g. "Father" or "Bridesmaid"
    #[serde(rename = "RoleTitle", default)]
    pub title: Option<S>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl<S> Member<S>
where
    S: StringTyped,
{
    /// Create a new member.
    #[must_use]
    pub fn new(name: &str, category: &str, title: Option<&str>) -> Self {
        Self {
            name: S::from_str(name),
            category: S::from_str(category),
            title: title.map(S::from_str),
        }
    }

    /// Return the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Return the non-empty category label.
    ///
    /// Members without a category are labeled [`OTHER_CATEGORY_LABEL`].
    #[must_use]
    pub fn category_label(&self) -> &str {
        let label = self.category.as_ref();
        if label.is_empty() {
            OTHER_CATEGORY_LABEL
        } else {
            label
        }
    }

    /// Return the non-empty role title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title
            .as_ref()
            .map(AsRef::as_ref)
            .filter(|title| !title.is_empty())
    }

    /// Check if the title contains the given lowercase text, ignoring case.
    #[must_use]
    pub fn has_title_containing(&self, needle: &str) -> bool {
        self.title()
            .is_some_and(|title| contains_ignore_case(title, needle))
    }
}

/// Decode the members delivered by the entourage endpoint.
///
/// Expects a JSON array of records with the fields `Name`, `RoleCategory`
/// and `RoleTitle`. Additional fields are ignored.
///
/// # Errors
///
/// Returns an error if the input is not a JSON array of such records.
pub fn decode_json<S>(json: &str) -> Result<Vec<Member<S>>, serde_json::Error>
where
    S: StringTyped + for<'de> Deserialize<'de>,
{
    serde_json::from_str(json)
}

/// A cell of a paired row
#[derive(Debug, PartialEq, Eq)]
pub enum Cell<'a, S = String> {
    /// A member
    Member(&'a Member<S>),

    /// Empty space of the same height as a member cell
    Placeholder,
}

#[allow(clippy::expl_impl_clone_on_copy)]
impl<S> Clone for Cell<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Cell<'_, S> {}

impl<'a, S> Cell<'a, S> {
    /// Return the member, if any.
    #[must_use]
    pub const fn member(self) -> Option<&'a Member<S>> {
        match self {
            Self::Member(member) => Some(member),
            Self::Placeholder => None,
        }
    }

    /// Check for a placeholder.
    #[must_use]
    pub const fn is_placeholder(self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

impl<'a, S> From<Option<&'a Member<S>>> for Cell<'a, S> {
    fn from(from: Option<&'a Member<S>>) -> Self {
        from.map_or(Self::Placeholder, Self::Member)
    }
}

/// A row of a [`Block`]
#[derive(Debug, PartialEq, Eq)]
pub enum LayoutRow<'a, S = String> {
    /// A single member, centered
    Centered(&'a Member<S>),

    /// Two cells meeting at the center axis
    Paired {
        /// Right-aligned cell
        left: Cell<'a, S>,

        /// Left-aligned cell
        right: Cell<'a, S>,
    },
}

#[allow(clippy::expl_impl_clone_on_copy)]
impl<S> Clone for LayoutRow<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for LayoutRow<'_, S> {}

impl<'a, S> LayoutRow<'a, S> {
    /// Create a paired row.
    #[must_use]
    pub fn paired(left: impl Into<Cell<'a, S>>, right: impl Into<Cell<'a, S>>) -> Self {
        Self::Paired {
            left: left.into(),
            right: right.into(),
        }
    }

    /// The members of this row from left to right.
    pub fn members(self) -> impl Iterator<Item = &'a Member<S>> {
        let (first, second) = match self {
            Self::Centered(member) => (Some(member), None),
            Self::Paired { left, right } => (left.member(), right.member()),
        };
        first.into_iter().chain(second)
    }
}

/// Heading of a [`Block`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading<'a> {
    /// A single centered title
    Single(&'a str),

    /// One title above each column
    Split {
        /// Title of the left column
        left: &'a str,

        /// Title of the right column
        right: &'a str,
    },
}

/// A rendered category, or pair of categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a, S = String> {
    /// The title(s)
    pub heading: Heading<'a>,

    /// The rows, never empty
    pub rows: Vec<LayoutRow<'a, S>>,
}

impl<'a, S> Block<'a, S> {
    /// All members of this block in row order, left to right.
    pub fn members(&self) -> impl Iterator<Item = &'a Member<S>> + '_ {
        self.rows.iter().flat_map(|row| row.members())
    }
}

struct Groups<'a, S> {
    canonical: HashMap<Category, Vec<&'a Member<S>>>,
    others: Vec<(&'a str, Vec<&'a Member<S>>)>,
}

impl<'a, S> Groups<'a, S>
where
    S: StringTyped,
{
    fn new(members: &'a [Member<S>]) -> Self {
        let mut canonical = HashMap::<_, Vec<_>>::new();
        let mut others = Vec::<(_, Vec<_>)>::new();
        for member in members {
            let label = member.category_label();
            if let Some(category) = Category::from_label(label) {
                canonical.entry(category).or_default().push(member);
                continue;
            }
            if let Some((_, group)) = others.iter_mut().find(|(other, _)| *other == label) {
                group.push(member);
            } else {
                others.push((label, vec![member]));
            }
        }
        Self { canonical, others }
    }

    fn get(&self, category: Category) -> &[&'a Member<S>] {
        self.canonical
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Lay out the roster.
///
/// Blocks follow [`Category::CANONICAL_ORDER`], followed by all other
/// categories in the order in which they first appear. Categories without
/// members produce no block. The relative order of members within a
/// category is preserved, except for the [`SortRule`] of a pairing.
#[must_use]
pub fn compute_layout<S>(members: &[Member<S>]) -> Vec<Block<'_, S>>
where
    S: StringTyped,
{
    let groups = Groups::new(members);
    let mut blocks = Vec::new();
    let mut done = HashSet::new();
    for category in Category::CANONICAL_ORDER {
        if done.contains(&category) {
            // Already rendered as part of a pair
            continue;
        }
        let group = groups.get(category);
        if group.is_empty() {
            // A pair is rendered at its first populated category.
            continue;
        }
        let block = match category.strategy() {
            Strategy::Couple => couple_block(category, group),
            Strategy::ZipPair(rule) => {
                done.insert(rule.left);
                done.insert(rule.right);
                let left = groups.get(rule.left);
                let right = groups.get(rule.right);
                if (left.is_empty() || right.is_empty()) && category.is_single_column() {
                    // Without a counterpart there is nothing to pair with
                    generic_block(category.label(), group, true)
                } else {
                    zip_pair_block(rule, left, right)
                }
            }
            Strategy::PairIfTwo => {
                if let [left, right] = group {
                    Block {
                        heading: Heading::Single(category.label()),
                        rows: vec![LayoutRow::paired(Cell::Member(*left), Cell::Member(*right))],
                    }
                } else {
                    generic_block(category.label(), group, category.is_single_column())
                }
            }
            Strategy::Generic => {
                generic_block(category.label(), group, category.is_single_column())
            }
        };
        blocks.push(block);
    }
    for (label, group) in groups.others {
        blocks.push(generic_block(label, &group, false));
    }
    log::debug!(
        "Laid out {num_members} member(s) in {num_blocks} block(s)",
        num_members = members.len(),
        num_blocks = blocks.len()
    );
    blocks
}

fn couple_block<'a, S>(category: Category, group: &[&'a Member<S>]) -> Block<'a, S>
where
    S: StringTyped,
{
    let groom = group
        .iter()
        .copied()
        .find(|member| member.has_title_containing("groom"));
    let bride = group
        .iter()
        .copied()
        .find(|member| member.has_title_containing("bride"));
    Block {
        heading: Heading::Single(category.label()),
        rows: vec![LayoutRow::paired(groom, bride)],
    }
}

fn zip_pair_block<'a, S>(
    rule: &PairingRule,
    left: &[&'a Member<S>],
    right: &[&'a Member<S>],
) -> Block<'a, S>
where
    S: StringTyped,
{
    let heading = Heading::Split {
        left: rule.left.label(),
        right: rule.right.label(),
    };
    let Some(sort) = rule.sort else {
        return Block {
            heading,
            rows: zip_columns(column(left, 0), column(right, 0)),
        };
    };
    let left = sorted_column(sort, left);
    let right = sorted_column(sort, right);
    let left_leading = sort.count_leading(&left);
    let right_leading = sort.count_leading(&right);
    // Shift the column with fewer leading members down to align the rest,
    // but only within the length difference. The row count stays at the
    // length of the longer column.
    let left_shift = right_leading
        .saturating_sub(left_leading)
        .min(right.len().saturating_sub(left.len()));
    let right_shift = left_leading
        .saturating_sub(right_leading)
        .min(left.len().saturating_sub(right.len()));
    Block {
        heading,
        rows: zip_columns(column(&left, left_shift), column(&right, right_shift)),
    }
}

fn sorted_column<'a, S>(sort: SortRule, group: &[&'a Member<S>]) -> Vec<&'a Member<S>>
where
    S: StringTyped,
{
    group
        .iter()
        .copied()
        .sorted_by_key(|member| !sort.is_leading(member))
        .collect()
}

fn generic_block<'a, S>(
    label: &'a str,
    group: &[&'a Member<S>],
    single_column: bool,
) -> Block<'a, S> {
    let rows = if single_column || group.len() <= 2 {
        group.iter().copied().map(LayoutRow::Centered).collect()
    } else {
        let (left, right) = group.split_at(group.len().div_ceil(2));
        zip_columns(column(left, 0), column(right, 0))
    };
    Block {
        heading: Heading::Single(label),
        rows,
    }
}

/// A column of cells, starting with `shift` placeholders.
fn column<'a, S>(
    members: &[&'a Member<S>],
    shift: usize,
) -> impl Iterator<Item = Option<&'a Member<S>>> {
    iter::repeat_n(None, shift).chain(members.iter().copied().map(Some))
}

/// Zip two columns into as many paired rows as the longer column has cells.
fn zip_columns<'a, S>(
    left: impl Iterator<Item = Option<&'a Member<S>>>,
    right: impl Iterator<Item = Option<&'a Member<S>>>,
) -> Vec<LayoutRow<'a, S>> {
    left.zip_longest(right)
        .map(|cells| {
            let (left, right) = match cells {
                EitherOrBoth::Both(left, right) => (left, right),
                EitherOrBoth::Left(left) => (left, None),
                EitherOrBoth::Right(right) => (None, right),
            };
            LayoutRow::paired(left, right)
        })
        .collect()
}
