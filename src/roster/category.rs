// SPDX-FileCopyrightText: The wedding-site authors
// SPDX-License-Identifier: MPL-2.0

//! Role categories and their pairing rules

use std::fmt;

use crate::StringTyped;

use super::Member;

/// A role category with a fixed display position.
///
/// Categories that are not listed here are rendered after all canonical
/// categories, in the order in which they are first encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Category {
    TheCouple,
    ParentsOfTheGroom,
    ParentsOfTheBride,
    BestMan,
    MaidOrMatronOfHonor,
    CandleSponsors,
    VeilSponsors,
    CordSponsors,
    Groomsmen,
    Bridesmaids,
    FlowerGirls,
    RingCoinBearers,
}

impl Category {
    /// The display order.
    pub const CANONICAL_ORDER: [Self; 12] = [
        Self::TheCouple,
        Self::ParentsOfTheGroom,
        Self::ParentsOfTheBride,
        Self::BestMan,
        Self::MaidOrMatronOfHonor,
        Self::CandleSponsors,
        Self::VeilSponsors,
        Self::CordSponsors,
        Self::Groomsmen,
        Self::Bridesmaids,
        Self::FlowerGirls,
        Self::RingCoinBearers,
    ];

    /// The label as delivered by the data source.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TheCouple => "The Couple",
            Self::ParentsOfTheGroom => "Parents of the Groom",
            Self::ParentsOfTheBride => "Parents of the Bride",
            Self::BestMan => "Best Man",
            Self::MaidOrMatronOfHonor => "Maid/Matron of Honor",
            Self::CandleSponsors => "Candle Sponsors",
            Self::VeilSponsors => "Veil Sponsors",
            Self::CordSponsors => "Cord Sponsors",
            Self::Groomsmen => "Groomsmen",
            Self::Bridesmaids => "Bridesmaids",
            Self::FlowerGirls => "Flower Girls",
            Self::RingCoinBearers => "Ring/Coin Bearers",
        }
    }

    /// Look up a canonical category by its exact label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::CANONICAL_ORDER
            .into_iter()
            .find(|category| category.label() == label)
    }

    /// How members of this category are laid out.
    #[must_use]
    pub fn strategy(self) -> Strategy {
        match self {
            Self::TheCouple => Strategy::Couple,
            Self::CordSponsors => Strategy::PairIfTwo,
            _ => PairingRule::find(self).map_or(Strategy::Generic, Strategy::ZipPair),
        }
    }

    /// Check if the category is always rendered as a single centered column.
    #[must_use]
    pub fn is_single_column(self) -> bool {
        is_single_column_label(self.label())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Labels of categories that never use the two-column split.
///
/// Some of these are not canonical and only take effect once they are.
pub const SINGLE_COLUMN_LABELS: [&str; 6] = [
    "Best Man",
    "Maid/Matron of Honor",
    "Ring Bearer",
    "Coin Bearer",
    "Bible Bearer",
    "Presider",
];

/// [`SINGLE_COLUMN_LABELS`]
#[must_use]
pub fn is_single_column_label(label: &str) -> bool {
    SINGLE_COLUMN_LABELS.contains(&label)
}

/// Reordering applied to one side of a pair before zipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortRule {
    /// Titles containing "father" (case-insensitive) go first.
    ///
    /// The relative order is otherwise preserved.
    FatherFirst,
}

impl SortRule {
    /// Check if the member belongs in front.
    #[must_use]
    pub fn is_leading<S>(self, member: &Member<S>) -> bool
    where
        S: StringTyped,
    {
        match self {
            Self::FatherFirst => member.has_title_containing("father"),
        }
    }

    /// Count the leading members of a column.
    #[must_use]
    pub fn count_leading<S>(self, column: &[&Member<S>]) -> usize
    where
        S: StringTyped,
    {
        column
            .iter()
            .take_while(|member| self.is_leading(member))
            .count()
    }
}

/// Two categories rendered as one left/right block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingRule {
    /// Left column
    pub left: Category,

    /// Right column
    pub right: Category,

    /// Applied to both columns
    pub sort: Option<SortRule>,
}

/// All combined blocks.
pub static PAIRING_RULES: [PairingRule; 4] = [
    PairingRule {
        left: Category::ParentsOfTheGroom,
        right: Category::ParentsOfTheBride,
        sort: Some(SortRule::FatherFirst),
    },
    PairingRule {
        left: Category::BestMan,
        right: Category::MaidOrMatronOfHonor,
        sort: None,
    },
    PairingRule {
        left: Category::CandleSponsors,
        right: Category::VeilSponsors,
        sort: None,
    },
    PairingRule {
        left: Category::Groomsmen,
        right: Category::Bridesmaids,
        sort: None,
    },
];

impl PairingRule {
    /// Find the rule that involves the given category.
    #[must_use]
    pub fn find(category: Category) -> Option<&'static Self> {
        PAIRING_RULES.iter().find(|rule| rule.involves(category))
    }

    /// Check if the category is either the left or the right column.
    #[must_use]
    pub fn involves(&self, category: Category) -> bool {
        self.left == category || self.right == category
    }
}

/// Layout strategy of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Groom on the left, bride on the right, in a single row.
    Couple,

    /// Combined with another category into one block.
    ZipPair(&'static PairingRule),

    /// A single left/right row for exactly two members, otherwise
    /// [`Strategy::Generic`].
    PairIfTwo,

    /// Centered for single-column categories and up to two members,
    /// otherwise split in half.
    Generic,
}
