//! Abstractions for page-number pagination.

use std::{num::NonZeroU32, str::FromStr};

use derive_more::{Display, From, Into};

/// 1-indexed number of a [`Page`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PageNum(NonZeroU32);

impl PageNum {
    /// Number of the first [`Page`].
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Creates a new [`PageNum`] if the given `num` is not zero.
    #[must_use]
    pub const fn new(num: u32) -> Option<Self> {
        match NonZeroU32::new(num) {
            Some(num) => Some(Self(num)),
            None => None,
        }
    }

    /// Returns the numeric value of this [`PageNum`].
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the [`PageNum`] following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the [`PageNum`] preceding this one, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        Self::new(self.get() - 1)
    }
}

impl Default for PageNum {
    fn default() -> Self {
        Self::FIRST
    }
}

impl FromStr for PageNum {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid page number")
    }
}

/// Maximum number of items on a [`Page`].
#[derive(Clone, Copy, Debug, Display, Eq, From, Hash, Into, PartialEq)]
pub struct Limit(NonZeroU32);

impl Limit {
    /// Creates a new [`Limit`] if the given `limit` is not zero.
    #[must_use]
    pub const fn new(limit: u32) -> Option<Self> {
        match NonZeroU32::new(limit) {
            Some(limit) => Some(Self(limit)),
            None => None,
        }
    }

    /// Returns the numeric value of this [`Limit`].
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

/// Total number of pages in a paginated collection.
///
/// Never zero: an empty collection still has a single (empty) page.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub struct TotalPages(NonZeroU32);

impl TotalPages {
    /// [`TotalPages`] of an empty collection.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Creates a new [`TotalPages`] from the server-reported `count`.
    ///
    /// Zero is treated as a single empty page.
    #[must_use]
    pub const fn new(count: u32) -> Self {
        match NonZeroU32::new(count) {
            Some(count) => Self(count),
            None => Self::ONE,
        }
    }

    /// Calculates [`TotalPages`] of a collection with `len` items split
    /// by the provided [`Limit`].
    #[must_use]
    pub fn from_len(len: usize, limit: Limit) -> Self {
        let len = u32::try_from(len).unwrap_or(u32::MAX);
        Self::new(len.div_ceil(limit.get()))
    }

    /// Returns the numeric value of this [`TotalPages`].
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the last [`PageNum`].
    #[must_use]
    pub const fn last(self) -> PageNum {
        PageNum(self.0)
    }

    /// Checks whether the provided [`PageNum`] exists.
    #[must_use]
    pub const fn contains(self, page: PageNum) -> bool {
        page.get() <= self.get()
    }
}

impl Default for TotalPages {
    fn default() -> Self {
        Self::ONE
    }
}

/// Pagination arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments {
    /// Requested [`PageNum`].
    pub page: PageNum,

    /// Number of items per page.
    pub limit: Limit,
}

impl Arguments {
    /// Creates new [`Arguments`] out of raw values, falling back to the first
    /// page and the `default` limit.
    ///
    /// [`None`] is returned if any of the provided values is out of range.
    pub fn new<Num>(
        page: Option<Num>,
        limit: Option<Num>,
        default: Limit,
    ) -> Option<Self>
    where
        Num: TryInto<u32>,
    {
        let page = match page {
            Some(p) => PageNum::new(p.try_into().ok()?)?,
            None => PageNum::FIRST,
        };
        let limit = match limit {
            Some(l) => Limit::new(l.try_into().ok()?)?,
            None => default,
        };
        Some(Self { page, limit })
    }

    /// Returns the number of items preceding the requested page.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page.get() as usize - 1).saturating_mul(self.limit.get() as usize)
    }
}

/// A page of a paginated collection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<I> {
    /// Items on this [`Page`].
    pub items: Vec<I>,

    /// Number of this [`Page`].
    pub number: PageNum,

    /// [`TotalPages`] of the whole collection.
    pub total_pages: TotalPages,
}

impl<I> Page<I> {
    /// Creates a new [`Page`] for the provided [`Arguments`].
    #[must_use]
    pub fn new(
        args: &Arguments,
        items: impl IntoIterator<Item = impl Into<I>>,
        total_pages: TotalPages,
    ) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            number: args.page,
            total_pages,
        }
    }

    /// Cuts a [`Page`] out of the whole collection.
    #[must_use]
    pub fn from_slice(all: &[I], args: &Arguments) -> Self
    where
        I: Clone,
    {
        let items = all
            .iter()
            .skip(args.offset())
            .take(args.limit.get() as usize)
            .cloned();
        Self::new(args, items, TotalPages::from_len(all.len(), args.limit))
    }

    /// Returns [`PageInfo`] of this [`Page`].
    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            has_next_page: self.number < self.total_pages.last(),
            has_previous_page: self.number > PageNum::FIRST,
        }
    }

    /// Maps items of this [`Page`] with the provided function.
    #[must_use]
    pub fn map<T>(self, f: impl FnMut(I) -> T) -> Page<T> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            total_pages: self.total_pages,
        }
    }
}

/// Information about neighbours of a [`Page`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageInfo {
    /// Indicator whether the collection has a next page.
    pub has_next_page: bool,

    /// Indicator whether the collection has a previous page.
    pub has_previous_page: bool,
}

/// Pagination selector.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of [`Node`]s."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}
