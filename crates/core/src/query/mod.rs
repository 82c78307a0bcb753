//! Roster query engine.
//!
//! Pure filter/search/sort over borrowed record slices. Callers pass the store's lists by
//! reference together with a [`RosterQuery`] and receive a freshly ordered `Vec<&T>`; the
//! records themselves are never copied or mutated. Results are recomputed in full on every
//! parameter change.
//!
//! - [`roster`]: inpatient census (search, status filter, date/name sort)
//! - [`schedule`]: daily agenda (category filter, time/name/type sort)
//! - [`sort`]: sort direction and the sort-toggle state machine
//! - [`clock`]: 12-hour clock parsing used by agenda sorting

pub mod clock;
pub mod roster;
pub mod schedule;
pub mod sort;

pub use roster::{PatientQuery, RosterSortKey};
pub use schedule::{ScheduleQuery, ScheduleSortKey};
pub use sort::{SortDirection, SortState};

use portal_types::SearchTerm;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A record type the query engine can filter, search and sort.
pub trait Queryable {
    /// Exact-match filter value (status, category, ...).
    type Filter: Copy + PartialEq;
    /// Sort key enumeration for this record type.
    type SortKey: Copy + PartialEq;

    fn matches_filter(&self, filter: Self::Filter) -> bool;

    /// Whether any searchable field contains `term`. Empty fields never match.
    fn matches_search(&self, term: &SearchTerm) -> bool;

    /// Directed comparison. Implementations decide how unorderable values interact with the
    /// direction.
    fn compare_by(&self, other: &Self, key: Self::SortKey, direction: SortDirection) -> Ordering;
}

/// Parameters driving a list view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterQuery<F, K> {
    /// Free text; blank matches everything.
    #[serde(default)]
    pub search: String,
    /// `None` means no filter.
    #[serde(default)]
    pub filter: Option<F>,
    pub sort: SortState<K>,
}

impl<F, K> RosterQuery<F, K> {
    pub fn new(sort: SortState<K>) -> Self {
        Self {
            search: String::new(),
            filter: None,
            sort,
        }
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Option<F>) -> Self {
        self.filter = filter;
        self
    }
}

impl<F, K> Default for RosterQuery<F, K>
where
    SortState<K>: Default,
{
    fn default() -> Self {
        Self::new(SortState::default())
    }
}

/// Keeps records passing both the exact-match filter and the free-text search, in input order.
pub fn filter_records<'a, R: Queryable>(
    records: &'a [R],
    search: &str,
    filter: Option<R::Filter>,
) -> Vec<&'a R> {
    let term = SearchTerm::parse(search);
    records
        .iter()
        .filter(|record| filter.map_or(true, |f| record.matches_filter(f)))
        .filter(|record| term.as_ref().map_or(true, |t| record.matches_search(t)))
        .collect()
}

/// Stable sort of an already borrowed view.
pub fn sort_records<R: Queryable>(view: &mut [&R], sort: SortState<R::SortKey>) {
    view.sort_by(|a, b| a.compare_by(b, sort.key, sort.direction));
}

/// Filters, then sorts.
pub fn run_query<'a, R: Queryable>(
    records: &'a [R],
    query: &RosterQuery<R::Filter, R::SortKey>,
) -> Vec<&'a R> {
    let mut view = filter_records(records, &query.search, query.filter);
    sort_records(&mut view, query.sort);
    tracing::debug!(total = records.len(), matched = view.len(), "roster query");
    view
}
