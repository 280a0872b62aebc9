//! Generic filtering framework
//!
//! This module provides a trait-based approach to filtering values, used by
//! the result query to combine independent criteria.

use std::collections::HashSet;
use std::fmt::Debug;

/// A predicate over values of type `T`
pub trait Filter<T>: Debug + Send + Sync {
    /// Whether `input` passes the filter
    fn matches(&self, input: &T) -> bool;

    /// Names of the fields the filter reads
    fn required_resources(&self) -> HashSet<String>;
}

/// A filter that always includes all elements
#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeAllFilter;

impl<T> Filter<T> for IncludeAllFilter {
    fn matches(&self, _input: &T) -> bool {
        true
    }

    fn required_resources(&self) -> HashSet<String> {
        HashSet::new()
    }
}

/// A boxed filter, for combining filters of different types
pub type BoxedFilter<T> = Box<dyn Filter<T>>;

/// A filter that passes values accepted by all of its members
#[derive(Debug)]
pub struct AndFilter<T> {
    filters: Vec<BoxedFilter<T>>,
}

impl<T> AndFilter<T> {
    /// Create a new AND filter; with no members it accepts everything
    #[must_use]
    pub fn new(filters: Vec<BoxedFilter<T>>) -> Self {
        Self { filters }
    }

    /// Number of member filters
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether there are no member filters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl<T: Debug> Filter<T> for AndFilter<T> {
    fn matches(&self, input: &T) -> bool {
        self.filters.iter().all(|f| f.matches(input))
    }

    fn required_resources(&self) -> HashSet<String> {
        self.filters
            .iter()
            .flat_map(|f| f.required_resources())
            .collect()
    }
}

/// Builder for combining filters
#[derive(Debug)]
pub struct FilterBuilder<T> {
    filters: Vec<BoxedFilter<T>>,
}

impl<T> Default for FilterBuilder<T> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
        }
    }
}

impl<T: Debug + 'static> FilterBuilder<T> {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter
    #[must_use]
    pub fn add_filter<F: Filter<T> + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Add a filter when `filter` is `Some`
    #[must_use]
    pub fn add_optional<F: Filter<T> + 'static>(self, filter: Option<F>) -> Self {
        match filter {
            Some(filter) => self.add_filter(filter),
            None => self,
        }
    }

    /// Combine the collected filters with AND
    #[must_use]
    pub fn build_and(self) -> AndFilter<T> {
        AndFilter::new(self.filters)
    }
}
