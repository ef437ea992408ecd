//! Paging and filtering for post listings.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::domain::post::fields;
use crate::error::DomainError;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u64 = 200;

/// A window over a listing: skip `from` records, return at most `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub from: u64,
    pub size: u64,
}

impl Page {
    /// Validate raw paging parameters.
    pub fn new(from: i64, size: i64) -> Result<Self, DomainError> {
        if from < 0 || size < 0 || size as u64 > MAX_PAGE_SIZE {
            return Err(DomainError::Validation(format!(
                "invalid from {from} smaller than 0 or size {size} outside 0..={MAX_PAGE_SIZE}"
            )));
        }

        Ok(Self {
            from: from as u64,
            size: size as u64,
        })
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            from: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Expected value of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// The field must equal this value.
    Equals(Value),
    /// The field must be absent or null.
    Missing,
}

/// Field-name to expected-value mapping, combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: BTreeMap<String, FilterValue>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields
            .insert(field.into(), FilterValue::Equals(value.into()));
        self
    }

    pub fn missing(mut self, field: impl Into<String>) -> Self {
        self.fields.insert(field.into(), FilterValue::Missing);
        self
    }

    /// Drop the restriction on `field`, if any.
    pub fn remove(&mut self, field: &str) -> Option<FilterValue> {
        self.fields.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.fields.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether a stored document satisfies every restriction.
    pub fn matches(&self, document: &Map<String, Value>) -> bool {
        self.fields.iter().all(|(field, expected)| {
            let actual = document.get(field);
            match expected {
                FilterValue::Equals(value) => actual == Some(value),
                FilterValue::Missing => matches!(actual, None | Some(Value::Null)),
            }
        })
    }

    /// Posts that have been published.
    pub fn published_only() -> Self {
        Self::new().eq(fields::IS_PUBLISHED, true)
    }

    /// Every post written by `author`, whatever its publish state.
    pub fn authored_by(author: &str) -> Self {
        Self::new().eq(fields::AUTHOR_ID, author)
    }
}
