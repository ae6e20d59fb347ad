//! Request and response types for single and batch sorts.
//!
//! Field names follow the wire format: requests carry `numbers`, responses
//! carry `sortedNumbers`, and a batch response wraps its sequences under
//! `sortedArrays`.

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One integer sequence to be sorted.
///
/// Decodes only from a JSON object. The `numbers` key matches
/// case-insensitively; a missing or `null` value decodes as empty, and
/// when the key repeats the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SortRequest {
    pub numbers: Vec<i64>,
}

impl SortRequest {
    pub fn new(numbers: Vec<i64>) -> Self {
        Self { numbers }
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Sort into non-decreasing order, reusing the request's buffer.
    ///
    /// Equal integers are indistinguishable, so an unstable sort is used.
    pub fn into_sorted(self) -> SortResponse {
        let mut numbers = self.numbers;
        numbers.sort_unstable();
        SortResponse {
            sorted_numbers: numbers,
        }
    }
}

impl From<Vec<i64>> for SortRequest {
    fn from(numbers: Vec<i64>) -> Self {
        Self::new(numbers)
    }
}

/// The sorted form of one [`SortRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortResponse {
    pub sorted_numbers: Vec<i64>,
}

impl SortResponse {
    pub fn new(sorted_numbers: Vec<i64>) -> Self {
        Self { sorted_numbers }
    }

    pub fn len(&self) -> usize {
        self.sorted_numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_numbers.is_empty()
    }

    /// `true` when every element is >= the one before it.
    pub fn is_sorted(&self) -> bool {
        self.sorted_numbers.windows(2).all(|w| w[0] <= w[1])
    }
}

/// A batch of independent sequences, in wire order.
///
/// Serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchRequest(pub Vec<SortRequest>);

impl BatchRequest {
    pub fn new(sequences: Vec<SortRequest>) -> Self {
        Self(sequences)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of integers across every sequence.
    pub fn total_numbers(&self) -> usize {
        self.0.iter().map(SortRequest::len).sum()
    }

    pub fn into_inner(self) -> Vec<SortRequest> {
        self.0
    }
}

impl From<Vec<SortRequest>> for BatchRequest {
    fn from(sequences: Vec<SortRequest>) -> Self {
        Self(sequences)
    }
}

impl IntoIterator for BatchRequest {
    type Item = SortRequest;
    type IntoIter = std::vec::IntoIter<SortRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Aggregate of every sorted sequence produced by a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub sorted_arrays: Vec<SortResponse>,
}

impl BatchResponse {
    pub fn new(sorted_arrays: Vec<SortResponse>) -> Self {
        Self { sorted_arrays }
    }
}

impl<'de> Deserialize<'de> for SortRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SortRequestVisitor)
    }
}

struct SortRequestVisitor;

impl<'de> Visitor<'de> for SortRequestVisitor {
    type Value = SortRequest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with a `numbers` array")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut numbers = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("numbers") {
                numbers = map
                    .next_value::<Option<Vec<i64>>>()?
                    .unwrap_or_default();
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(SortRequest { numbers })
    }
}
