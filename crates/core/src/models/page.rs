//! Paged list envelope returned by the list and search endpoints.

use serde::{Deserialize, Deserializer, Serialize};

/// `{ "data": [...], "total": n }`.
///
/// Older API revisions answer with a bare JSON array; that form is accepted
/// too, with `total` taken as the array length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListPage<E> {
    pub data: Vec<E>,
    pub total: u64,
}

impl<E> ListPage<E> {
    pub fn new(data: Vec<E>, total: u64) -> Self {
        Self { data, total }
    }
}

impl<E> Default for ListPage<E> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<E> {
    Paged { data: Vec<E>, total: u64 },
    Bare(Vec<E>),
}

impl<'de, E: Deserialize<'de>> Deserialize<'de> for ListPage<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Envelope::deserialize(deserializer)? {
            Envelope::Paged { data, total } => Self { data, total },
            Envelope::Bare(data) => {
                let total = data.len() as u64;
                Self { data, total }
            }
        })
    }
}
