use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sort key assigned to dolls whose id cell is blank.
///
/// Larger than any real catalog id, so unnumbered entries (collab dolls
/// without a list number) sort after every numbered one.
pub const BLANK_ID_SORT_KEY: u32 = 9999;

/// One T-Doll catalog entry, as scraped from the list page.
///
/// Field order is the serialization order of the output file and must
/// stay `id, name, type, rarity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TDoll {
    /// Catalog id as displayed, e.g. "119". May be empty.
    pub id: String,
    /// Display name, e.g. "AR-15".
    pub name: String,
    /// Doll class, e.g. "AR", "SMG".
    #[serde(rename = "type")]
    pub kind: String,
    /// Star rarity as displayed, e.g. "5".
    pub rarity: String,
}

/// A non-empty id cell that does not parse as an integer.
#[derive(Debug, Error)]
#[error("doll id '{id}' is not numeric")]
pub struct BadIdError {
    pub id: String,
    #[source]
    pub source: std::num::ParseIntError,
}

impl TDoll {
    /// Ordering key for the catalog: the integer value of `id`, or
    /// [`BLANK_ID_SORT_KEY`] when the id cell was blank.
    ///
    /// A non-empty id that fails to parse is an error, never a zero.
    pub fn sort_key(&self) -> Result<u32, BadIdError> {
        if self.id.is_empty() {
            return Ok(BLANK_ID_SORT_KEY);
        }
        self.id.parse().map_err(|source| BadIdError {
            id: self.id.clone(),
            source,
        })
    }
}

/// Stable ascending sort by [`TDoll::sort_key`].
///
/// Keys are computed up front, so a malformed id faults before any
/// reordering happens. Entries with equal keys keep their input order.
pub fn sort_catalog(dolls: Vec<TDoll>) -> Result<Vec<TDoll>, BadIdError> {
    let mut keyed = dolls
        .into_iter()
        .map(|doll| doll.sort_key().map(|key| (key, doll)))
        .collect::<Result<Vec<_>, _>>()?;
    keyed.sort_by_key(|(key, _)| *key);
    Ok(keyed.into_iter().map(|(_, doll)| doll).collect())
}
