//! Tri-state fields for partial updates.
//!
//! JSON distinguishes an omitted key from an explicit `null`. For nullable
//! columns both cases matter: omitted leaves the column untouched, `null`
//! clears it. Model such fields as `Option<Option<T>>` and annotate them with
//!
//! ```ignore
//! #[serde(default, deserialize_with = "promptdir_core::patch::present")]
//! ```
//!
//! so that an omitted key stays `None` and `null` becomes `Some(None)`.

use serde::{Deserialize, Deserializer};

/// Deserialize a present field (including `null`) as `Some(_)`.
pub fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
