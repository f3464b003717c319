use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// Reads a JSON array entry by entry. Entries that do not parse are logged
/// and left out, so one bad record does not cost the rest of the document.
pub(crate) fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = Vec::<Value>::deserialize(deserializer)?;
    let total = items.len();
    let parsed = items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                log::warn!("skipping entry {} of {}: {}", idx + 1, total, err);
                None
            }
        })
        .collect();
    Ok(parsed)
}
