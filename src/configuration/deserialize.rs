pub mod keywords {
    use serde::{Deserialize, Deserializer};
    use serde_derive::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    enum KeywordEntry {
        Single(String),
        Array(Vec<String>),
    }

    /// Accepts a list or a single comma separated string, as environment
    /// variables can only carry the latter.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let keywords = match KeywordEntry::deserialize(deserializer)? {
            KeywordEntry::Single(line) => line.split(',').map(str::to_owned).collect(),
            KeywordEntry::Array(list) => list,
        };
        Ok(keywords
            .into_iter()
            .map(|k| k.trim().to_owned())
            .filter(|k| !k.is_empty())
            .collect())
    }
}
