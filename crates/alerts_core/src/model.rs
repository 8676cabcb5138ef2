use serde::{Deserialize, Deserializer, Serialize};

/// One alert as returned by the search endpoint, addressing a single info block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub alert_id: String,
    /// Compound identifier, `"<alert_id>:<info_index>"`.
    pub id: String,
    pub info: InfoBlock,
    #[serde(default)]
    pub msg_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub headline: String,
    #[serde(deserialize_with = "null_as_default")]
    pub urgency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub severity: String,
    #[serde(deserialize_with = "null_as_default")]
    pub certainty: String,
    #[serde(deserialize_with = "null_as_default")]
    pub response_types: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub sender_name: String,
    pub web: Option<String>,
    pub effective: Option<String>,
    pub sent: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub expires: String,
    #[serde(deserialize_with = "null_as_default")]
    pub areas: Vec<Area>,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub instruction: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Area {
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uri: String,
    #[serde(default)]
    pub digest: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// Body of the alert lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResponse {
    pub infos: Vec<InfoBlock>,
    #[serde(default)]
    pub msg_type: Option<String>,
}

/// Body of the search endpoint. The default value is the empty page shown
/// before and during a fetch and after a failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub total: u64,
    pub hits: Vec<AlertRecord>,
}

/// Navigation state that may carry an already-resolved alert under `hit`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryState {
    #[serde(default)]
    pub hit: Option<AlertRecord>,
}

impl HistoryState {
    pub fn with_hit(hit: AlertRecord) -> Self {
        Self { hit: Some(hit) }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
