use std::fmt;
use std::str::FromStr;

/// Addresses one info block of a parent alert: `"<alert_id>:<info_index>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompoundId {
    pub alert_id: String,
    pub info_index: usize,
}

impl CompoundId {
    pub fn new(alert_id: impl Into<String>, info_index: usize) -> Self {
        Self {
            alert_id: alert_id.into(),
            info_index,
        }
    }
}

impl fmt::Display for CompoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.alert_id, self.info_index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("identifier {raw:?} is not of the form <alert_id>:<info_index>")]
    Malformed { raw: String },
    #[error("info index {index:?} in identifier {raw:?} is not a non-negative integer")]
    InvalidIndex { raw: String, index: String },
}

impl FromStr for CompoundId {
    type Err = IdentifierError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = raw.split(':').collect();
        let [alert_id, index] = segments.as_slice() else {
            return Err(IdentifierError::Malformed {
                raw: raw.to_string(),
            });
        };

        let info_index = index
            .parse::<usize>()
            .map_err(|_| IdentifierError::InvalidIndex {
                raw: raw.to_string(),
                index: index.to_string(),
            })?;

        Ok(Self::new(*alert_id, info_index))
    }
}
