use std::collections::BTreeMap;
use std::fmt;

use url::form_urlencoded;

/// Offset of the first hit on the requested page.
pub const FROM_KEY: &str = "from";
/// Number of hits per page.
pub const SIZE_KEY: &str = "size";
pub const DEFAULT_PAGE_SIZE: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
}

impl ParamValue {
    /// Interprets free text from the command line: integers and booleans are
    /// recognised, everything else stays text.
    pub fn infer(raw: &str) -> Self {
        if let Ok(value) = raw.parse::<i64>() {
            return Self::Integer(value);
        }
        match raw {
            "true" => Self::Boolean(true),
            "false" => Self::Boolean(false),
            _ => Self::Text(raw.to_string()),
        }
    }

    fn as_offset(&self) -> Option<u64> {
        match self {
            Self::Integer(value) => u64::try_from(*value).ok(),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Boolean(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("search parameter {0:?} is not of the form key=value")]
    MissingSeparator(String),
    #[error("search parameter {0:?} has an empty key")]
    EmptyKey(String),
}

/// Search parameters sent to the search endpoint as a query string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchParams {
    entries: BTreeMap<String, ParamValue>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds parameters from `key=value` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ParamError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut params = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ParamError::MissingSeparator(pair.to_string()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ParamError::EmptyKey(pair.to_string()));
            }
            params.set(key, ParamValue::infer(value.trim()));
        }
        Ok(params)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Current `from` offset; missing or unusable values count as 0.
    pub fn from_offset(&self) -> u64 {
        self.get(FROM_KEY)
            .and_then(ParamValue::as_offset)
            .unwrap_or(0)
    }

    /// Current `size`; missing, unusable or zero values fall back to the default.
    pub fn page_size(&self) -> u64 {
        self.get(SIZE_KEY)
            .and_then(ParamValue::as_offset)
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Serializes as `application/x-www-form-urlencoded`; empty params give "".
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            serializer.append_pair(key, &value.to_string());
        }
        serializer.finish()
    }
}
