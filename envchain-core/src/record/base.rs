//! Key-value container used as step information.
use crate::error::EnvChainError;
use std::collections::{hash_map::Iter, HashMap};

/// Represents possible types of values that can be stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value.
    Scalar(f32),

    /// A 1-dimensional array of floating-point values.
    Array1(Vec<f32>),

    /// A text value.
    String(String),
}

/// A container for storing key-value pairs of various data types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records, consuming both.
    ///
    /// Values of `record` overwrite those of `self` for duplicated keys.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Gets a scalar value from the record.
    pub fn get_scalar(&self, k: &str) -> Result<f32, EnvChainError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(EnvChainError::RecordValueTypeError("Scalar".to_string())),
            None => Err(EnvChainError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a 1-dimensional array from the record.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, EnvChainError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(EnvChainError::RecordValueTypeError("Array1".to_string())),
            None => Err(EnvChainError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a string value from the record.
    pub fn get_string(&self, k: &str) -> Result<String, EnvChainError> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(EnvChainError::RecordValueTypeError("String".to_string())),
            None => Err(EnvChainError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, RecordValue};
    use crate::error::EnvChainError;

    #[test]
    fn test_record_typed_access() {
        let mut record = Record::from_scalar("score", 21.0);
        record.insert("game", RecordValue::String("pong".to_string()));

        assert_eq!(record.get_scalar("score"), Ok(21.0));
        assert_eq!(record.get_string("game"), Ok("pong".to_string()));
        assert_eq!(
            record.get_scalar("game"),
            Err(EnvChainError::RecordValueTypeError("Scalar".to_string()))
        );
        assert_eq!(
            record.get_array1("frames"),
            Err(EnvChainError::RecordKeyError("frames".to_string()))
        );
    }

    #[test]
    fn test_record_merge_overwrites() {
        let a = Record::from_slice(&[
            ("x", RecordValue::Scalar(1.0)),
            ("y", RecordValue::Scalar(2.0)),
        ]);
        let b = Record::from_scalar("y", 3.0);
        let merged = a.merge(b);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get_scalar("x"), Ok(1.0));
        assert_eq!(merged.get_scalar("y"), Ok(3.0));
    }

    #[test]
    fn test_record_iteration() {
        let record = Record::from_slice(&[
            ("step", RecordValue::Scalar(4.0)),
            ("rewards", RecordValue::Array1(vec![1.0, -1.0])),
        ]);
        assert_eq!(record.get("step"), Some(&RecordValue::Scalar(4.0)));
        assert_eq!(record.get("lives"), None);
        assert_eq!(record.get_array1("rewards"), Ok(vec![1.0, -1.0]));

        let mut keys: Vec<_> = record.iter().map(|(k, _)| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["rewards", "step"]);
        assert!(!record.is_empty());
        assert!(Record::empty().is_empty());
    }
}
