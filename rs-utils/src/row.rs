use serde_json::{Map, Value};

use crate::error::DataError;

/// Typed access to one raw table row.
///
/// Every accessor records a schema error instead of returning early, so a row
/// with several problems reports all of them at once. A `required_*` accessor
/// returns `None` exactly when it recorded an error.
pub struct RowReader<'a> {
    row: usize,
    fields: &'a Map<String, Value>,
    errors: Vec<DataError>,
}

impl<'a> RowReader<'a> {
    pub fn new(row: usize, value: &'a Value) -> Result<Self, DataError> {
        let Some(fields) = value.as_object() else {
            return Err(DataError::schema(row, "<row>", "must be an object"));
        };
        Ok(Self {
            row,
            fields,
            errors: Vec::new(),
        })
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Value of `field`, whose name matches case-insensitively. Null counts as absent.
    pub fn raw(&self, field: &str) -> Option<&'a Value> {
        let fields = self.fields;
        fields
            .get(field)
            .or_else(|| {
                fields
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(field))
                    .map(|(_, value)| value)
            })
            .filter(|v| !v.is_null())
    }

    pub fn reject(&mut self, field: &str, reason: impl Into<String>) {
        self.errors.push(DataError::schema(self.row, field, reason));
    }

    pub fn required_u32(&mut self, field: &str) -> Option<u32> {
        match self.raw(field) {
            Some(value) => self.read_u32(field, value),
            None => {
                self.reject(field, "is missing");
                None
            }
        }
    }

    /// Optional integer; a present but malformed value is still recorded as an error.
    pub fn optional_u32(&mut self, field: &str) -> Option<u32> {
        let value = self.raw(field)?;
        self.read_u32(field, value)
    }

    pub fn required_str(&mut self, field: &str) -> Option<&'a str> {
        match self.raw(field) {
            Some(Value::String(s)) => Some(s.as_str()),
            Some(_) => {
                self.reject(field, "must be a string");
                None
            }
            None => {
                self.reject(field, "is missing");
                None
            }
        }
    }

    pub fn optional_str(&mut self, field: &str) -> Option<&'a str> {
        match self.raw(field)? {
            Value::String(s) => Some(s.as_str()),
            _ => {
                self.reject(field, "must be a string");
                None
            }
        }
    }

    /// Boolean flag written either as `true`/`false` or `0`/`1`.
    pub fn optional_flag(&mut self, field: &str) -> Option<bool> {
        match self.raw(field) {
            None => Some(false),
            Some(Value::Bool(b)) => Some(*b),
            Some(value) => match value.as_u64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => {
                    self.reject(field, "must be a boolean or 0/1");
                    None
                }
            },
        }
    }

    pub fn required_array(&mut self, field: &str) -> Option<&'a [Value]> {
        match self.raw(field) {
            Some(Value::Array(items)) => Some(items.as_slice()),
            Some(_) => {
                self.reject(field, "must be an array");
                None
            }
            None => {
                self.reject(field, "is missing");
                None
            }
        }
    }

    /// Pair of non-negative integers, e.g. `[12, 0]`.
    pub fn required_pair(&mut self, field: &str) -> Option<[u32; 2]> {
        let items = self.required_array(field)?;
        if items.len() != 2 {
            self.reject(
                field,
                format!("must hold exactly 2 integers, found {}", items.len()),
            );
            return None;
        }
        let first = self.read_u32(field, &items[0]);
        let second = self.read_u32(field, &items[1]);
        Some([first?, second?])
    }

    /// Flags every property not listed in `known`, ignoring case.
    pub fn check_known_keys(&mut self, known: &[&str]) {
        let unknown: Vec<String> = self
            .fields
            .keys()
            .filter(|key| !known.iter().any(|k| k.eq_ignore_ascii_case(key)))
            .cloned()
            .collect();
        for key in unknown {
            self.reject(&key, "is not a known property");
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<DataError> {
        self.errors
    }

    fn read_u32(&mut self, field: &str, value: &Value) -> Option<u32> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) if i < 0 => {
                    self.reject(field, format!("must be non-negative, found {i}"));
                    None
                }
                Some(i) => match u32::try_from(i) {
                    Ok(v) => Some(v),
                    Err(_) => {
                        self.reject(field, format!("is out of range: {i}"));
                        None
                    }
                },
                None => {
                    self.reject(field, format!("must be an integer, found {n}"));
                    None
                }
            },
            _ => {
                self.reject(field, "must be an integer");
                None
            }
        }
    }
}
