use serde_json::Value;

/// A single value or a list of values, normalized to a list at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Flattens into a list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Many(values)
    }
}

/// A JSON array is taken as the list; any other value as a single item.
impl From<Value> for OneOrMany<Value> {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(values) => Self::Many(values),
            other => Self::One(other),
        }
    }
}
