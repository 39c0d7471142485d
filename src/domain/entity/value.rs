use crate::domain::entity::data_type::DataType;
use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// カラムに入る値の表現
///
/// 等値比較は各バリアントの素の比較に従う
/// （`Float`は`f64`の比較なので `NaN != NaN` になる点に注意）
#[derive(Debug, Clone, PartialEq, Display, Serialize, Deserialize)]
pub enum Value {
    #[display(fmt = "{}", _0)]
    Integer(i64),

    #[display(fmt = "{}", _0)]
    Float(f64),

    #[display(fmt = "{}", _0)]
    Text(String),

    #[display(fmt = "{}", _0)]
    Boolean(bool),

    #[display(fmt = "{}", _0)]
    Timestamp(DateTime<Utc>),

    #[display(fmt = "NULL")]
    Null,
}

impl Value {
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Integer(_) => DataType::Integer,
            Value::Float(_) => DataType::Float,
            Value::Text(_) => DataType::Text,
            Value::Boolean(_) => DataType::Boolean,
            Value::Timestamp(_) => DataType::Timestamp,
            Value::Null => DataType::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<i64> for Value {
    fn from(val: i64) -> Self {
        Value::Integer(val)
    }
}
impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Value::Float(val)
    }
}
impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::Text(val)
    }
}
impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::Text(val.to_string())
    }
}
impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Boolean(val)
    }
}
impl From<DateTime<Utc>> for Value {
    fn from(val: DateTime<Utc>) -> Self {
        Value::Timestamp(val)
    }
}
