use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// カラムで宣言できるデータ型
///
/// 表記はSQL風の綴りに揃える（`FromStr`は別名綴りも受け付ける）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum DataType {
    #[strum(to_string = "INTEGER", serialize = "INT")]
    Integer,

    #[strum(to_string = "FLOAT", serialize = "REAL", serialize = "DOUBLE")]
    Float,

    #[strum(to_string = "TEXT", serialize = "VARCHAR", serialize = "CHAR", serialize = "STRING")]
    Text,

    #[strum(to_string = "BOOLEAN", serialize = "BOOL")]
    Boolean,

    #[strum(to_string = "TIMESTAMP", serialize = "DATETIME")]
    Timestamp,

    #[strum(to_string = "NULL")]
    Null,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use test_case::test_case;

    #[test_case("INTEGER", DataType::Integer)]
    #[test_case("int", DataType::Integer)]
    #[test_case("FLOAT", DataType::Float)]
    #[test_case("double", DataType::Float)]
    #[test_case("varchar", DataType::Text)]
    #[test_case("STRING", DataType::Text)]
    #[test_case("bool", DataType::Boolean)]
    #[test_case("DATETIME", DataType::Timestamp)]
    #[test_case("null", DataType::Null)]
    fn parses_sql_spellings(input: &str, expected: DataType) {
        assert_eq!(DataType::from_str(input).unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_spelling() {
        assert!(DataType::from_str("BLOB").is_err());
    }

    #[test]
    fn displays_canonical_spelling() {
        assert_eq!(DataType::Integer.to_string(), "INTEGER");
        assert_eq!(DataType::Text.to_string(), "TEXT");
        assert_eq!(DataType::Timestamp.to_string(), "TIMESTAMP");
    }
}
