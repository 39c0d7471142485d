use crate::domain::entity::data_type::DataType;
use crate::domain::entity::table::{Row, TableSchema};
use itertools::Itertools;
use std::fmt;
use thiserror::Error;

// マッピングエラーの定義
#[derive(Error, Debug, PartialEq)]
pub enum MappingError {
    #[error("Row does not match schema of table '{table}': expected columns [{expected}], got [{actual}]")]
    SchemaMismatch {
        table: String,
        expected: String,
        actual: String,
    },

    #[error("Type mismatch for column '{column}': expected {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },

    #[error("No mapping registered for type '{domain}' and table '{table}'")]
    NotRegistered { domain: String, table: String },

    #[error("Mapping for type '{domain}' and table '{table}' is already registered")]
    AlreadyRegistered { domain: String, table: String },
}

impl From<MappingError> for crate::Error {
    fn from(err: MappingError) -> Self {
        crate::Error::Mapping(err.to_string())
    }
}

/// ドメインオブジェクトを行へ変換する契約
///
/// `encode`は対象スキーマのカラム名・順序と一致した行を全域的に返すこと。
/// 契約を守るマッパーなら`encode`だけで十分だが、`encode_checked`は
/// 生成した行をスキーマに対して検証し、不正なマッパーを即座に失敗させる
pub trait RowMapper: Send + Sync {
    /// 変換元のドメイン型
    type Domain;

    /// 変換先のテーブルスキーマ
    fn schema(&self) -> &TableSchema;

    /// ドメインオブジェクトを行へ変換する
    fn encode(&self, instance: &Self::Domain) -> Row;

    /// 変換した行をスキーマに対して検証してから返す
    fn encode_checked(&self, instance: &Self::Domain) -> Result<Row, MappingError> {
        let row = self.encode(instance);
        validate_row(self.schema(), &row)?;
        Ok(row)
    }
}

/// 行がスキーマのカラム名・順序・型と一致するか検証する
pub fn validate_row(schema: &TableSchema, row: &Row) -> Result<(), MappingError> {
    let expected = schema.column_names();
    let actual = row.column_names();

    if expected != actual {
        return Err(MappingError::SchemaMismatch {
            table: schema.name().to_string(),
            expected: expected.iter().join(", "),
            actual: actual.iter().join(", "),
        });
    }

    // NULLはどのカラムにも入れられる（NOT NULL制約はスキーマに持たせていない）
    for ((_, value), column) in row.entries().iter().zip(schema.columns()) {
        if !value.is_null() && value.data_type() != column.data_type {
            return Err(MappingError::TypeMismatch {
                column: column.name.clone(),
                expected: column.data_type,
                actual: value.data_type(),
            });
        }
    }

    Ok(())
}

/// 関数でバックされたマッピング
///
/// 1つのドメイン型と1つのスキーマを純粋関数で結び付ける。
/// 定義は起動時に一度だけ、以後は不変
pub struct Mapping<T> {
    schema: TableSchema,
    encode: fn(&T) -> Row,
}

impl<T> Mapping<T> {
    pub fn new(schema: TableSchema, encode: fn(&T) -> Row) -> Self {
        Self { schema, encode }
    }
}

impl<T> RowMapper for Mapping<T> {
    type Domain = T;

    fn schema(&self) -> &TableSchema {
        &self.schema
    }

    fn encode(&self, instance: &T) -> Row {
        (self.encode)(instance)
    }
}

impl<T> Clone for Mapping<T> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            encode: self.encode,
        }
    }
}

impl<T> fmt::Debug for Mapping<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapping")
            .field("table", &self.schema.name())
            .finish_non_exhaustive()
    }
}
