use crate::domain::entity::column::Column;
use crate::domain::entity::value::Value;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("Primary key column '{column}' is not declared in table '{table}'")]
    InvalidPrimaryKey { table: String, column: String },

    #[error("Column '{0}' already exists in table")]
    DuplicateColumn(String),

    #[error("Table must have at least one column")]
    NoColumns,
}

impl From<SchemaError> for crate::Error {
    fn from(err: SchemaError) -> Self {
        crate::Error::Schema(err.to_string())
    }
}

/// テーブルスキーマ
///
/// カラム列は順序が意味を持つ。主キーはカラム名のリストとして宣言し、
/// 宣言済みカラムの部分集合であることを構築時に検証する。
/// 構築後は不変（フィールドは非公開、アクセサのみ）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    // table name
    name: String,

    // table columns
    columns: Vec<Column>,

    // primary key column names
    primary_key: Vec<String>,
}

impl TableSchema {
    /// スキーマを構築する
    ///
    /// カラムが空、カラム名が重複、主キー名が未宣言カラムを指す、の
    /// いずれかの場合は定義時エラーを返す
    pub fn new(
        name: impl Into<String>,
        columns: Vec<Column>,
        primary_key: Vec<String>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();

        if columns.is_empty() {
            return Err(SchemaError::NoColumns);
        }

        if let Some(duplicate) = columns.iter().map(|c| &c.name).duplicates().next() {
            return Err(SchemaError::DuplicateColumn(duplicate.clone()));
        }

        for key in &primary_key {
            if !columns.iter().any(|c| &c.name == key) {
                return Err(SchemaError::InvalidPrimaryKey {
                    table: name.clone(),
                    column: key.clone(),
                });
            }
        }

        Ok(Self {
            name,
            columns,
            primary_key,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 宣言順のカラム列を返す
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    /// 指定カラムが主キーに含まれるかどうか
    pub fn is_primary_key(&self, column_name: &str) -> bool {
        self.primary_key.iter().any(|k| k == column_name)
    }

    /// 名前でカラムを検索する
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// カラム名のリストを宣言順で取得する
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// 1行分のデータ
///
/// スキーマのカラム順と一致させるため、マップではなく順序付きの
/// (カラム名, 値) ペア列で保持する
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    entries: Vec<(String, Value)>,
}

impl Row {
    /// 新しい空の行を作成する
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// (カラム名, 値) ペアの列から行を作成する
    pub fn from_entries(entries: Vec<(String, Value)>) -> Self {
        Self { entries }
    }

    /// 行末尾にエントリを追加する（順序はスキーマのカラム順に合わせること）
    pub fn push(&mut self, column_name: impl Into<String>, value: impl Into<Value>) {
        self.entries.push((column_name.into(), value.into()));
    }

    /// 特定のカラムの値を取得する
    pub fn get(&self, column_name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == column_name)
            .map(|(_, value)| value)
    }

    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(String, Value)> {
        self.entries
    }

    /// エントリのカラム名を保持順で取得する
    pub fn column_names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
