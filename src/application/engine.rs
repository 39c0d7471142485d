use std::sync::Arc;
use tracing::debug;

use crate::domain::entity::value::Value;
use crate::domain::mapping::{MappingError, RowMapper};
use crate::infrastructure::registry::MapperRegistry;

/// ドメインオブジェクトからDML用のパラメータ列を導出する
///
/// 返り値はスキーマのカラム順に並んだ (カラム名, 値) のペア列で、
/// スキーマオブジェクトからは切り離された素の列になる
pub fn params<M: RowMapper>(
    mapper: &M,
    instance: &M::Domain,
) -> Result<Vec<(String, Value)>, MappingError> {
    let row = mapper.encode_checked(instance)?;

    debug!(
        table = mapper.schema().name(),
        columns = row.len(),
        "derived statement parameters"
    );

    Ok(row.into_entries())
}

/// 2つのバージョン間で値が変わったカラムだけを導出する
///
/// `include_primary_key`が真の場合、主キーカラムは値が変わっていなくても
/// 必ず1回だけ（`after`側の値で）出力に含まれる。
/// 両行とも`encode_checked`で検証済みのため、位置がそのままカラム対応になる
pub fn diff<M: RowMapper>(
    mapper: &M,
    before: &M::Domain,
    after: &M::Domain,
    include_primary_key: bool,
) -> Result<Vec<(String, Value)>, MappingError> {
    let row_before = mapper.encode_checked(before)?;
    let row_after = mapper.encode_checked(after)?;
    let schema = mapper.schema();

    let mut changed = Vec::new();
    for ((name, before_value), (_, after_value)) in row_before
        .into_entries()
        .into_iter()
        .zip(row_after.into_entries())
    {
        if (include_primary_key && schema.is_primary_key(&name)) || before_value != after_value {
            changed.push((name, after_value));
        }
    }

    debug!(
        table = schema.name(),
        changed = changed.len(),
        "computed column diff"
    );

    Ok(changed)
}

/// レジストリ経由でparams/diffを提供するユースケース
///
/// テーブル名とドメイン型からマッピングを解決してから各操作へ委譲する
pub struct MutationEngine {
    registry: Arc<MapperRegistry>,
}

impl MutationEngine {
    pub fn new(registry: Arc<MapperRegistry>) -> Self {
        Self { registry }
    }

    pub fn params<T: 'static>(
        &self,
        table_name: &str,
        instance: &T,
    ) -> Result<Vec<(String, Value)>, MappingError> {
        let mapping = self.registry.resolve::<T>(table_name)?;
        params(mapping.as_ref(), instance)
    }

    pub fn diff<T: 'static>(
        &self,
        table_name: &str,
        before: &T,
        after: &T,
        include_primary_key: bool,
    ) -> Result<Vec<(String, Value)>, MappingError> {
        let mapping = self.registry.resolve::<T>(table_name)?;
        diff(mapping.as_ref(), before, after, include_primary_key)
    }
}
