use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::domain::mapping::{Mapping, MappingError, RowMapper};

/// マッピングレジストリ
///
/// (ドメイン型, テーブル名) をキーに登録済みマッピングを引く。
/// 暗黙解決の代わりとなる明示的なレジストリで、起動時に登録を済ませ、
/// 以後は読み取り専用で使う。重複登録・未登録はどちらも定義時エラー
#[derive(Debug, Default)]
pub struct MapperRegistry {
    mappings: RwLock<HashMap<(TypeId, String), Arc<dyn Any + Send + Sync>>>,
}

impl MapperRegistry {
    pub fn new() -> Self {
        Self {
            mappings: RwLock::new(HashMap::new()),
        }
    }

    /// マッピングを登録する
    ///
    /// 同じ (ドメイン型, テーブル名) の組に対する2度目の登録はエラー
    pub fn register<T: 'static>(&self, mapping: Mapping<T>) -> Result<(), MappingError> {
        let mut mappings = self.mappings.write().unwrap();
        let table = mapping.schema().name().to_string();
        let key = (TypeId::of::<T>(), table.clone());

        if mappings.contains_key(&key) {
            return Err(MappingError::AlreadyRegistered {
                domain: type_name::<T>().to_string(),
                table,
            });
        }

        debug!(domain = type_name::<T>(), table = %table, "registered mapping");
        mappings.insert(key, Arc::new(mapping));
        Ok(())
    }

    /// 登録済みマッピングを取得する
    pub fn resolve<T: 'static>(&self, table_name: &str) -> Result<Arc<Mapping<T>>, MappingError> {
        let mappings = self.mappings.read().unwrap();
        let key = (TypeId::of::<T>(), table_name.to_string());

        let entry = mappings.get(&key).ok_or_else(|| MappingError::NotRegistered {
            domain: type_name::<T>().to_string(),
            table: table_name.to_string(),
        })?;

        // キーにドメイン型のTypeIdが含まれるため、ダウンキャストは常に成功する
        Arc::clone(entry)
            .downcast::<Mapping<T>>()
            .map_err(|_| MappingError::NotRegistered {
                domain: type_name::<T>().to_string(),
                table: table_name.to_string(),
            })
    }

    /// 指定の組に対するマッピングが登録済みかどうか
    pub fn is_registered<T: 'static>(&self, table_name: &str) -> bool {
        let mappings = self.mappings.read().unwrap();
        mappings.contains_key(&(TypeId::of::<T>(), table_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{Column, DataType, Row, TableSchema};

    struct User {
        id: i64,
        name: String,
    }

    struct Reaction {
        post_id: i64,
        user_id: i64,
    }

    fn users_schema() -> TableSchema {
        TableSchema::new(
            "users",
            vec![
                Column::new("id", DataType::Integer),
                Column::new("name", DataType::Text),
            ],
            vec!["id".to_string()],
        )
        .unwrap()
    }

    fn reactions_schema() -> TableSchema {
        TableSchema::new(
            "reactions",
            vec![
                Column::new("post_id", DataType::Integer),
                Column::new("user_id", DataType::Integer),
            ],
            vec!["post_id".to_string(), "user_id".to_string()],
        )
        .unwrap()
    }

    fn encode_user(user: &User) -> Row {
        let mut row = Row::new();
        row.push("id", user.id);
        row.push("name", user.name.clone());
        row
    }

    fn encode_reaction(reaction: &Reaction) -> Row {
        let mut row = Row::new();
        row.push("post_id", reaction.post_id);
        row.push("user_id", reaction.user_id);
        row
    }

    #[test]
    fn registers_and_resolves_mapping() {
        let registry = MapperRegistry::new();
        registry
            .register(Mapping::new(users_schema(), encode_user))
            .unwrap();

        let mapping = registry.resolve::<User>("users").unwrap();
        let row = mapping.encode(&User {
            id: 1,
            name: "Alice".to_string(),
        });

        assert_eq!(row.column_names(), vec!["id", "name"]);
        assert!(registry.is_registered::<User>("users"));
    }

    #[test]
    fn rejects_duplicate_registration() {
        let registry = MapperRegistry::new();
        registry
            .register(Mapping::new(users_schema(), encode_user))
            .unwrap();

        let err = registry
            .register(Mapping::new(users_schema(), encode_user))
            .unwrap_err();

        assert!(matches!(err, MappingError::AlreadyRegistered { .. }));
    }

    #[test]
    fn resolving_unregistered_pair_fails() {
        let registry = MapperRegistry::new();

        let err = registry.resolve::<User>("users").unwrap_err();
        assert_eq!(
            err,
            MappingError::NotRegistered {
                domain: std::any::type_name::<User>().to_string(),
                table: "users".to_string(),
            }
        );
    }

    // 同じテーブル名でもドメイン型が違えば別のエントリになる
    #[test]
    fn distinct_domain_types_do_not_collide() {
        let registry = MapperRegistry::new();
        registry
            .register(Mapping::new(users_schema(), encode_user))
            .unwrap();
        registry
            .register(Mapping::new(reactions_schema(), encode_reaction))
            .unwrap();

        assert!(registry.resolve::<User>("users").is_ok());
        assert!(registry.resolve::<Reaction>("reactions").is_ok());
        assert!(registry.resolve::<Reaction>("users").is_err());
    }

    #[test]
    fn same_type_may_map_to_several_tables() {
        let audit_schema = TableSchema::new(
            "users_audit",
            vec![
                Column::new("id", DataType::Integer),
                Column::new("name", DataType::Text),
            ],
            vec!["id".to_string()],
        )
        .unwrap();

        let registry = MapperRegistry::new();
        registry
            .register(Mapping::new(users_schema(), encode_user))
            .unwrap();
        registry
            .register(Mapping::new(audit_schema, encode_user))
            .unwrap();

        assert!(registry.resolve::<User>("users").is_ok());
        assert!(registry.resolve::<User>("users_audit").is_ok());
    }
}
