use itertools::Itertools;
use std::sync::Arc;

use rowdelta::application::MutationEngine;
use rowdelta::domain::entity::{Column, DataType, Row, TableSchema};
use rowdelta::domain::mapping::Mapping;
use rowdelta::infrastructure::registry::MapperRegistry;

/// デモ用のドメイン型
struct User {
    id: i64,
    name: String,
}

fn encode_user(user: &User) -> Row {
    let mut row = Row::new();
    row.push("id", user.id);
    row.push("name", user.name.clone());
    row
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== rowdelta 基本動作チェック ===\n");

    // 1. スキーマ定義
    println!("1. スキーマの定義");
    let schema = TableSchema::new(
        "users",
        vec![
            Column::new("id", DataType::Integer),
            Column::new("name", DataType::Text),
        ],
        vec!["id".to_string()],
    )?;
    for column in schema.columns() {
        println!("  {}", column);
    }
    println!("テーブル 'users' を定義しました\n");

    // 2. マッピング登録
    println!("2. マッピングの登録");
    let registry = Arc::new(MapperRegistry::new());
    registry.register(Mapping::new(schema.clone(), encode_user))?;
    let engine = MutationEngine::new(registry);
    println!("User -> users のマッピングを登録しました\n");

    // 3. params から INSERT 文を組み立てる（組み立て自体は呼び出し側の責務）
    println!("3. INSERT パラメータの導出");
    let before = User {
        id: 0,
        name: "Adam".to_string(),
    };
    let params = engine.params("users", &before)?;

    let insert = format!(
        "INSERT INTO users ({}) VALUES ({})",
        params.iter().map(|(name, _)| name.as_str()).join(", "),
        params.iter().map(|_| "?").join(", "),
    );
    println!("SQL: {}", insert);
    for (name, value) in &params {
        println!("  {} = {}", name, value);
    }
    println!();

    // 4. diff から UPDATE 文を組み立てる
    println!("4. 変更カラムの導出");
    let after = User {
        id: 0,
        name: "A.D.".to_string(),
    };
    let changed = engine.diff("users", &before, &after, false)?;

    let update = format!(
        "UPDATE users SET {} WHERE {}",
        changed.iter().map(|(name, _)| format!("{} = ?", name)).join(", "),
        schema
            .primary_key()
            .iter()
            .map(|key| format!("{} = ?", key))
            .join(" AND "),
    );
    println!("SQL: {}", update);
    println!("変更されたカラム: {}行\n", changed.len());

    // 5. 主キーを含めた diff（値が変わっていなくても主キーは必ず含まれる）
    println!("5. 主キー込みの diff");
    let with_key = engine.diff("users", &before, &after, true)?;
    for (name, value) in &with_key {
        println!("  {} = {}", name, value);
    }
    println!();

    // 6. パラメータ列をJSONとして送る場合
    println!("6. JSONペイロード");
    println!("{}", serde_json::to_string_pretty(&with_key)?);
    println!();

    // 7. 不正なスキーマ定義は定義時に弾かれる
    println!("7. 不正な主キー宣言の確認");
    let invalid = TableSchema::new(
        "reactions",
        vec![
            Column::new("post_id", DataType::Integer),
            Column::new("user_id", DataType::Integer),
        ],
        vec!["id".to_string(), "user_id".to_string()],
    );
    match invalid {
        Err(e) => println!("期待通りのエラー: {}", e),
        Ok(_) => println!("ここには来ないはず"),
    }

    println!("\nチェック完了！");

    Ok(())
}
