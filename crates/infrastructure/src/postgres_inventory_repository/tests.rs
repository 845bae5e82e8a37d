use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use stockledger_application::{
    AuditDraft, InventoryRepository, NewCategory, NewItem,
};
use stockledger_core::AppError;
use stockledger_domain::{FieldPatch, ItemUpdate, LogAction};

use super::PostgresInventoryRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres inventory tests: {error}");
    }

    Some(pool)
}

fn unique_name(prefix: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{prefix} {nanos}")
}

fn draft(action: LogAction, description: &str) -> AuditDraft {
    AuditDraft {
        action,
        item_id: None,
        category_id: None,
        quantity_change: None,
        description: description.to_owned(),
    }
}

#[tokio::test]
async fn create_item_commits_entity_and_log_in_one_transaction() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresInventoryRepository::new(pool.clone());

    let category_name = unique_name("Fasteners");
    let category = repository
        .create_category(
            NewCategory {
                name: category_name.clone(),
                description: None,
            },
            draft(
                LogAction::CreateCategory,
                &format!("Created Category: {category_name}"),
            ),
        )
        .await;
    let Ok(category) = category else {
        panic!("category create failed");
    };

    let item = repository
        .create_item(
            NewItem {
                name: "Bolt".to_owned(),
                description: "M4 bolt".to_owned(),
                quantity: 10,
                category_id: category.id(),
            },
            AuditDraft {
                category_id: Some(category.id()),
                ..draft(LogAction::CreateItem, "Created Item: Bolt")
            },
        )
        .await;
    let Ok(item) = item else {
        panic!("item create failed");
    };

    let logged = sqlx::query_as::<_, (String, String)>(
        r#"
        SELECT action, description
        FROM logs
        WHERE item_id = $1
        "#,
    )
    .bind(item.id().as_i64())
    .fetch_all(&pool)
    .await;
    let Ok(logged) = logged else {
        panic!("log lookup failed");
    };
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].0, "create_item");
    assert_eq!(logged[0].1, "Created Item: Bolt");
}

#[tokio::test]
async fn update_item_records_quantity_delta_and_refreshes_updated_at() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresInventoryRepository::new(pool.clone());

    let category_name = unique_name("Fasteners");
    let category = repository
        .create_category(
            NewCategory {
                name: category_name.clone(),
                description: None,
            },
            draft(
                LogAction::CreateCategory,
                &format!("Created Category: {category_name}"),
            ),
        )
        .await;
    let Ok(category) = category else {
        panic!("category create failed");
    };

    let item = repository
        .create_item(
            NewItem {
                name: "Bolt".to_owned(),
                description: "M4 bolt".to_owned(),
                quantity: 10,
                category_id: category.id(),
            },
            AuditDraft {
                category_id: Some(category.id()),
                ..draft(LogAction::CreateItem, "Created Item: Bolt")
            },
        )
        .await;
    let Ok(item) = item else {
        panic!("item create failed");
    };

    let plan = item.plan_update(&ItemUpdate {
        quantity: FieldPatch::Set(15),
        ..ItemUpdate::default()
    });
    let Ok(plan) = plan else {
        panic!("plan_update failed");
    };
    let (updated, changes, quantity_delta) = plan.into_parts();

    let stored = repository
        .update_item(
            updated,
            AuditDraft {
                action: LogAction::UpdateItem,
                item_id: Some(item.id()),
                category_id: Some(category.id()),
                quantity_change: quantity_delta,
                description: changes.describe(),
            },
        )
        .await;
    let Ok(stored) = stored else {
        panic!("item update failed");
    };
    assert_eq!(stored.quantity(), 15);
    assert!(stored.updated_at() >= item.updated_at());

    let delta = sqlx::query_scalar::<_, Option<i64>>(
        r#"
        SELECT quantity_change
        FROM logs
        WHERE item_id = $1 AND action = 'update_item'
        "#,
    )
    .bind(item.id().as_i64())
    .fetch_one(&pool)
    .await;
    assert_eq!(delta.ok().flatten(), Some(5));
}

#[tokio::test]
async fn delete_category_is_blocked_while_items_reference_it() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresInventoryRepository::new(pool.clone());

    let category_name = unique_name("Fasteners");
    let category = repository
        .create_category(
            NewCategory {
                name: category_name.clone(),
                description: None,
            },
            draft(
                LogAction::CreateCategory,
                &format!("Created Category: {category_name}"),
            ),
        )
        .await;
    let Ok(category) = category else {
        panic!("category create failed");
    };

    let item = repository
        .create_item(
            NewItem {
                name: "Bolt".to_owned(),
                description: "M4 bolt".to_owned(),
                quantity: 10,
                category_id: category.id(),
            },
            AuditDraft {
                category_id: Some(category.id()),
                ..draft(LogAction::CreateItem, "Created Item: Bolt")
            },
        )
        .await;
    let Ok(item) = item else {
        panic!("item create failed");
    };

    let has_items = repository.category_has_items(category.id()).await;
    assert_eq!(has_items.ok(), Some(true));

    let blocked = repository
        .delete_category(
            category.id(),
            AuditDraft {
                category_id: Some(category.id()),
                ..draft(
                    LogAction::DeleteCategory,
                    &format!("Deleted Category: {category_name}"),
                )
            },
        )
        .await;
    assert!(matches!(blocked, Err(AppError::Conflict(_))));

    // the failed delete must not have produced a log row
    let delete_logs = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT count(*)
        FROM logs
        WHERE category_id = $1 AND action = 'delete_category'
        "#,
    )
    .bind(category.id().as_i64())
    .fetch_one(&pool)
    .await;
    assert_eq!(delete_logs.ok(), Some(0));

    let removed = repository
        .delete_item(
            item.id(),
            AuditDraft {
                item_id: Some(item.id()),
                category_id: Some(category.id()),
                ..draft(LogAction::DeleteItem, "Deleted Item: Bolt")
            },
        )
        .await;
    assert!(removed.is_ok());
}

#[tokio::test]
async fn duplicate_category_name_is_a_conflict() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresInventoryRepository::new(pool);

    let category_name = unique_name("Fasteners");
    let first = repository
        .create_category(
            NewCategory {
                name: category_name.clone(),
                description: None,
            },
            draft(
                LogAction::CreateCategory,
                &format!("Created Category: {category_name}"),
            ),
        )
        .await;
    assert!(first.is_ok());

    let second = repository
        .create_category(
            NewCategory {
                name: category_name.clone(),
                description: None,
            },
            draft(
                LogAction::CreateCategory,
                &format!("Created Category: {category_name}"),
            ),
        )
        .await;
    assert!(matches!(second, Err(AppError::Conflict(_))));
}
