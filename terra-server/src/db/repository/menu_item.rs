//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::{MenuItem, MenuItemCreate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, accommodation_id, name, description, price, category, is_vegan, \
                       is_vegetarian, is_gluten_free, image, is_available, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("SELECT {COLUMNS} FROM menu_items WHERE id = ?");
    let item = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

pub async fn find_by_accommodation(
    pool: &SqlitePool,
    accommodation_id: i64,
    only_available: bool,
) -> RepoResult<Vec<MenuItem>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM menu_items \
         WHERE accommodation_id = ? AND (? = 0 OR is_available = 1) \
         ORDER BY category, name"
    );
    let items = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(accommodation_id)
        .bind(only_available)
        .fetch_all(pool)
        .await?;
    Ok(items)
}

pub async fn create(
    pool: &SqlitePool,
    accommodation_id: i64,
    data: &MenuItemCreate,
    image: Option<&str>,
) -> RepoResult<MenuItem> {
    let sql = format!(
        "INSERT INTO menu_items (accommodation_id, name, description, price, category, is_vegan, \
             is_vegetarian, is_gluten_free, image, is_available, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?) RETURNING {COLUMNS}"
    );
    let item = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(accommodation_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.category)
        .bind(data.is_vegan)
        // vegan implies vegetarian
        .bind(data.is_vegetarian || data.is_vegan)
        .bind(data.is_gluten_free)
        .bind(image)
        .bind(now_millis())
        .fetch_one(pool)
        .await?;
    Ok(item)
}

pub async fn set_availability(
    pool: &SqlitePool,
    id: i64,
    is_available: bool,
) -> RepoResult<MenuItem> {
    let sql = format!("UPDATE menu_items SET is_available = ? WHERE id = ? RETURNING {COLUMNS}");
    sqlx::query_as::<_, MenuItem>(&sql)
        .bind(is_available)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM menu_items WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{accommodation, testing, user};
    use shared::models::{MenuCategory, PropertyType};

    #[tokio::test]
    async fn create_list_delete() {
        let pool = testing::pool().await;
        user::provision(&pool, "chef", None, None, false).await.unwrap();
        let acc = accommodation::create(
            &pool,
            "chef",
            &accommodation::tests::sample(PropertyType::VeganRestaurant),
        )
        .await
        .unwrap();

        let data = MenuItemCreate {
            name: "Bunny chow".into(),
            description: Some("Bean curry in a loaf".into()),
            price: 95.0,
            category: MenuCategory::Main,
            is_vegan: true,
            is_vegetarian: false,
            is_gluten_free: false,
        };
        let item = create(&pool, acc.id, &data, Some("/uploads/menu/x.png"))
            .await
            .unwrap();
        assert!(item.is_vegan);
        assert!(item.is_vegetarian);
        assert_eq!(item.image.as_deref(), Some("/uploads/menu/x.png"));

        set_availability(&pool, item.id, false).await.unwrap();
        assert!(find_by_accommodation(&pool, acc.id, true).await.unwrap().is_empty());
        assert_eq!(find_by_accommodation(&pool, acc.id, false).await.unwrap().len(), 1);

        delete(&pool, item.id).await.unwrap();
        assert!(find_by_id(&pool, item.id).await.unwrap().is_none());
    }
}
