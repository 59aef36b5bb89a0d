//! Vegan Business Repository

use super::{RepoError, RepoResult};
use shared::models::{VeganBusiness, VeganBusinessCreate, VeganBusinessFilter};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, submitted_by, name, category, description, city, website, \
                       contact_email, image, created_at";

pub async fn create(
    pool: &SqlitePool,
    submitted_by: &str,
    data: &VeganBusinessCreate,
    image: Option<&str>,
) -> RepoResult<VeganBusiness> {
    let sql = format!(
        "INSERT INTO vegan_businesses (submitted_by, name, category, description, city, website, \
             contact_email, image, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    );
    let business = sqlx::query_as::<_, VeganBusiness>(&sql)
        .bind(submitted_by)
        .bind(&data.name)
        .bind(data.category)
        .bind(&data.description)
        .bind(&data.city)
        .bind(&data.website)
        .bind(&data.contact_email)
        .bind(image)
        .bind(now_millis())
        .fetch_one(pool)
        .await?;
    Ok(business)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<VeganBusiness>> {
    let sql = format!("SELECT {COLUMNS} FROM vegan_businesses WHERE id = ?");
    let business = sqlx::query_as::<_, VeganBusiness>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(business)
}

pub async fn list(pool: &SqlitePool, filter: &VeganBusinessFilter) -> RepoResult<Vec<VeganBusiness>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM vegan_businesses \
         WHERE (?1 IS NULL OR category = ?1) \
           AND (?2 IS NULL OR city = ?2 COLLATE NOCASE) \
         ORDER BY name COLLATE NOCASE, id"
    );
    let list = sqlx::query_as::<_, VeganBusiness>(&sql)
        .bind(filter.category)
        .bind(filter.city.as_deref())
        .fetch_all(pool)
        .await?;
    Ok(list)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM vegan_businesses WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Vegan business {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{testing, user};
    use shared::models::VeganCategory;

    fn sample(name: &str, category: VeganCategory, city: &str) -> VeganBusinessCreate {
        VeganBusinessCreate {
            name: name.into(),
            category,
            description: None,
            city: city.into(),
            website: None,
            contact_email: None,
        }
    }

    #[tokio::test]
    async fn directory_filters() {
        let pool = testing::pool().await;
        user::provision(&pool, "fan", None, None, false).await.unwrap();
        create(&pool, "fan", &sample("Plant", VeganCategory::Restaurant, "Cape Town"), None)
            .await
            .unwrap();
        create(&pool, "fan", &sample("Nude Foods", VeganCategory::Grocery, "Cape Town"), None)
            .await
            .unwrap();
        let bakery = create(&pool, "fan", &sample("Crumbs", VeganCategory::Bakery, "Durban"), None)
            .await
            .unwrap();

        let cape = list(
            &pool,
            &VeganBusinessFilter {
                category: None,
                city: Some("CAPE TOWN".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(cape.len(), 2);
        assert_eq!(cape[0].name, "Nude Foods");

        let bakeries = list(
            &pool,
            &VeganBusinessFilter {
                category: Some(VeganCategory::Bakery),
                city: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(bakeries.len(), 1);

        delete(&pool, bakery.id).await.unwrap();
        assert!(find_by_id(&pool, bakery.id).await.unwrap().is_none());
        assert!(matches!(delete(&pool, bakery.id).await, Err(RepoError::NotFound(_))));
    }
}
