//! Accommodation Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Accommodation, AccommodationCreate, AccommodationFilter, AccommodationUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, owner_id, property_type, name, description, email, phone, address, \
                       city, province, amenities, certifications, accepts_terms, \
                       marketing_consent, created_at, updated_at";

fn to_json(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Accommodation>> {
    let sql = format!("SELECT {COLUMNS} FROM accommodations WHERE id = ?");
    let acc = sqlx::query_as::<_, Accommodation>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(acc)
}

pub async fn find_by_owner(pool: &SqlitePool, owner_id: &str) -> RepoResult<Option<Accommodation>> {
    let sql = format!("SELECT {COLUMNS} FROM accommodations WHERE owner_id = ?");
    let acc = sqlx::query_as::<_, Accommodation>(&sql)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;
    Ok(acc)
}

/// Public listing, newest first
pub async fn list(pool: &SqlitePool, filter: &AccommodationFilter) -> RepoResult<Vec<Accommodation>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM accommodations \
         WHERE (?1 IS NULL OR property_type = ?1) \
           AND (?2 IS NULL OR city = ?2 COLLATE NOCASE) \
         ORDER BY created_at DESC, id DESC"
    );
    let list = sqlx::query_as::<_, Accommodation>(&sql)
        .bind(filter.property_type)
        .bind(filter.city.as_deref())
        .fetch_all(pool)
        .await?;
    Ok(list)
}

/// Register the owner's accommodation and promote a plain user to owner.
///
/// Both writes share one transaction. A second registration by the same
/// owner hits the UNIQUE(owner_id) constraint.
pub async fn create(
    pool: &SqlitePool,
    owner_id: &str,
    data: &AccommodationCreate,
) -> RepoResult<Accommodation> {
    let now = now_millis();
    let mut tx = pool.begin().await?;

    let sql = format!(
        "INSERT INTO accommodations (owner_id, property_type, name, description, email, phone, \
             address, city, province, amenities, certifications, accepts_terms, \
             marketing_consent, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    );
    let acc = sqlx::query_as::<_, Accommodation>(&sql)
        .bind(owner_id)
        .bind(data.property_type)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.province)
        .bind(to_json(&data.amenities))
        .bind(to_json(&data.certifications))
        .bind(data.accepts_terms)
        .bind(data.marketing_consent)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match RepoError::from(e) {
            RepoError::Duplicate(_) => RepoError::Business(
                ErrorCode::AccommodationAlreadyRegistered,
                "You have already registered an accommodation".into(),
            ),
            other => other,
        })?;

    sqlx::query("UPDATE users SET role = 'owner' WHERE id = ? AND role = 'user'")
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(acc)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &AccommodationUpdate,
) -> RepoResult<Accommodation> {
    let amenities = data.amenities.as_deref().map(to_json);
    let certifications = data.certifications.as_deref().map(to_json);

    let sql = format!(
        "UPDATE accommodations SET \
             name = COALESCE(?1, name), \
             description = COALESCE(?2, description), \
             email = COALESCE(?3, email), \
             phone = COALESCE(?4, phone), \
             address = COALESCE(?5, address), \
             city = COALESCE(?6, city), \
             province = COALESCE(?7, province), \
             amenities = COALESCE(?8, amenities), \
             certifications = COALESCE(?9, certifications), \
             marketing_consent = COALESCE(?10, marketing_consent), \
             updated_at = ?11 \
         WHERE id = ?12 RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, Accommodation>(&sql)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.province)
        .bind(amenities)
        .bind(certifications)
        .bind(data.marketing_consent)
        .bind(now_millis())
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Accommodation {id} not found")))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::repository::{testing, user};
    use shared::models::{PropertyType, Role};

    pub(crate) fn sample(property_type: PropertyType) -> AccommodationCreate {
        AccommodationCreate {
            property_type,
            name: "Karoo Eco Lodge".into(),
            description: Some("Off-grid lodge".into()),
            email: "stay@karoo.test".into(),
            phone: None,
            address: None,
            city: Some("Prince Albert".into()),
            province: Some("Western Cape".into()),
            amenities: vec!["solar".into(), "borehole".into()],
            certifications: vec![],
            accepts_terms: true,
            marketing_consent: false,
        }
    }

    #[tokio::test]
    async fn create_promotes_user_to_owner() {
        let pool = testing::pool().await;
        user::provision(&pool, "owner_a", None, None, false).await.unwrap();

        let acc = create(&pool, "owner_a", &sample(PropertyType::Lodge)).await.unwrap();
        assert_eq!(acc.owner_id, "owner_a");
        assert_eq!(acc.amenities, vec!["solar", "borehole"]);

        let owner = user::find_by_id(&pool, "owner_a").await.unwrap().unwrap();
        assert_eq!(owner.role, Role::Owner);
    }

    #[tokio::test]
    async fn create_keeps_admin_role() {
        let pool = testing::pool().await;
        user::provision(&pool, "admin_a", None, None, true).await.unwrap();
        create(&pool, "admin_a", &sample(PropertyType::Cafe)).await.unwrap();

        let admin = user::find_by_id(&pool, "admin_a").await.unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
    }

    #[tokio::test]
    async fn second_registration_is_rejected() {
        let pool = testing::pool().await;
        user::provision(&pool, "owner_b", None, None, false).await.unwrap();
        create(&pool, "owner_b", &sample(PropertyType::Hotel)).await.unwrap();

        let err = create(&pool, "owner_b", &sample(PropertyType::Hotel))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::Business(ErrorCode::AccommodationAlreadyRegistered, _)
        ));
    }

    #[tokio::test]
    async fn list_filters_by_type_and_city() {
        let pool = testing::pool().await;
        for (owner, kind, city) in [
            ("o1", PropertyType::Lodge, "Prince Albert"),
            ("o2", PropertyType::Restaurant, "Cape Town"),
            ("o3", PropertyType::Lodge, "Cape Town"),
        ] {
            user::provision(&pool, owner, None, None, false).await.unwrap();
            let mut data = sample(kind);
            data.city = Some(city.into());
            create(&pool, owner, &data).await.unwrap();
        }

        let all = list(&pool, &AccommodationFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let lodges = list(
            &pool,
            &AccommodationFilter {
                property_type: Some(PropertyType::Lodge),
                city: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(lodges.len(), 2);

        let cape_lodges = list(
            &pool,
            &AccommodationFilter {
                property_type: Some(PropertyType::Lodge),
                city: Some("cape town".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(cape_lodges.len(), 1);
        assert_eq!(cape_lodges[0].owner_id, "o3");
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() {
        let pool = testing::pool().await;
        user::provision(&pool, "owner_c", None, None, false).await.unwrap();
        let acc = create(&pool, "owner_c", &sample(PropertyType::EcoCabin)).await.unwrap();

        let updated = update(
            &pool,
            acc.id,
            &AccommodationUpdate {
                name: Some("Karoo Cabins".into()),
                amenities: Some(vec!["composting toilets".into()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Karoo Cabins");
        assert_eq!(updated.amenities, vec!["composting toilets"]);
        assert_eq!(updated.email, acc.email);
        assert_eq!(updated.property_type, PropertyType::EcoCabin);

        assert!(matches!(
            update(&pool, 9999, &AccommodationUpdate::default()).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
