//! Ownership-scoped queries over the `shoes` table. Every query takes
//! `user_id` as its first parameter and filters on it; no operation can
//! reach a row owned by another user.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

const SHOE_COLUMNS: &str = "id, user_id, brand, model, colorway, size, price, image, condition";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Shoe {
    pub id: i32,
    pub user_id: i32,
    pub brand: String,
    pub model: String,
    pub colorway: String,
    pub size: f64,
    pub price: f64,
    pub image: Option<String>,
    pub condition: String,
}

#[derive(Debug, Clone)]
pub struct NewShoe {
    pub brand: String,
    pub model: String,
    pub colorway: String,
    pub size: f64,
    pub price: f64,
    pub image: Option<String>,
    pub condition: String,
}

/// Partial update. `None` leaves a field untouched; for `image`,
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct ShoeUpdate {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub colorway: Option<String>,
    pub size: Option<f64>,
    pub price: Option<f64>,
    pub image: Option<Option<String>>,
    pub condition: Option<String>,
}

impl ShoeUpdate {
    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.model.is_none()
            && self.colorway.is_none()
            && self.size.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.condition.is_none()
    }
}

/// Search filters; absent fields are unconstrained, present ones are
/// AND-combined. Text fields match as case-insensitive substrings.
#[derive(Debug, Clone, Default)]
pub struct ShoeFilter {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub colorway: Option<String>,
    pub size: Option<f64>,
    pub condition: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct BrandCount {
    pub brand: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct ModelCount {
    pub model: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct VariantCount {
    pub colorway: String,
    pub size: f64,
    pub condition: String,
    pub quantity: i64,
}

/// Escape LIKE/ILIKE metacharacters so filter text matches literally.
pub(crate) fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub async fn insert(db: &PgPool, user_id: i32, shoe: &NewShoe) -> Result<Shoe, sqlx::Error> {
    sqlx::query_as::<_, Shoe>(&format!(
        r#"
        INSERT INTO shoes (user_id, brand, model, colorway, size, price, image, condition)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {SHOE_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&shoe.brand)
    .bind(&shoe.model)
    .bind(&shoe.colorway)
    .bind(shoe.size)
    .bind(shoe.price)
    .bind(&shoe.image)
    .bind(&shoe.condition)
    .fetch_one(db)
    .await
}

pub async fn list_by_user(db: &PgPool, user_id: i32) -> Result<Vec<Shoe>, sqlx::Error> {
    sqlx::query_as::<_, Shoe>(&format!(
        r#"
        SELECT {SHOE_COLUMNS}
        FROM shoes
        WHERE user_id = $1
        ORDER BY brand ASC, model ASC, id ASC
        "#
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn search(
    db: &PgPool,
    user_id: i32,
    filter: &ShoeFilter,
) -> Result<Vec<Shoe>, sqlx::Error> {
    let pattern = |f: &Option<String>| f.as_deref().map(escape_like);

    sqlx::query_as::<_, Shoe>(&format!(
        r#"
        SELECT {SHOE_COLUMNS}
        FROM shoes
        WHERE user_id = $1
          AND ($2::text IS NULL OR brand ILIKE '%' || $2 || '%')
          AND ($3::text IS NULL OR model ILIKE '%' || $3 || '%')
          AND ($4::text IS NULL OR colorway ILIKE '%' || $4 || '%')
          AND ($5::double precision IS NULL OR size = $5)
          AND ($6::text IS NULL OR condition ILIKE '%' || $6 || '%')
        ORDER BY brand ASC, model ASC, id ASC
        "#
    ))
    .bind(user_id)
    .bind(pattern(&filter.brand))
    .bind(pattern(&filter.model))
    .bind(pattern(&filter.colorway))
    .bind(filter.size)
    .bind(pattern(&filter.condition))
    .fetch_all(db)
    .await
}

/// Partial update with an ownership guard in the WHERE clause. Returns
/// `None` when no row matched, whether the shoe is missing or owned by
/// someone else.
pub async fn update(
    db: &PgPool,
    user_id: i32,
    shoe_id: i32,
    changes: &ShoeUpdate,
) -> Result<Option<Shoe>, sqlx::Error> {
    let (set_image, image) = match &changes.image {
        Some(value) => (true, value.clone()),
        None => (false, None),
    };

    sqlx::query_as::<_, Shoe>(&format!(
        r#"
        UPDATE shoes SET
            brand = COALESCE($3, brand),
            model = COALESCE($4, model),
            colorway = COALESCE($5, colorway),
            size = COALESCE($6, size),
            price = COALESCE($7, price),
            condition = COALESCE($8, condition),
            image = CASE WHEN $9 THEN $10 ELSE image END
        WHERE user_id = $1 AND id = $2
        RETURNING {SHOE_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(shoe_id)
    .bind(&changes.brand)
    .bind(&changes.model)
    .bind(&changes.colorway)
    .bind(changes.size)
    .bind(changes.price)
    .bind(&changes.condition)
    .bind(set_image)
    .bind(image)
    .fetch_optional(db)
    .await
}

/// Delete with the same ownership guard; `false` when nothing matched.
pub async fn delete(db: &PgPool, user_id: i32, shoe_id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM shoes WHERE user_id = $1 AND id = $2")
        .bind(user_id)
        .bind(shoe_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Brands carried by the user with pair counts, busiest first.
pub async fn brand_counts(db: &PgPool, user_id: i32) -> Result<Vec<BrandCount>, sqlx::Error> {
    sqlx::query_as::<_, BrandCount>(
        r#"
        SELECT brand, COUNT(*) AS quantity
        FROM shoes
        WHERE user_id = $1
        GROUP BY brand
        ORDER BY quantity DESC, brand ASC
        LIMIT 20
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn model_counts(
    db: &PgPool,
    user_id: i32,
    brand: &str,
) -> Result<Vec<ModelCount>, sqlx::Error> {
    sqlx::query_as::<_, ModelCount>(
        r#"
        SELECT model, COUNT(*) AS quantity
        FROM shoes
        WHERE user_id = $1 AND brand = $2
        GROUP BY model
        ORDER BY quantity DESC, model ASC
        LIMIT 20
        "#,
    )
    .bind(user_id)
    .bind(brand)
    .fetch_all(db)
    .await
}

/// (colorway, size, condition) variants within one brand/model.
pub async fn variant_counts(
    db: &PgPool,
    user_id: i32,
    brand: &str,
    model: &str,
) -> Result<Vec<VariantCount>, sqlx::Error> {
    sqlx::query_as::<_, VariantCount>(
        r#"
        SELECT colorway, size, condition, COUNT(*) AS quantity
        FROM shoes
        WHERE user_id = $1 AND brand = $2 AND model = $3
        GROUP BY colorway, size, condition
        ORDER BY quantity DESC, colorway ASC, size ASC, condition ASC
        LIMIT 50
        "#,
    )
    .bind(user_id)
    .bind(brand)
    .bind(model)
    .fetch_all(db)
    .await
}

/// Lowest-id shoe matching an exact variant selection.
pub async fn find_variant(
    db: &PgPool,
    user_id: i32,
    brand: &str,
    model: &str,
    colorway: &str,
    size: f64,
    condition: &str,
) -> Result<Option<Shoe>, sqlx::Error> {
    sqlx::query_as::<_, Shoe>(&format!(
        r#"
        SELECT {SHOE_COLUMNS}
        FROM shoes
        WHERE user_id = $1
          AND brand = $2
          AND model = $3
          AND colorway = $4
          AND size = $5
          AND condition = $6
        ORDER BY id ASC
        LIMIT 1
        "#
    ))
    .bind(user_id)
    .bind(brand)
    .bind(model)
    .bind(colorway)
    .bind(size)
    .bind(condition)
    .fetch_optional(db)
    .await
}
