//! Inventory store: validated, ownership-scoped operations over a
//! user's shoe collection.

use std::collections::BTreeMap;

use sqlx::PgPool;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::shoes::repo::{self, NewShoe, Shoe, ShoeFilter, ShoeUpdate};
use crate::validation::{validate_new_shoe, validate_shoe_update};

#[instrument(skip(db, shoe))]
pub async fn add(db: &PgPool, user_id: i32, shoe: NewShoe) -> Result<Shoe, AppError> {
    validate_new_shoe(&shoe)?;
    let shoe = repo::insert(db, user_id, &shoe).await?;
    info!(user_id, shoe_id = shoe.id, "shoe added");
    Ok(shoe)
}

#[instrument(skip(db))]
pub async fn list(db: &PgPool, user_id: i32) -> Result<Vec<Shoe>, AppError> {
    Ok(repo::list_by_user(db, user_id).await?)
}

/// The whole collection keyed by (brand, model). A single ordered scan
/// over the composite index, grouped here.
#[instrument(skip(db))]
pub async fn list_grouped(
    db: &PgPool,
    user_id: i32,
) -> Result<BTreeMap<(String, String), Vec<Shoe>>, AppError> {
    let mut grouped: BTreeMap<(String, String), Vec<Shoe>> = BTreeMap::new();
    for shoe in repo::list_by_user(db, user_id).await? {
        grouped
            .entry((shoe.brand.clone(), shoe.model.clone()))
            .or_default()
            .push(shoe);
    }
    Ok(grouped)
}

#[instrument(skip(db, filter))]
pub async fn search(
    db: &PgPool,
    user_id: i32,
    filter: &ShoeFilter,
) -> Result<Vec<Shoe>, AppError> {
    Ok(repo::search(db, user_id, filter).await?)
}

#[instrument(skip(db, changes))]
pub async fn update(
    db: &PgPool,
    user_id: i32,
    shoe_id: i32,
    changes: ShoeUpdate,
) -> Result<Shoe, AppError> {
    validate_shoe_update(&changes)?;
    let shoe = repo::update(db, user_id, shoe_id, &changes)
        .await?
        .ok_or(AppError::ShoeNotFound)?;
    info!(user_id, shoe_id, "shoe updated");
    Ok(shoe)
}

#[instrument(skip(db))]
pub async fn delete(db: &PgPool, user_id: i32, shoe_id: i32) -> Result<(), AppError> {
    if !repo::delete(db, user_id, shoe_id).await? {
        return Err(AppError::ShoeNotFound);
    }
    info!(user_id, shoe_id, "shoe deleted");
    Ok(())
}
