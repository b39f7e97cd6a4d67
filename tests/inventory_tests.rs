//! Inventory store tests: ownership scoping, partial updates, grouped
//! views, search, and the cascade rule. Runs against a live PostgreSQL
//! database via `#[sqlx::test]`.

use shoebox::auth::service::{delete_account, register};
use shoebox::db::init_schema;
use shoebox::shoes::repo::{self, NewShoe, ShoeFilter, ShoeUpdate};
use shoebox::shoes::service::{add, delete, list, list_grouped, search, update};
use shoebox::AppError;
use sqlx::PgPool;

async fn setup_user(pool: &PgPool, username: &str) -> i32 {
    init_schema(pool).await.expect("schema init");
    register(
        pool,
        username,
        &format!("{username}@example.com"),
        "Secret123!",
    )
    .await
    .expect("register")
    .id
}

fn air_max() -> NewShoe {
    NewShoe {
        brand: "Nike".into(),
        model: "Air Max".into(),
        colorway: "Black/Red".into(),
        size: 10.5,
        price: 120.0,
        image: None,
        condition: "New".into(),
    }
}

fn superstar() -> NewShoe {
    NewShoe {
        brand: "Adidas".into(),
        model: "Superstar".into(),
        colorway: "White/Black".into(),
        size: 9.0,
        price: 85.0,
        image: Some("superstar.jpg".into()),
        condition: "Used".into(),
    }
}

#[sqlx::test]
async fn add_and_list_roundtrip(pool: PgPool) {
    let user = setup_user(&pool, "alice").await;

    let added = add(&pool, user, air_max()).await.expect("add");
    assert_eq!(added.user_id, user);

    let shoes = list(&pool, user).await.expect("list");
    assert_eq!(shoes.len(), 1);
    assert_eq!(shoes[0], added);
}

#[sqlx::test]
async fn add_rejects_invalid_fields_listing_all_of_them(pool: PgPool) {
    let user = setup_user(&pool, "alice").await;

    let bad = NewShoe {
        brand: String::new(),
        size: -2.0,
        price: 0.0,
        ..air_max()
    };
    let err = add(&pool, user, bad).await.unwrap_err();
    let AppError::Validation(errs) = err else {
        panic!("expected validation error");
    };
    assert_eq!(errs.errors.len(), 3);
    assert!(list(&pool, user).await.expect("list").is_empty());
}

#[sqlx::test]
async fn listing_never_crosses_user_boundaries(pool: PgPool) {
    let alice = setup_user(&pool, "alice").await;
    let bob = setup_user(&pool, "bob").await;

    add(&pool, alice, air_max()).await.expect("add");

    assert!(list(&pool, bob).await.expect("list bob").is_empty());
    assert_eq!(list(&pool, alice).await.expect("list alice").len(), 1);
}

#[sqlx::test]
async fn update_and_delete_refuse_foreign_shoes(pool: PgPool) {
    let alice = setup_user(&pool, "alice").await;
    let bob = setup_user(&pool, "bob").await;

    let shoe = add(&pool, alice, air_max()).await.expect("add");

    let err = update(
        &pool,
        bob,
        shoe.id,
        ShoeUpdate {
            brand: Some("Stolen".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::ShoeNotFound));

    let err = delete(&pool, bob, shoe.id).await.unwrap_err();
    assert!(matches!(err, AppError::ShoeNotFound));

    // Alice's row is untouched by either attempt.
    let shoes = list(&pool, alice).await.expect("list");
    assert_eq!(shoes, vec![shoe]);
}

#[sqlx::test]
async fn update_of_nonexistent_shoe_fails(pool: PgPool) {
    let user = setup_user(&pool, "alice").await;

    let err = update(
        &pool,
        user,
        9999,
        ShoeUpdate {
            price: Some(50.0),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::ShoeNotFound));
}

#[sqlx::test]
async fn partial_update_changes_only_the_given_fields(pool: PgPool) {
    let user = setup_user(&pool, "alice").await;
    let shoe = add(&pool, user, superstar()).await.expect("add");

    let updated = update(
        &pool,
        user,
        shoe.id,
        ShoeUpdate {
            price: Some(70.0),
            condition: Some("Damaged".into()),
            ..Default::default()
        },
    )
    .await
    .expect("update");

    assert_eq!(updated.price, 70.0);
    assert_eq!(updated.condition, "Damaged");
    // Untouched fields survive.
    assert_eq!(updated.brand, shoe.brand);
    assert_eq!(updated.model, shoe.model);
    assert_eq!(updated.colorway, shoe.colorway);
    assert_eq!(updated.size, shoe.size);
    assert_eq!(updated.image, shoe.image);
}

#[sqlx::test]
async fn update_can_clear_the_image(pool: PgPool) {
    let user = setup_user(&pool, "alice").await;
    let shoe = add(&pool, user, superstar()).await.expect("add");
    assert!(shoe.image.is_some());

    let updated = update(
        &pool,
        user,
        shoe.id,
        ShoeUpdate {
            image: Some(None),
            ..Default::default()
        },
    )
    .await
    .expect("update");
    assert!(updated.image.is_none());
}

#[sqlx::test]
async fn empty_update_is_rejected(pool: PgPool) {
    let user = setup_user(&pool, "alice").await;
    let shoe = add(&pool, user, air_max()).await.expect("add");

    let err = update(&pool, user, shoe.id, ShoeUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[sqlx::test]
async fn grouped_listing_maps_brand_model_to_shoes(pool: PgPool) {
    let user = setup_user(&pool, "alice").await;

    add(&pool, user, air_max()).await.expect("add");
    add(
        &pool,
        user,
        NewShoe {
            colorway: "White/Blue".into(),
            ..air_max()
        },
    )
    .await
    .expect("add second pair");
    add(&pool, user, superstar()).await.expect("add other brand");

    let grouped = list_grouped(&pool, user).await.expect("grouped");
    assert_eq!(grouped.len(), 2);
    assert_eq!(
        grouped[&("Nike".to_string(), "Air Max".to_string())].len(),
        2
    );
    assert_eq!(
        grouped[&("Adidas".to_string(), "Superstar".to_string())].len(),
        1
    );
}

#[sqlx::test]
async fn search_matches_case_insensitive_substrings(pool: PgPool) {
    let user = setup_user(&pool, "alice").await;
    let shoe = add(&pool, user, air_max()).await.expect("add");
    add(&pool, user, superstar()).await.expect("add other");

    let hits = search(
        &pool,
        user,
        &ShoeFilter {
            brand: Some("nike".into()),
            ..Default::default()
        },
    )
    .await
    .expect("search");
    assert_eq!(hits, vec![shoe]);
}

#[sqlx::test]
async fn search_combines_filters_with_and(pool: PgPool) {
    let user = setup_user(&pool, "alice").await;
    add(&pool, user, air_max()).await.expect("add");
    add(&pool, user, superstar()).await.expect("add other");

    // Brand matches one shoe, condition the other; together nothing.
    let hits = search(
        &pool,
        user,
        &ShoeFilter {
            brand: Some("nike".into()),
            condition: Some("used".into()),
            ..Default::default()
        },
    )
    .await
    .expect("search");
    assert!(hits.is_empty());

    let hits = search(
        &pool,
        user,
        &ShoeFilter {
            brand: Some("adidas".into()),
            condition: Some("used".into()),
            size: Some(9.0),
            ..Default::default()
        },
    )
    .await
    .expect("search");
    assert_eq!(hits.len(), 1);
}

#[sqlx::test]
async fn search_with_no_filters_returns_everything(pool: PgPool) {
    let user = setup_user(&pool, "alice").await;
    add(&pool, user, air_max()).await.expect("add");
    add(&pool, user, superstar()).await.expect("add other");

    let hits = search(&pool, user, &ShoeFilter::default())
        .await
        .expect("search");
    assert_eq!(hits.len(), 2);
}

#[sqlx::test]
async fn search_treats_like_metacharacters_literally(pool: PgPool) {
    let user = setup_user(&pool, "alice").await;
    add(&pool, user, air_max()).await.expect("add");

    let hits = search(
        &pool,
        user,
        &ShoeFilter {
            brand: Some("%".into()),
            ..Default::default()
        },
    )
    .await
    .expect("search");
    assert!(hits.is_empty());
}

#[sqlx::test]
async fn search_never_crosses_user_boundaries(pool: PgPool) {
    let alice = setup_user(&pool, "alice").await;
    let bob = setup_user(&pool, "bob").await;
    add(&pool, alice, air_max()).await.expect("add");

    let hits = search(
        &pool,
        bob,
        &ShoeFilter {
            brand: Some("nike".into()),
            ..Default::default()
        },
    )
    .await
    .expect("search");
    assert!(hits.is_empty());
}

#[sqlx::test]
async fn deleting_a_user_cascades_to_their_shoes_only(pool: PgPool) {
    let alice = setup_user(&pool, "alice").await;
    let bob = setup_user(&pool, "bob").await;

    add(&pool, alice, air_max()).await.expect("add alice");
    let bobs = add(&pool, bob, superstar()).await.expect("add bob");

    delete_account(&pool, alice).await.expect("delete alice");

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shoes")
        .fetch_one(&pool)
        .await
        .expect("count shoes");
    assert_eq!(remaining, 1);
    assert_eq!(list(&pool, bob).await.expect("list bob"), vec![bobs]);
}

#[sqlx::test]
async fn drilldown_counts_group_the_collection(pool: PgPool) {
    let user = setup_user(&pool, "alice").await;
    add(&pool, user, air_max()).await.expect("add");
    add(&pool, user, air_max()).await.expect("add duplicate pair");
    add(&pool, user, superstar()).await.expect("add other brand");

    let brands = repo::brand_counts(&pool, user).await.expect("brands");
    assert_eq!(brands[0].brand, "Nike");
    assert_eq!(brands[0].quantity, 2);

    let models = repo::model_counts(&pool, user, "Nike").await.expect("models");
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].model, "Air Max");

    let variants = repo::variant_counts(&pool, user, "Nike", "Air Max")
        .await
        .expect("variants");
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0].quantity, 2);

    let found = repo::find_variant(&pool, user, "Nike", "Air Max", "Black/Red", 10.5, "New")
        .await
        .expect("find variant")
        .expect("a shoe");
    assert_eq!(found.brand, "Nike");
}

/// The example scenario from the design notes, end to end.
#[sqlx::test]
async fn register_add_search_delete_scenario(pool: PgPool) {
    init_schema(&pool).await.expect("schema init");

    let user = register(&pool, "alice", "alice@example.com", "Secret123!")
        .await
        .expect("register");

    let shoe = add(&pool, user.id, air_max()).await.expect("add");

    let hits = search(
        &pool,
        user.id,
        &ShoeFilter {
            brand: Some("nike".into()),
            ..Default::default()
        },
    )
    .await
    .expect("search");
    assert_eq!(hits, vec![shoe.clone()]);

    delete(&pool, user.id, shoe.id).await.expect("delete");
    assert!(list(&pool, user.id).await.expect("list").is_empty());
}
