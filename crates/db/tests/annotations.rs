//! Integration tests for the annotation store.
//!
//! Exercises the repository layer against a real (in-memory) database:
//! owner stamping, search filters and ordering, owner isolation, delete
//! outcome reporting, and bulk strain lookup.

use sqlx::SqlitePool;

use annotator_db::models::annotation::{AnnotationFilter, CreateAnnotation};
use annotator_db::models::user::CreateUser;
use annotator_db::repositories::{AnnotationRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &SqlitePool, id: &str) -> String {
    UserRepo::create(
        pool,
        &CreateUser {
            id: id.to_string(),
            username: format!("user-{id}"),
            password_hash: "external".to_string(),
        },
    )
    .await
    .unwrap();
    id.to_string()
}

fn annotation(strain: &str, chrom: i64, event: &str) -> CreateAnnotation {
    CreateAnnotation {
        strain: strain.to_string(),
        chrom,
        event: event.to_string(),
        loh: "terminal".to_string(),
        transition_label: "T1".to_string(),
        bd_left: 10_000,
        bd_right: 42_000,
    }
}

fn no_filter() -> AnnotationFilter {
    AnnotationFilter::default()
}

// ---------------------------------------------------------------------------
// Insert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn insert_stamps_owner_from_principal(pool: SqlitePool) {
    let owner = seed_user(&pool, "u1").await;

    let created = AnnotationRepo::insert(&pool, &owner, &annotation("A", 1, "CON"))
        .await
        .unwrap();
    assert_eq!(created.user_id, owner);
    assert!(created.id > 0);

    let found = AnnotationRepo::search(&pool, &owner, &no_filter()).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0], created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_business_rows_are_allowed(pool: SqlitePool) {
    let owner = seed_user(&pool, "u1").await;

    let input = annotation("A", 1, "CON");
    let first = AnnotationRepo::insert(&pool, &owner, &input).await.unwrap();
    let second = AnnotationRepo::insert(&pool, &owner, &input).await.unwrap();
    assert_ne!(first.id, second.id);

    let found = AnnotationRepo::search(&pool, &owner, &no_filter()).await.unwrap();
    assert_eq!(found.len(), 2);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unfiltered_search_returns_full_set_sorted(pool: SqlitePool) {
    let owner = seed_user(&pool, "u1").await;

    // Inserted deliberately out of order on every ordering key.
    let mut inputs = vec![
        annotation("B", 2, "CON"),
        annotation("A", 16, "terDUP"),
        annotation("A", 2, "interDEL"),
        annotation("A", 2, "CON"),
    ];
    inputs[1].loh = "interstitial".to_string();
    for input in &inputs {
        AnnotationRepo::insert(&pool, &owner, input).await.unwrap();
    }

    let found = AnnotationRepo::search(&pool, &owner, &no_filter()).await.unwrap();
    let keys: Vec<_> = found
        .iter()
        .map(|a| (a.strain.clone(), a.chrom, a.event.clone()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("A".to_string(), 2, "CON".to_string()),
            ("A".to_string(), 2, "interDEL".to_string()),
            ("A".to_string(), 16, "terDUP".to_string()),
            ("B".to_string(), 2, "CON".to_string()),
        ]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn filters_are_exact_match_conjunctions(pool: SqlitePool) {
    let owner = seed_user(&pool, "u1").await;

    AnnotationRepo::insert(&pool, &owner, &annotation("A", 1, "CON")).await.unwrap();
    AnnotationRepo::insert(&pool, &owner, &annotation("A", 2, "terDEL")).await.unwrap();
    AnnotationRepo::insert(&pool, &owner, &annotation("B", 1, "CON")).await.unwrap();

    let by_strain = AnnotationRepo::search(
        &pool,
        &owner,
        &AnnotationFilter {
            strain: Some("A".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_strain.len(), 2);
    assert!(by_strain.iter().all(|a| a.strain == "A"));

    let by_chrom = AnnotationRepo::search(
        &pool,
        &owner,
        &AnnotationFilter {
            chrom: Some(1),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_chrom.len(), 2);
    assert!(by_chrom.iter().all(|a| a.chrom == 1));

    // The event filter compares against the supplied value, not truthiness.
    let by_event = AnnotationRepo::search(
        &pool,
        &owner,
        &AnnotationFilter {
            event: Some("terDEL".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_event.len(), 1);
    assert_eq!(by_event[0].event, "terDEL");

    let combined = AnnotationRepo::search(
        &pool,
        &owner,
        &AnnotationFilter {
            strain: Some("A".to_string()),
            chrom: Some(1),
            event: Some("CON".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(combined.len(), 1);

    let mismatch = AnnotationRepo::search(
        &pool,
        &owner,
        &AnnotationFilter {
            strain: Some("B".to_string()),
            chrom: Some(2),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(mismatch.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_string_filter_imposes_no_constraint(pool: SqlitePool) {
    let owner = seed_user(&pool, "u1").await;
    AnnotationRepo::insert(&pool, &owner, &annotation("A", 1, "CON")).await.unwrap();
    AnnotationRepo::insert(&pool, &owner, &annotation("B", 2, "terDEL")).await.unwrap();

    let found = AnnotationRepo::search(
        &pool,
        &owner,
        &AnnotationFilter {
            strain: Some(String::new()),
            event: Some(String::new()),
            chrom: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(found.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_is_isolated_per_owner(pool: SqlitePool) {
    let u1 = seed_user(&pool, "u1").await;
    let u2 = seed_user(&pool, "u2").await;

    AnnotationRepo::insert(&pool, &u1, &annotation("A", 1, "CON")).await.unwrap();
    AnnotationRepo::insert(&pool, &u1, &annotation("B", 1, "CON")).await.unwrap();

    let chrom_one = AnnotationRepo::search(
        &pool,
        &u1,
        &AnnotationFilter {
            chrom: Some(1),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(chrom_one.len(), 2);

    let strain_a = AnnotationRepo::search(
        &pool,
        &u1,
        &AnnotationFilter {
            strain: Some("A".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(strain_a.len(), 1);
    assert_eq!(strain_a[0].strain, "A");

    let other = AnnotationRepo::search(&pool, &u2, &no_filter()).await.unwrap();
    assert!(other.is_empty());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_by_id_reports_distinct_outcomes(pool: SqlitePool) {
    let owner = seed_user(&pool, "u1").await;
    let created = AnnotationRepo::insert(&pool, &owner, &annotation("A", 1, "CON"))
        .await
        .unwrap();

    // Nonexistent id reports not-found, twice.
    assert!(!AnnotationRepo::delete_by_id(&pool, &owner, 9999).await.unwrap());
    assert!(!AnnotationRepo::delete_by_id(&pool, &owner, 9999).await.unwrap());

    // Existing id: success, then not-found on repeat.
    assert!(AnnotationRepo::delete_by_id(&pool, &owner, created.id).await.unwrap());
    assert!(!AnnotationRepo::delete_by_id(&pool, &owner, created.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_by_id_never_touches_foreign_records(pool: SqlitePool) {
    let u1 = seed_user(&pool, "u1").await;
    let u2 = seed_user(&pool, "u2").await;
    let created = AnnotationRepo::insert(&pool, &u1, &annotation("A", 1, "CON"))
        .await
        .unwrap();

    // A globally valid id is not an authorization token.
    assert!(!AnnotationRepo::delete_by_id(&pool, &u2, created.id).await.unwrap());

    let still_there = AnnotationRepo::search(&pool, &u1, &no_filter()).await.unwrap();
    assert_eq!(still_there.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_all_is_idempotent_and_owner_scoped(pool: SqlitePool) {
    let u1 = seed_user(&pool, "u1").await;
    let u2 = seed_user(&pool, "u2").await;

    AnnotationRepo::insert(&pool, &u1, &annotation("A", 1, "CON")).await.unwrap();
    AnnotationRepo::insert(&pool, &u1, &annotation("B", 2, "terDEL")).await.unwrap();
    AnnotationRepo::insert(&pool, &u2, &annotation("A", 1, "CON")).await.unwrap();

    assert_eq!(AnnotationRepo::delete_all(&pool, &u1).await.unwrap(), 2);
    assert!(AnnotationRepo::search(&pool, &u1, &no_filter()).await.unwrap().is_empty());

    // No-op on empty still succeeds.
    assert_eq!(AnnotationRepo::delete_all(&pool, &u1).await.unwrap(), 0);

    // The other owner's records are untouched.
    let other = AnnotationRepo::search(&pool, &u2, &no_filter()).await.unwrap();
    assert_eq!(other.len(), 1);
}

// ---------------------------------------------------------------------------
// Bulk lookup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookup_by_strains_filters_membership_with_standard_order(pool: SqlitePool) {
    let owner = seed_user(&pool, "u1").await;
    let other = seed_user(&pool, "u2").await;

    AnnotationRepo::insert(&pool, &owner, &annotation("WY103#15-5", 3, "CON")).await.unwrap();
    AnnotationRepo::insert(&pool, &owner, &annotation("WY38#20-1", 1, "CON")).await.unwrap();
    AnnotationRepo::insert(&pool, &owner, &annotation("WY66#30-11", 2, "CON")).await.unwrap();
    AnnotationRepo::insert(&pool, &other, &annotation("WY38#20-1", 1, "CON")).await.unwrap();

    let strains = vec!["WY38#20-1".to_string(), "WY103#15-5".to_string()];
    let found = AnnotationRepo::lookup_by_strains(&pool, &owner, &strains)
        .await
        .unwrap();
    let names: Vec<_> = found.iter().map(|a| a.strain.as_str()).collect();
    // Standard ordering, not request order; only the owner's rows.
    assert_eq!(names, vec!["WY103#15-5", "WY38#20-1"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookup_with_empty_strain_list_is_empty(pool: SqlitePool) {
    let owner = seed_user(&pool, "u1").await;
    AnnotationRepo::insert(&pool, &owner, &annotation("A", 1, "CON")).await.unwrap();

    let found = AnnotationRepo::lookup_by_strains(&pool, &owner, &[]).await.unwrap();
    assert!(found.is_empty());
}
