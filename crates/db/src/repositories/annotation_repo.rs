//! Repository for the `annotations` table.
//!
//! All reads are owner-scoped and share one ordering:
//! `(strain, chrom, event, loh, transition_label)` ascending, which the
//! `event_group` index backs. Mutations are single atomic statements.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use annotator_core::types::{DbId, UserId};

use crate::models::annotation::{Annotation, AnnotationFilter, CreateAnnotation};

/// Column list for annotations queries.
const COLUMNS: &str = "id, strain, chrom, event, loh, transition_label, bd_left, bd_right, user_id";

/// Default result ordering for every read operation.
const ORDER_BY: &str = " ORDER BY strain, chrom, event, loh, transition_label";

/// Provides owner-scoped CRUD operations for annotation records.
pub struct AnnotationRepo;

impl AnnotationRepo {
    /// Insert a new annotation, returning the created row.
    ///
    /// The owner is always stamped from the acting principal; the DTO
    /// carries no owner field, so a caller cannot supply one. There is no
    /// uniqueness constraint on the business-key tuple: identical submits
    /// produce distinct rows.
    pub async fn insert(
        pool: &SqlitePool,
        owner: &UserId,
        input: &CreateAnnotation,
    ) -> Result<Annotation, sqlx::Error> {
        let query = format!(
            "INSERT INTO annotations
                (strain, chrom, event, loh, transition_label, bd_left, bd_right, user_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(&input.strain)
            .bind(input.chrom)
            .bind(&input.event)
            .bind(&input.loh)
            .bind(&input.transition_label)
            .bind(input.bd_left)
            .bind(input.bd_right)
            .bind(owner)
            .fetch_one(pool)
            .await
    }

    /// Search the owner's records with optional exact-match filters.
    ///
    /// Present, non-empty filters fold into a conjunctive predicate; absent
    /// ones impose no constraint. Ordering is fixed regardless of which
    /// filters were supplied.
    pub async fn search(
        pool: &SqlitePool,
        owner: &UserId,
        filter: &AnnotationFilter,
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM annotations WHERE user_id = "));
        qb.push_bind(owner);

        let text_filters = [
            ("strain", filter.strain.as_deref()),
            ("event", filter.event.as_deref()),
        ];
        for (column, value) in text_filters {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                qb.push(format!(" AND {column} = "));
                qb.push_bind(value.to_string());
            }
        }
        if let Some(chrom) = filter.chrom {
            qb.push(" AND chrom = ");
            qb.push_bind(chrom);
        }
        qb.push(ORDER_BY);

        qb.build_query_as::<Annotation>().fetch_all(pool).await
    }

    /// Delete one of the owner's records by id. Returns `false` when no
    /// such record exists for this owner; an id belonging to another owner
    /// is not an authorization token and reports not-found the same way.
    pub async fn delete_by_id(
        pool: &SqlitePool,
        owner: &UserId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM annotations WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every record belonging to the owner. Idempotent: deleting
    /// zero rows is still success. Returns the number of rows removed.
    pub async fn delete_all(pool: &SqlitePool, owner: &UserId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM annotations WHERE user_id = $1")
            .bind(owner)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Fetch the owner's records whose strain is in `strains`, with the
    /// standard ordering. An empty strain list yields an empty result.
    pub async fn lookup_by_strains(
        pool: &SqlitePool,
        owner: &UserId,
        strains: &[String],
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        if strains.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM annotations WHERE user_id = "));
        qb.push_bind(owner);
        qb.push(" AND strain IN (");
        let mut separated = qb.separated(", ");
        for strain in strains {
            separated.push_bind(strain);
        }
        separated.push_unseparated(")");
        qb.push(ORDER_BY);

        qb.build_query_as::<Annotation>().fetch_all(pool).await
    }
}
