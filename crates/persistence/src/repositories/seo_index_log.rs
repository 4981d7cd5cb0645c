//! SEO index log repository.
//!
//! The notifier runs its window check and its insert on one transaction, so
//! those operations take a connection rather than the pool.

use chrono::{DateTime, Utc};
use domain::models::NewSeoIndexLog;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::entities::SeoIndexLogEntity;
use crate::metrics::QueryTimer;

/// Advisory lock key serializing search-engine notifier runs.
pub const PING_LOCK_KEY: i64 = 0x5345_4f50_494e_47;

/// Repository for the append-only seo_index_logs table.
#[derive(Clone)]
pub struct SeoIndexLogRepository {
    pool: PgPool,
}

impl SeoIndexLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Transactional operations
    // =========================================================================

    /// Takes the notifier lock; released when the surrounding transaction ends.
    pub async fn acquire_ping_lock(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(PING_LOCK_KEY)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Newest row with one of `actions` created after `since`.
    pub async fn latest_since(
        conn: &mut PgConnection,
        actions: &[&str],
        since: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, sqlx::Error> {
        let timer = QueryTimer::new("latest_seo_index_log");
        let actions: Vec<String> = actions.iter().map(|a| a.to_string()).collect();
        let result = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            SELECT created_at
            FROM seo_index_logs
            WHERE action = ANY($1) AND created_at > $2
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(actions)
        .bind(since)
        .fetch_optional(conn)
        .await;
        timer.record_result(&result);
        result
    }

    /// Writes all rows in a single statement.
    pub async fn insert_batch(
        conn: &mut PgConnection,
        rows: &[NewSeoIndexLog],
    ) -> Result<u64, sqlx::Error> {
        if rows.is_empty() {
            return Ok(0);
        }
        let timer = QueryTimer::new("insert_seo_index_logs");
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO seo_index_logs (action, target_url, status_code, success, error_message) ",
        );
        builder.push_values(rows, |mut b, row| {
            b.push_bind(row.action.as_str())
                .push_bind(row.target_url.clone())
                .push_bind(row.status_code)
                .push_bind(row.success)
                .push_bind(row.error_message.clone());
        });
        let result = builder.build().execute(conn).await;
        timer.record_result(&result);
        Ok(result?.rows_affected())
    }

    // =========================================================================
    // Pool operations
    // =========================================================================

    pub async fn insert(&self, row: &NewSeoIndexLog) -> Result<(), sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        Self::insert_batch(&mut *conn, std::slice::from_ref(row)).await?;
        Ok(())
    }

    /// One page of log rows, newest first.
    ///
    /// Returns the rows and whether more exist after the last one.
    pub async fn list_page(
        &self,
        cursor: Option<(DateTime<Utc>, i64)>,
        limit: i64,
    ) -> Result<(Vec<SeoIndexLogEntity>, bool), sqlx::Error> {
        let timer = QueryTimer::new("list_seo_index_logs");

        // Fetch limit + 1 to determine if more results exist
        let fetch_limit = limit + 1;
        let (cursor_ts, cursor_id) = match cursor {
            Some((ts, id)) => (Some(ts), id),
            None => (None, i64::MAX),
        };

        let rows = sqlx::query_as::<_, SeoIndexLogEntity>(
            r#"
            SELECT id, action, target_url, status_code, success, error_message, created_at
            FROM seo_index_logs
            WHERE ($1::timestamptz IS NULL OR (created_at, id) < ($1, $2))
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(cursor_ts)
        .bind(cursor_id)
        .bind(fetch_limit)
        .fetch_all(&self.pool)
        .await?;

        timer.record();

        let has_more = rows.len() as i64 > limit;
        let mut result = rows;
        if has_more {
            result.pop();
        }

        Ok((result, has_more))
    }

    /// Deletes rows created before `cutoff`. Returns the number removed.
    pub async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_old_seo_index_logs");
        let result = sqlx::query("DELETE FROM seo_index_logs WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await;
        timer.record_result(&result);
        Ok(result?.rows_affected())
    }
}
