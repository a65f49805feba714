use sqlx::SqlitePool;

use crate::db::models::{Question, SentQuestion};

/// Record a delivery. Re-sending a recycled question bumps its send count
/// instead of inserting a duplicate history row.
pub async fn record(
    pool: &SqlitePool,
    guild_id: i64,
    pack_id: i64,
    question_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO sent_questions (guild_id, pack_id, question_id)
        VALUES (?, ?, ?)
        ON CONFLICT (guild_id, pack_id, question_id)
        DO UPDATE SET send_count = send_count + 1, sent_at = CURRENT_TIMESTAMP
        "#
    )
    .bind(guild_id)
    .bind(pack_id)
    .bind(question_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// This guild's send history for a pack
pub async fn history(
    pool: &SqlitePool,
    guild_id: i64,
    pack_id: i64,
) -> Result<Vec<SentQuestion>, sqlx::Error> {
    sqlx::query_as::<_, SentQuestion>(
        r#"
        SELECT * FROM sent_questions
        WHERE guild_id = ? AND pack_id = ?
        ORDER BY sent_at
        "#
    )
    .bind(guild_id)
    .bind(pack_id)
    .fetch_all(pool)
    .await
}

/// Uniform-random question from the pack that this guild has never received
pub async fn random_unsent(
    pool: &SqlitePool,
    guild_id: i64,
    pack_id: i64,
) -> Result<Option<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT q.*
        FROM questions q
        LEFT JOIN sent_questions s
          ON s.question_id = q.question_id AND s.guild_id = ? AND s.pack_id = q.pack_id
        WHERE q.pack_id = ? AND s.question_id IS NULL
        ORDER BY RANDOM()
        LIMIT 1
        "#
    )
    .bind(guild_id)
    .bind(pack_id)
    .fetch_optional(pool)
    .await
}

/// Question with the fewest deliveries to this guild, ties broken randomly.
/// Used once the unsent pool is exhausted.
pub async fn least_sent(
    pool: &SqlitePool,
    guild_id: i64,
    pack_id: i64,
) -> Result<Option<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT q.*
        FROM questions q
        LEFT JOIN sent_questions s
          ON s.question_id = q.question_id AND s.guild_id = ? AND s.pack_id = q.pack_id
        WHERE q.pack_id = ?
        ORDER BY COALESCE(s.send_count, 0) ASC, RANDOM()
        LIMIT 1
        "#
    )
    .bind(guild_id)
    .bind(pack_id)
    .fetch_optional(pool)
    .await
}

/// Operator-triggered rotation reset for one guild and pack
pub async fn reset(
    pool: &SqlitePool,
    guild_id: i64,
    pack_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM sent_questions WHERE guild_id = ? AND pack_id = ?"
    )
    .bind(guild_id)
    .bind(pack_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::test_pool;
    use crate::db::queries::{pack, question};

    #[tokio::test]
    async fn record_twice_bumps_send_count() {
        let pool = test_pool().await;
        let p = pack::create(&pool, 1, "misc").await.unwrap().unwrap();
        let q = question::add(&pool, p.pack_id, "hello", None).await.unwrap();

        record(&pool, 1, p.pack_id, q.question_id).await.unwrap();
        record(&pool, 1, p.pack_id, q.question_id).await.unwrap();

        let rows = history(&pool, 1, p.pack_id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].question_id, q.question_id);
        assert_eq!(rows[0].send_count, 2);
    }

    #[tokio::test]
    async fn history_is_per_guild() {
        let pool = test_pool().await;
        let p = pack::create(&pool, 1, "misc").await.unwrap().unwrap();
        let q = question::add(&pool, p.pack_id, "hello", None).await.unwrap();

        record(&pool, 1, p.pack_id, q.question_id).await.unwrap();

        // Guild 2 still sees the question as unsent
        let unsent = random_unsent(&pool, 2, p.pack_id).await.unwrap();
        assert_eq!(unsent.unwrap().question_id, q.question_id);
        assert!(random_unsent(&pool, 1, p.pack_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reset_restores_unsent_pool() {
        let pool = test_pool().await;
        let p = pack::create(&pool, 1, "misc").await.unwrap().unwrap();
        let q = question::add(&pool, p.pack_id, "hello", None).await.unwrap();

        record(&pool, 1, p.pack_id, q.question_id).await.unwrap();
        assert_eq!(reset(&pool, 1, p.pack_id).await.unwrap(), 1);
        assert!(random_unsent(&pool, 1, p.pack_id).await.unwrap().is_some());
    }
}
