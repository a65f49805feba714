use sqlx::SqlitePool;

use crate::db::models::Question;

pub async fn add(
    pool: &SqlitePool,
    pack_id: i64,
    text: &str,
    added_by: Option<i64>,
) -> Result<Question, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        r#"
        INSERT INTO questions (pack_id, text, added_by)
        VALUES (?, ?, ?)
        RETURNING *
        "#
    )
    .bind(pack_id)
    .bind(text)
    .bind(added_by)
    .fetch_one(pool)
    .await
}

pub async fn get(pool: &SqlitePool, question_id: i64) -> Result<Option<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        "SELECT * FROM questions WHERE question_id = ?"
    )
    .bind(question_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_for_pack(pool: &SqlitePool, pack_id: i64) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        "SELECT * FROM questions WHERE pack_id = ? ORDER BY question_id"
    )
    .bind(pack_id)
    .fetch_all(pool)
    .await
}

pub async fn count_for_pack(pool: &SqlitePool, pack_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM questions WHERE pack_id = ?"
    )
    .bind(pack_id)
    .fetch_one(pool)
    .await
}

/// Remove a question, scoped to a pack so staff can only delete from
/// packs in their own guild.
pub async fn remove(
    pool: &SqlitePool,
    pack_id: i64,
    question_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM questions WHERE question_id = ? AND pack_id = ?"
    )
    .bind(question_id)
    .bind(pack_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::test_pool;
    use crate::db::queries::pack;

    #[tokio::test]
    async fn add_and_list_keeps_insertion_order() {
        let pool = test_pool().await;
        let p = pack::create(&pool, 1, "misc").await.unwrap().unwrap();

        add(&pool, p.pack_id, "first", Some(10)).await.unwrap();
        add(&pool, p.pack_id, "second", None).await.unwrap();

        let questions = list_for_pack(&pool, p.pack_id).await.unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text, "first");
        assert_eq!(questions[0].added_by, Some(10));
        assert_eq!(questions[1].text, "second");
    }

    #[tokio::test]
    async fn remove_is_scoped_to_pack() {
        let pool = test_pool().await;
        let a = pack::create(&pool, 1, "a").await.unwrap().unwrap();
        let b = pack::create(&pool, 1, "b").await.unwrap().unwrap();
        let q = add(&pool, a.pack_id, "hello", None).await.unwrap();

        // Wrong pack: no-op
        assert!(!remove(&pool, b.pack_id, q.question_id).await.unwrap());
        assert!(remove(&pool, a.pack_id, q.question_id).await.unwrap());
        assert_eq!(count_for_pack(&pool, a.pack_id).await.unwrap(), 0);
    }
}
