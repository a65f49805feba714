use sqlx::SqlitePool;

use crate::db::models::{Question, Suggestion, SuggestionStatus};

/// Result of a staff review action
#[derive(Debug)]
pub enum ReviewOutcome {
    /// Suggestion promoted into its pack as this question
    Approved(Question),
    Rejected,
    /// Another reviewer got there first
    AlreadyProcessed(SuggestionStatus),
    NotFound,
}

pub async fn create(
    pool: &SqlitePool,
    guild_id: i64,
    pack_id: i64,
    user_id: i64,
    text: &str,
) -> Result<Suggestion, sqlx::Error> {
    sqlx::query_as::<_, Suggestion>(
        r#"
        INSERT INTO suggestions (guild_id, pack_id, user_id, text)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#
    )
    .bind(guild_id)
    .bind(pack_id)
    .bind(user_id)
    .bind(text)
    .fetch_one(pool)
    .await
}

pub async fn get(
    pool: &SqlitePool,
    guild_id: i64,
    suggestion_id: i64,
) -> Result<Option<Suggestion>, sqlx::Error> {
    sqlx::query_as::<_, Suggestion>(
        "SELECT * FROM suggestions WHERE suggestion_id = ? AND guild_id = ?"
    )
    .bind(suggestion_id)
    .bind(guild_id)
    .fetch_optional(pool)
    .await
}

pub async fn pending_for_guild(
    pool: &SqlitePool,
    guild_id: i64,
) -> Result<Vec<Suggestion>, sqlx::Error> {
    sqlx::query_as::<_, Suggestion>(
        r#"
        SELECT * FROM suggestions
        WHERE guild_id = ? AND status = 'pending'
        ORDER BY suggestion_id
        "#
    )
    .bind(guild_id)
    .fetch_all(pool)
    .await
}

/// Promote a pending suggestion into its pack. The pending check and the
/// mutation share one transaction so two reviewers cannot both process it.
pub async fn approve(
    pool: &SqlitePool,
    guild_id: i64,
    suggestion_id: i64,
    reviewer_id: i64,
) -> Result<ReviewOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let suggestion = sqlx::query_as::<_, Suggestion>(
        "SELECT * FROM suggestions WHERE suggestion_id = ? AND guild_id = ?"
    )
    .bind(suggestion_id)
    .bind(guild_id)
    .fetch_optional(&mut *tx)
    .await?;

    let suggestion = match suggestion {
        None => return Ok(ReviewOutcome::NotFound),
        Some(s) if s.status != SuggestionStatus::Pending => {
            return Ok(ReviewOutcome::AlreadyProcessed(s.status));
        }
        Some(s) => s,
    };

    let question = sqlx::query_as::<_, Question>(
        r#"
        INSERT INTO questions (pack_id, text, added_by)
        VALUES (?, ?, ?)
        RETURNING *
        "#
    )
    .bind(suggestion.pack_id)
    .bind(&suggestion.text)
    .bind(suggestion.user_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "UPDATE suggestions SET status = 'approved', reviewer_id = ? WHERE suggestion_id = ?"
    )
    .bind(reviewer_id)
    .bind(suggestion_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(ReviewOutcome::Approved(question))
}

pub async fn reject(
    pool: &SqlitePool,
    guild_id: i64,
    suggestion_id: i64,
    reviewer_id: i64,
) -> Result<ReviewOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let suggestion = sqlx::query_as::<_, Suggestion>(
        "SELECT * FROM suggestions WHERE suggestion_id = ? AND guild_id = ?"
    )
    .bind(suggestion_id)
    .bind(guild_id)
    .fetch_optional(&mut *tx)
    .await?;

    match suggestion {
        None => return Ok(ReviewOutcome::NotFound),
        Some(s) if s.status != SuggestionStatus::Pending => {
            return Ok(ReviewOutcome::AlreadyProcessed(s.status));
        }
        Some(_) => {}
    }

    sqlx::query(
        "UPDATE suggestions SET status = 'rejected', reviewer_id = ? WHERE suggestion_id = ?"
    )
    .bind(reviewer_id)
    .bind(suggestion_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(ReviewOutcome::Rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::test_pool;
    use crate::db::queries::{pack, question};

    #[tokio::test]
    async fn approve_inserts_exactly_one_question() {
        let pool = test_pool().await;
        let p = pack::create(&pool, 1, "misc").await.unwrap().unwrap();
        let s = create(&pool, 1, p.pack_id, 77, "Cats or dogs?").await.unwrap();

        let outcome = approve(&pool, 1, s.suggestion_id, 99).await.unwrap();
        let q = match outcome {
            ReviewOutcome::Approved(q) => q,
            other => panic!("expected Approved, got {:?}", other),
        };
        assert_eq!(q.pack_id, p.pack_id);
        assert_eq!(q.text, "Cats or dogs?");
        assert_eq!(q.added_by, Some(77));
        assert_eq!(question::count_for_pack(&pool, p.pack_id).await.unwrap(), 1);

        let stored = get(&pool, 1, s.suggestion_id).await.unwrap().unwrap();
        assert_eq!(stored.status, SuggestionStatus::Approved);
        assert_eq!(stored.reviewer_id, Some(99));
    }

    #[tokio::test]
    async fn reapprove_is_a_reported_noop() {
        let pool = test_pool().await;
        let p = pack::create(&pool, 1, "misc").await.unwrap().unwrap();
        let s = create(&pool, 1, p.pack_id, 77, "Cats or dogs?").await.unwrap();

        approve(&pool, 1, s.suggestion_id, 99).await.unwrap();
        let outcome = approve(&pool, 1, s.suggestion_id, 98).await.unwrap();

        assert!(matches!(
            outcome,
            ReviewOutcome::AlreadyProcessed(SuggestionStatus::Approved)
        ));
        // No second question was inserted
        assert_eq!(question::count_for_pack(&pool, p.pack_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn reject_then_approve_reports_processed() {
        let pool = test_pool().await;
        let p = pack::create(&pool, 1, "misc").await.unwrap().unwrap();
        let s = create(&pool, 1, p.pack_id, 77, "Cats or dogs?").await.unwrap();

        assert!(matches!(
            reject(&pool, 1, s.suggestion_id, 99).await.unwrap(),
            ReviewOutcome::Rejected
        ));
        assert!(matches!(
            approve(&pool, 1, s.suggestion_id, 99).await.unwrap(),
            ReviewOutcome::AlreadyProcessed(SuggestionStatus::Rejected)
        ));
        assert_eq!(question::count_for_pack(&pool, p.pack_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn review_is_guild_scoped() {
        let pool = test_pool().await;
        let p = pack::create(&pool, 1, "misc").await.unwrap().unwrap();
        let s = create(&pool, 1, p.pack_id, 77, "Cats or dogs?").await.unwrap();

        // Wrong guild cannot see or process the suggestion
        assert!(matches!(
            approve(&pool, 2, s.suggestion_id, 99).await.unwrap(),
            ReviewOutcome::NotFound
        ));
    }
}
