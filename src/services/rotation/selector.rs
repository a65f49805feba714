use sqlx::SqlitePool;
use tracing::debug;

use crate::db::models::Question;
use crate::db::queries::{guild_config, sent_question};

/// Outcome of picking the next question for a guild from a pack
#[derive(Debug)]
pub enum NextQuestion {
    /// Never sent to this guild before
    Fresh(Question),
    /// Every question has been sent at least once; this is the least-sent
    /// one coming around again
    Recycled(Question),
    /// The pack has no questions at all
    EmptyPack,
}

impl NextQuestion {
    pub fn question(&self) -> Option<&Question> {
        match self {
            NextQuestion::Fresh(q) | NextQuestion::Recycled(q) => Some(q),
            NextQuestion::EmptyPack => None,
        }
    }
}

/// Pick the next question to send to `guild_id` from `pack_id`.
///
/// Prefers a uniform-random unsent question. Once the guild has seen the
/// whole pack, falls back to the question with the fewest sends rather than
/// going silent; `/pack reset` is the explicit way to start the rotation
/// over. Does not record anything — call [`record_sent`] after the message
/// is accepted for delivery.
pub async fn select_next(
    pool: &SqlitePool,
    guild_id: i64,
    pack_id: i64,
) -> Result<NextQuestion, sqlx::Error> {
    if let Some(question) = sent_question::random_unsent(pool, guild_id, pack_id).await? {
        return Ok(NextQuestion::Fresh(question));
    }

    match sent_question::least_sent(pool, guild_id, pack_id).await? {
        Some(question) => {
            debug!(
                guild_id,
                pack_id,
                question_id = question.question_id,
                "pool exhausted, recycling least-sent question"
            );
            Ok(NextQuestion::Recycled(question))
        }
        None => Ok(NextQuestion::EmptyPack),
    }
}

/// Record a confirmed delivery: upsert the history row and move the
/// guild's last-question pointer.
pub async fn record_sent(
    pool: &SqlitePool,
    guild_id: i64,
    pack_id: i64,
    question_id: i64,
) -> Result<(), sqlx::Error> {
    sent_question::record(pool, guild_id, pack_id, question_id).await?;
    guild_config::set_last_question(pool, guild_id, question_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::db::pool::test_pool;
    use crate::db::queries::{pack, question};

    async fn seed_pack(pool: &SqlitePool, guild_id: i64, n: usize) -> i64 {
        let p = pack::create(pool, guild_id, "seeded").await.unwrap().unwrap();
        for i in 0..n {
            question::add(pool, p.pack_id, &format!("question {}", i), None)
                .await
                .unwrap();
        }
        p.pack_id
    }

    #[tokio::test]
    async fn n_selections_are_distinct() {
        let pool = test_pool().await;
        let pack_id = seed_pack(&pool, 1, 8).await;

        let mut seen = HashSet::new();
        for _ in 0..8 {
            let next = select_next(&pool, 1, pack_id).await.unwrap();
            let q = match next {
                NextQuestion::Fresh(q) => q,
                other => panic!("expected Fresh, got {:?}", other),
            };
            assert!(seen.insert(q.question_id), "question repeated before exhaustion");
            record_sent(&pool, 1, pack_id, q.question_id).await.unwrap();
        }
        assert_eq!(seen.len(), 8);
    }

    #[tokio::test]
    async fn exhausted_pool_recycles_least_sent() {
        let pool = test_pool().await;
        let pack_id = seed_pack(&pool, 1, 3).await;

        for _ in 0..3 {
            let next = select_next(&pool, 1, pack_id).await.unwrap();
            let q = next.question().expect("fresh question").clone();
            record_sent(&pool, 1, pack_id, q.question_id).await.unwrap();
        }

        // Fourth selection recycles; after recording it, that question has
        // send_count 2 and must not come around again before the others.
        let recycled = match select_next(&pool, 1, pack_id).await.unwrap() {
            NextQuestion::Recycled(q) => q,
            other => panic!("expected Recycled, got {:?}", other),
        };
        record_sent(&pool, 1, pack_id, recycled.question_id)
            .await
            .unwrap();

        let second = match select_next(&pool, 1, pack_id).await.unwrap() {
            NextQuestion::Recycled(q) => q,
            other => panic!("expected Recycled, got {:?}", other),
        };
        assert_ne!(second.question_id, recycled.question_id);
    }

    #[tokio::test]
    async fn selection_never_leaves_the_pack() {
        let pool = test_pool().await;
        let pack_id = seed_pack(&pool, 1, 2).await;
        let other = pack::create(&pool, 1, "other").await.unwrap().unwrap();
        question::add(&pool, other.pack_id, "stray", None).await.unwrap();

        for _ in 0..6 {
            let next = select_next(&pool, 1, pack_id).await.unwrap();
            let q = next.question().expect("some question").clone();
            assert_eq!(q.pack_id, pack_id);
            record_sent(&pool, 1, pack_id, q.question_id).await.unwrap();
        }
    }

    #[tokio::test]
    async fn empty_pack_is_distinct_from_exhausted() {
        let pool = test_pool().await;
        let p = pack::create(&pool, 1, "empty").await.unwrap().unwrap();

        let next = select_next(&pool, 1, p.pack_id).await.unwrap();
        assert!(matches!(next, NextQuestion::EmptyPack));
    }

    #[tokio::test]
    async fn record_sent_updates_last_question_pointer() {
        let pool = test_pool().await;
        let pack_id = seed_pack(&pool, 1, 1).await;
        crate::db::queries::guild_config::get_or_create(&pool, 1)
            .await
            .unwrap();

        let q = select_next(&pool, 1, pack_id)
            .await
            .unwrap()
            .question()
            .expect("fresh question")
            .clone();
        record_sent(&pool, 1, pack_id, q.question_id).await.unwrap();

        let config = crate::db::queries::guild_config::get(&pool, 1)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(config.last_question_id, Some(q.question_id));
    }
}
