use sqlx::SqlitePool;

use crate::db::models::Pack;

/// Create a pack. Returns None when the name is already taken in this guild.
pub async fn create(
    pool: &SqlitePool,
    guild_id: i64,
    name: &str,
) -> Result<Option<Pack>, sqlx::Error> {
    let result = sqlx::query_as::<_, Pack>(
        r#"
        INSERT INTO question_packs (guild_id, name)
        VALUES (?, ?)
        RETURNING *
        "#
    )
    .bind(guild_id)
    .bind(name)
    .fetch_one(pool)
    .await;

    match result {
        Ok(pack) => Ok(Some(pack)),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn get_by_name(
    pool: &SqlitePool,
    guild_id: i64,
    name: &str,
) -> Result<Option<Pack>, sqlx::Error> {
    sqlx::query_as::<_, Pack>(
        "SELECT * FROM question_packs WHERE guild_id = ? AND name = ?"
    )
    .bind(guild_id)
    .bind(name)
    .fetch_optional(pool)
    .await
}

pub async fn get_by_id(pool: &SqlitePool, pack_id: i64) -> Result<Option<Pack>, sqlx::Error> {
    sqlx::query_as::<_, Pack>(
        "SELECT * FROM question_packs WHERE pack_id = ?"
    )
    .bind(pack_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_for_guild(pool: &SqlitePool, guild_id: i64) -> Result<Vec<Pack>, sqlx::Error> {
    sqlx::query_as::<_, Pack>(
        "SELECT * FROM question_packs WHERE guild_id = ? ORDER BY name"
    )
    .bind(guild_id)
    .fetch_all(pool)
    .await
}

/// Delete a pack. Questions, send history, and suggestions cascade;
/// any config pointing at the pack has its active_pack_id cleared by
/// the ON DELETE SET NULL constraint.
pub async fn delete(pool: &SqlitePool, pack_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM question_packs WHERE pack_id = ?")
        .bind(pack_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::test_pool;
    use crate::db::queries::{guild_config, question, sent_question, suggestion};

    #[tokio::test]
    async fn pack_names_unique_per_guild() {
        let pool = test_pool().await;

        assert!(create(&pool, 1, "icebreakers").await.unwrap().is_some());
        assert!(create(&pool, 1, "icebreakers").await.unwrap().is_none());
        // Same name in another guild is fine
        assert!(create(&pool, 2, "icebreakers").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_cascades_and_clears_active_pack() {
        let pool = test_pool().await;

        let pack = create(&pool, 1, "icebreakers").await.unwrap().unwrap();
        let q = question::add(&pool, pack.pack_id, "Tea or coffee?", None)
            .await
            .unwrap();
        sent_question::record(&pool, 1, pack.pack_id, q.question_id)
            .await
            .unwrap();
        suggestion::create(&pool, 1, pack.pack_id, 77, "Cats or dogs?")
            .await
            .unwrap();
        guild_config::set_active_pack(&pool, 1, Some(pack.pack_id))
            .await
            .unwrap();

        assert!(delete(&pool, pack.pack_id).await.unwrap());

        assert_eq!(question::count_for_pack(&pool, pack.pack_id).await.unwrap(), 0);
        assert!(sent_question::history(&pool, 1, pack.pack_id)
            .await
            .unwrap()
            .is_empty());
        assert!(suggestion::pending_for_guild(&pool, 1)
            .await
            .unwrap()
            .is_empty());

        let config = guild_config::get(&pool, 1).await.unwrap().unwrap();
        assert_eq!(config.active_pack_id, None);
    }

    #[tokio::test]
    async fn delete_missing_pack_reports_false() {
        let pool = test_pool().await;
        assert!(!delete(&pool, 9999).await.unwrap());
    }
}
