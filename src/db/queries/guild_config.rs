use sqlx::SqlitePool;

use crate::db::models::{Frequency, GuildConfig};

pub async fn get_or_create(pool: &SqlitePool, guild_id: i64) -> Result<GuildConfig, sqlx::Error> {
    // Try to get existing config
    let existing = sqlx::query_as::<_, GuildConfig>(
        "SELECT * FROM guild_configs WHERE guild_id = ?"
    )
    .bind(guild_id)
    .fetch_optional(pool)
    .await?;

    if let Some(config) = existing {
        return Ok(config);
    }

    // Create new config
    sqlx::query_as::<_, GuildConfig>(
        r#"
        INSERT INTO guild_configs (guild_id)
        VALUES (?)
        RETURNING *
        "#
    )
    .bind(guild_id)
    .fetch_one(pool)
    .await
}

pub async fn get(pool: &SqlitePool, guild_id: i64) -> Result<Option<GuildConfig>, sqlx::Error> {
    sqlx::query_as::<_, GuildConfig>(
        "SELECT * FROM guild_configs WHERE guild_id = ?"
    )
    .bind(guild_id)
    .fetch_optional(pool)
    .await
}

/// All configs the scheduler should consider: enabled frequency, a target
/// channel, and a send time.
pub async fn get_schedulable(pool: &SqlitePool) -> Result<Vec<GuildConfig>, sqlx::Error> {
    sqlx::query_as::<_, GuildConfig>(
        r#"
        SELECT * FROM guild_configs
        WHERE frequency != 'disabled'
          AND channel_id IS NOT NULL
          AND send_hour IS NOT NULL
          AND send_minute IS NOT NULL
        "#
    )
    .fetch_all(pool)
    .await
}

pub async fn set_channel(
    pool: &SqlitePool,
    guild_id: i64,
    channel_id: i64,
) -> Result<GuildConfig, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    sqlx::query_as::<_, GuildConfig>(
        r#"
        UPDATE guild_configs
        SET channel_id = ?, updated_at = CURRENT_TIMESTAMP
        WHERE guild_id = ?
        RETURNING *
        "#
    )
    .bind(channel_id)
    .bind(guild_id)
    .fetch_one(pool)
    .await
}

pub async fn set_notify_channel(
    pool: &SqlitePool,
    guild_id: i64,
    channel_id: Option<i64>,
) -> Result<GuildConfig, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    sqlx::query_as::<_, GuildConfig>(
        r#"
        UPDATE guild_configs
        SET notify_channel_id = ?, updated_at = CURRENT_TIMESTAMP
        WHERE guild_id = ?
        RETURNING *
        "#
    )
    .bind(channel_id)
    .bind(guild_id)
    .fetch_one(pool)
    .await
}

pub async fn set_send_time(
    pool: &SqlitePool,
    guild_id: i64,
    hour: u32,
    minute: u32,
) -> Result<GuildConfig, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    sqlx::query_as::<_, GuildConfig>(
        r#"
        UPDATE guild_configs
        SET send_hour = ?, send_minute = ?, updated_at = CURRENT_TIMESTAMP
        WHERE guild_id = ?
        RETURNING *
        "#
    )
    .bind(hour as i64)
    .bind(minute as i64)
    .bind(guild_id)
    .fetch_one(pool)
    .await
}

pub async fn set_frequency(
    pool: &SqlitePool,
    guild_id: i64,
    frequency: Frequency,
    weekly_day: Option<u32>,
) -> Result<GuildConfig, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    sqlx::query_as::<_, GuildConfig>(
        r#"
        UPDATE guild_configs
        SET frequency = ?, weekly_day = ?, updated_at = CURRENT_TIMESTAMP
        WHERE guild_id = ?
        RETURNING *
        "#
    )
    .bind(frequency)
    .bind(weekly_day.map(|d| d as i64))
    .bind(guild_id)
    .fetch_one(pool)
    .await
}

pub async fn set_ping_role(
    pool: &SqlitePool,
    guild_id: i64,
    role_id: Option<i64>,
) -> Result<GuildConfig, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    sqlx::query_as::<_, GuildConfig>(
        r#"
        UPDATE guild_configs
        SET ping_role_id = ?, updated_at = CURRENT_TIMESTAMP
        WHERE guild_id = ?
        RETURNING *
        "#
    )
    .bind(role_id)
    .bind(guild_id)
    .fetch_one(pool)
    .await
}

pub async fn set_active_pack(
    pool: &SqlitePool,
    guild_id: i64,
    pack_id: Option<i64>,
) -> Result<GuildConfig, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    sqlx::query_as::<_, GuildConfig>(
        r#"
        UPDATE guild_configs
        SET active_pack_id = ?, updated_at = CURRENT_TIMESTAMP
        WHERE guild_id = ?
        RETURNING *
        "#
    )
    .bind(pack_id)
    .bind(guild_id)
    .fetch_one(pool)
    .await
}

pub async fn set_last_question(
    pool: &SqlitePool,
    guild_id: i64,
    question_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE guild_configs
        SET last_question_id = ?, updated_at = CURRENT_TIMESTAMP
        WHERE guild_id = ?
        "#
    )
    .bind(question_id)
    .bind(guild_id)
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::test_pool;

    #[tokio::test]
    async fn config_defaults_to_disabled() {
        let pool = test_pool().await;
        let config = get_or_create(&pool, 100).await.unwrap();

        assert_eq!(config.frequency, Frequency::Disabled);
        assert!(config.channel_id.is_none());
        assert!(!config.is_schedulable());
    }

    #[tokio::test]
    async fn schedulable_requires_channel_time_and_frequency() {
        let pool = test_pool().await;

        set_frequency(&pool, 100, Frequency::Daily, None).await.unwrap();
        assert!(get_schedulable(&pool).await.unwrap().is_empty());

        set_channel(&pool, 100, 555).await.unwrap();
        assert!(get_schedulable(&pool).await.unwrap().is_empty());

        let config = set_send_time(&pool, 100, 9, 30).await.unwrap();
        assert!(config.is_schedulable());
        assert_eq!(config.send_time(), Some((9, 30)));

        let schedulable = get_schedulable(&pool).await.unwrap();
        assert_eq!(schedulable.len(), 1);
        assert_eq!(schedulable[0].guild_id, 100);
    }

    #[tokio::test]
    async fn ping_role_can_be_cleared() {
        let pool = test_pool().await;

        let config = set_ping_role(&pool, 100, Some(42)).await.unwrap();
        assert_eq!(config.ping_role_id, Some(42));

        let config = set_ping_role(&pool, 100, None).await.unwrap();
        assert_eq!(config.ping_role_id, None);
    }
}
