use std::env;

/// Default staff role name, overridable via STAFF_ROLE_NAME
const DEFAULT_STAFF_ROLE_NAME: &str = "Staff";

/// Default database location, overridable via DATABASE_URL
const DEFAULT_DATABASE_URL: &str = "sqlite://qotd.db";

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub database_url: String,
    /// Role name that grants staff access alongside Manage Server
    pub staff_role_name: String,
    pub guild_id: Option<u64>,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| "DISCORD_TOKEN environment variable not set")?;

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let staff_role_name = env::var("STAFF_ROLE_NAME")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_STAFF_ROLE_NAME.to_string());

        let guild_id = env::var("GUILD_ID")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());

        Ok(Self {
            discord_token,
            database_url,
            staff_role_name,
            guild_id,
        })
    }
}
