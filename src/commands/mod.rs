pub mod config;
pub mod pack;
pub mod question;
pub mod send_now;
pub mod suggest;

use crate::bot::data::Context;
use crate::db::queries::pack as pack_queries;

/// Autocomplete for pack-name arguments: this guild's packs, filtered by
/// the partial input.
pub async fn autocomplete_pack_name(
    ctx: Context<'_>,
    partial: &str,
) -> impl Iterator<Item = String> {
    let names = match ctx.guild_id() {
        Some(guild_id) => pack_queries::list_for_guild(&ctx.data().pool, guild_id.get() as i64)
            .await
            .unwrap_or_default(),
        None => Vec::new(),
    };

    let partial = partial.to_lowercase();
    names
        .into_iter()
        .map(|p| p.name)
        .filter(move |name| name.to_lowercase().contains(&partial))
        .take(25)
}
