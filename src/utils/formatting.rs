/// Format a channel mention
pub fn mention_channel(channel_id: u64) -> String {
    format!("<#{}>", channel_id)
}

/// Format a role mention
pub fn mention_role(role_id: u64) -> String {
    format!("<@&{}>", role_id)
}

/// Format a user mention
pub fn mention_user(user_id: u64) -> String {
    format!("<@{}>", user_id)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_strings_alone() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn mentions_render_discord_syntax() {
        assert_eq!(mention_channel(1), "<#1>");
        assert_eq!(mention_role(2), "<@&2>");
        assert_eq!(mention_user(3), "<@3>");
    }
}
