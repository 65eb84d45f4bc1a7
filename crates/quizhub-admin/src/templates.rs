//! HTML notification templates
//!
//! User-visible texts are Russian, matching the audience of the channels;
//! operator-facing report lines stay English. Channels render as
//! `https://t.me/<username>` links when a public username exists,
//! otherwise as bold text.

use chrono::{DateTime, Utc};

use quizhub_core::entities::TelegramChannel;

/// HTML reference to a channel: link when public, bold title otherwise
#[must_use]
pub fn channel_ref(channel: &TelegramChannel) -> String {
    let title = escape(&channel.title);
    match channel.username.as_deref().filter(|u| !u.is_empty()) {
        Some(username) => format!(r#"<a href="https://t.me/{username}">{title}</a>"#),
        None => format!("<b>{title}</b>"),
    }
}

#[must_use]
pub fn promoted(channel: &TelegramChannel) -> String {
    format!(
        "Вы назначены администратором канала {}.",
        channel_ref(channel)
    )
}

/// One aggregated notice listing every channel whose rights were revoked
#[must_use]
pub fn demoted(channels: &[TelegramChannel]) -> String {
    let items: Vec<String> = channels
        .iter()
        .map(|channel| format!("• {}", channel_ref(channel)))
        .collect();
    format!(
        "Ваши права администратора отозваны в каналах:\n{}",
        items.join("\n")
    )
}

#[must_use]
pub fn admin_deleted() -> String {
    "Ваш доступ администратора полностью отозван.".to_string()
}

#[must_use]
pub fn banned(channel: &TelegramChannel, until: DateTime<Utc>) -> String {
    format!(
        "Вы заблокированы в канале {} до {}.",
        channel_ref(channel),
        until.format("%d.%m.%Y %H:%M UTC")
    )
}

#[must_use]
pub fn unbanned(channel: &TelegramChannel) -> String {
    format!("Блокировка в канале {} снята.", channel_ref(channel))
}

#[must_use]
pub fn removed(channel: &TelegramChannel) -> String {
    format!("Вы исключены из канала {}.", channel_ref(channel))
}

/// Minimal HTML escaping for text interpolated into messages
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
