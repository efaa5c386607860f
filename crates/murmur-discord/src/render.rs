use chrono::Utc;
use murmur_schema::{Notice, NoticeKind};
use serenity::all::{
    ButtonStyle, Colour, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedAuthor,
    CreateEmbedFooter, User,
};

pub(crate) const AGREE_BUTTON: &str = "agree";
pub(crate) const DECLINE_BUTTON: &str = "decline";
pub(crate) const CONFIRM_BUTTON: &str = "confirm_clear";
pub(crate) const CANCEL_BUTTON: &str = "cancel_clear";

pub(crate) fn notice_colour(kind: NoticeKind) -> Colour {
    match kind {
        NoticeKind::Info => Colour::new(0x0099ff),
        NoticeKind::Success => Colour::new(0x00ff00),
        NoticeKind::Failure => Colour::new(0xff0000),
        NoticeKind::Cancelled => Colour::new(0xffa500),
        NoticeKind::TimedOut => Colour::new(0x808080),
    }
}

pub(crate) fn notice_embed(notice: &Notice) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .description(notice.body.clone())
        .colour(notice_colour(notice.kind));
    if let Some(title) = &notice.title {
        embed = embed.title(title.clone());
    }
    embed
}

pub(crate) fn terms_prompt() -> (CreateEmbed, CreateActionRow) {
    let embed = CreateEmbed::new()
        .title("Terms of Use")
        .description(
            "Please accept the terms of use before talking to the bot:\n\n\
             1. The bot is for entertainment purposes only.\n\
             2. Do not use the bot to send inappropriate content.\n\
             3. The operators are not responsible for misuse.\n\n\
             By clicking \"Agree\" you accept these terms.",
        )
        .colour(notice_colour(NoticeKind::Info))
        .footer(CreateEmbedFooter::new("Thanks for using murmur!"));

    let row = CreateActionRow::Buttons(vec![
        CreateButton::new(AGREE_BUTTON)
            .label("Agree")
            .style(ButtonStyle::Success),
        CreateButton::new(DECLINE_BUTTON)
            .label("Decline")
            .style(ButtonStyle::Danger),
    ]);

    (embed, row)
}

pub(crate) fn confirm_prompt(
    notice: &Notice,
    user: &User,
    guild_name: Option<&str>,
) -> (CreateEmbed, CreateActionRow) {
    let footer = format!(
        "{} • {}",
        guild_name.unwrap_or("Server"),
        Utc::now().format("%H:%M UTC")
    );
    let embed = notice_embed(notice)
        .author(CreateEmbedAuthor::new(format!("{} 🛡️", user.name)).icon_url(user.face()))
        .footer(CreateEmbedFooter::new(footer));

    let row = CreateActionRow::Buttons(vec![
        CreateButton::new(CONFIRM_BUTTON)
            .label("✅ Yes")
            .style(ButtonStyle::Success),
        CreateButton::new(CANCEL_BUTTON)
            .label("❌ No")
            .style(ButtonStyle::Danger),
    ]);

    (embed, row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_colours_are_distinct_per_kind() {
        let kinds = [
            NoticeKind::Info,
            NoticeKind::Success,
            NoticeKind::Failure,
            NoticeKind::Cancelled,
            NoticeKind::TimedOut,
        ];
        let mut seen = std::collections::HashSet::new();
        for kind in kinds {
            assert!(seen.insert(notice_colour(kind).0));
        }
        assert_eq!(notice_colour(NoticeKind::Failure).0, 0xff0000);
    }

    #[test]
    fn button_ids_do_not_collide() {
        let ids = [AGREE_BUTTON, DECLINE_BUTTON, CONFIRM_BUTTON, CANCEL_BUTTON];
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn notice_embed_carries_title_and_body() {
        let notice = Notice::titled(NoticeKind::Success, "Done", "all good");
        let embed = serde_json::to_value(notice_embed(&notice)).unwrap();
        assert_eq!(embed["title"], "Done");
        assert_eq!(embed["description"], "all good");
    }

    #[test]
    fn terms_prompt_exposes_agree_and_decline() {
        let (_embed, row) = terms_prompt();
        let row = serde_json::to_value(row).unwrap();
        let ids: Vec<_> = row["components"]
            .as_array()
            .unwrap()
            .iter()
            .map(|button| button["custom_id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec![AGREE_BUTTON, DECLINE_BUTTON]);
    }
}
