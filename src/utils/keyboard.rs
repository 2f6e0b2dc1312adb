use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::download::MediaMode;
use crate::transport::InlineChoice;

pub fn format_choices() -> Vec<InlineChoice> {
    vec![
        InlineChoice::new("🎵 Audio (MP3)", MediaMode::Audio.callback_data()),
        InlineChoice::new("🎬 Video (MP4)", MediaMode::Video.callback_data()),
    ]
}

/// 선택지를 한 줄짜리 인라인 키보드로
pub fn inline_keyboard(choices: &[InlineChoice]) -> InlineKeyboardMarkup {
    let row: Vec<InlineKeyboardButton> = choices
        .iter()
        .map(|c| InlineKeyboardButton::callback(c.label.clone(), c.data.clone()))
        .collect();
    InlineKeyboardMarkup::new(vec![row])
}
