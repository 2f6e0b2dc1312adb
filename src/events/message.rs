use tracing::debug;

use crate::transport::ChatTransport;
use crate::utils::{keyboard, text};
use crate::{Data, Error};

/// 단순 부분 문자열 검사. 단축 링크(youtu.be)도 허용한다.
pub fn is_supported_link(text: &str) -> bool {
    text.contains("youtube.com") || text.contains("youtu.be")
}

pub async fn handle(
    transport: &dyn ChatTransport,
    data: &Data,
    chat_id: i64,
    message_id: i32,
    content: &str,
) -> Result<(), Error> {
    let url = content.trim();

    if !is_supported_link(url) {
        transport
            .send_text(chat_id, text::INVALID_LINK, Some(message_id), &[])
            .await?;
        return Ok(());
    }

    if data.pending.remember(chat_id, url.to_string()).is_some() {
        debug!("대기 중인 링크 교체 (chat {chat_id})");
    }

    transport
        .send_text(
            chat_id,
            text::SELECT_FORMAT,
            Some(message_id),
            &keyboard::format_choices(),
        )
        .await
}
