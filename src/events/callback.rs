use tracing::{debug, warn};

use crate::download::{self, MediaMode};
use crate::transport::ChatTransport;
use crate::utils::text;
use crate::{Data, Error};

/// 인라인 버튼 선택 이벤트
#[derive(Clone, Debug)]
pub struct Selection {
    pub callback_id: String,
    pub chat_id: i64,
    /// 버튼이 달린 메시지. 너무 오래된 메시지면 없을 수 있다.
    pub message_id: Option<i32>,
    pub data: Option<String>,
}

pub async fn handle(
    transport: &dyn ChatTransport,
    data: &Data,
    selection: Selection,
) -> Result<(), Error> {
    let Some(mode) = selection
        .data
        .as_deref()
        .and_then(MediaMode::from_callback_data)
    else {
        debug!("알 수 없는 콜백 데이터: {:?}", selection.data);
        transport
            .answer_callback(&selection.callback_id, None)
            .await?;
        return Ok(());
    };

    let chat_id = selection.chat_id;

    // 디스패치 전에 꺼내서 같은 링크가 두 번 처리되지 않게 한다
    let Some(url) = data.pending.take(chat_id) else {
        transport
            .answer_callback(&selection.callback_id, Some(text::LINK_EXPIRED))
            .await?;
        return Ok(());
    };

    if let Err(e) = transport.answer_callback(&selection.callback_id, None).await {
        warn!("콜백 응답 실패 (chat {chat_id}): {e}");
    }

    let status = match selection.message_id {
        Some(message_id) => {
            transport
                .edit_text(chat_id, message_id, text::PROCESSING)
                .await
        }
        None => transport.send_text(chat_id, text::PROCESSING, None, &[]).await,
    };
    if let Err(e) = status {
        warn!("처리 중 메시지 전송 실패 (chat {chat_id}): {e}");
    }

    download::deliver(
        transport,
        data.engine.as_ref(),
        &data.settings,
        chat_id,
        &url,
        mode,
    )
    .await;

    Ok(())
}
