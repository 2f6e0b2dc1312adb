use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// 링크 전송과 포맷 선택 사이를 잇는 대기 목록. Key: chat id
///
/// 시간 기반 만료는 없다. 같은 채팅에서 새 링크가 오면 덮어쓰고,
/// 포맷 선택이 소비하면 사라진다.
#[derive(Clone, Default)]
pub struct PendingStore {
    inner: Arc<Mutex<HashMap<i64, String>>>,
}

impl PendingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<i64, String>> {
        // 잠금 중 패닉이 나도 맵 자체는 일관된 상태다
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 링크를 저장하고 이전에 대기 중이던 링크를 돌려준다.
    pub fn remember(&self, chat_id: i64, url: String) -> Option<String> {
        self.lock().insert(chat_id, url)
    }

    /// 대기 중인 링크를 꺼낸다. 같은 채팅에 대한 두 번째 호출은 `None`을 받는다.
    pub fn take(&self, chat_id: i64) -> Option<String> {
        self.lock().remove(&chat_id)
    }

    pub fn get(&self, chat_id: i64) -> Option<String> {
        self.lock().get(&chat_id).cloned()
    }

    pub fn contains(&self, chat_id: i64) -> bool {
        self.lock().contains_key(&chat_id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
