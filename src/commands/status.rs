use std::path::Path;

use crate::download::DownloadSettings;
use crate::Data;

async fn file_size(path: &Path) -> Option<u64> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Some(meta.len()),
        _ => None,
    }
}

async fn dir_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "✅"
    } else {
        "❌"
    }
}

/// 읽기 전용 상태 요약
pub async fn status_report(data: &Data) -> String {
    let dir_ok = dir_exists(&data.settings.dir).await;
    let cookies_ok = file_size(&data.settings.cookies_path()).await.is_some();

    format!(
        "📊 Bot status\n\n\
         {} Download folder\n\
         {} Cookies file\n\
         ⏳ Pending requests: {}",
        mark(dir_ok),
        mark(cookies_ok),
        data.pending.len()
    )
}

pub async fn cookie_report(settings: &DownloadSettings) -> String {
    match file_size(&settings.cookies_path()).await {
        Some(size) => format!("✅ Cookies file exists ({size} bytes)"),
        None => "❌ No cookies file found. Some videos may require authentication.".to_string(),
    }
}
