use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use super::engine::{EngineOptions, FetchError, FetchedMedia, MediaEngine};
use super::failure;
use super::{DownloadJob, DownloadSettings, MediaMode};
use crate::transport::ChatTransport;
use crate::utils::text;
use crate::Error;

/// 링크를 받아 파일을 만들고 채팅으로 올린다.
///
/// 오류를 밖으로 내보내지 않는다. 실패는 분류해서 사용자에게 알리고,
/// 성공이든 실패든 이 작업이 만든 파일은 모두 지운다.
pub async fn deliver(
    transport: &dyn ChatTransport,
    engine: &dyn MediaEngine,
    settings: &DownloadSettings,
    chat_id: i64,
    url: &str,
    mode: MediaMode,
) {
    let mut job = DownloadJob::new(chat_id, url, mode, &settings.dir);
    info!("다운로드 시작 (chat {chat_id}, {mode}): {url}");

    let outcome = run(transport, engine, settings, &mut job).await;
    cleanup(&job, &settings.dir).await;

    match outcome {
        Ok(()) => info!("전송 완료 (chat {chat_id})"),
        Err(e) => {
            let failure = failure::classify(&e);
            warn!("다운로드 실패 (chat {chat_id}): {failure:?}");
            if let Err(send_err) = transport
                .send_text(chat_id, &failure.user_message(), None, &[])
                .await
            {
                error!("오류 메시지 전송 실패 (chat {chat_id}): {send_err}");
            }
        }
    }
}

async fn run(
    transport: &dyn ChatTransport,
    engine: &dyn MediaEngine,
    settings: &DownloadSettings,
    job: &mut DownloadJob,
) -> Result<(), Error> {
    tokio::fs::create_dir_all(&settings.dir).await?;

    let cookies = settings.cookies_path();
    let cookie_file = if tokio::fs::try_exists(&cookies).await.unwrap_or(false) {
        info!("쿠키 사용: {}", cookies.display());
        Some(cookies)
    } else {
        info!("쿠키 파일 없음, 쿠키 없이 다운로드");
        None
    };

    let options = EngineOptions::for_job(job, settings, cookie_file);
    let media = engine.fetch(&options, &job.url).await?;

    let expected = expected_path(&media, job.mode, settings);
    job.file_path = Some(expected.clone());
    let (path, size) = resolve_output(&expected, &job.prefix, &settings.dir).await?;
    job.file_path = Some(path.clone());

    transport
        .send_text(job.chat_id, &text::uploading(size), None, &[])
        .await?;

    let title = media
        .title
        .as_deref()
        .unwrap_or_else(|| job.mode.fallback_title());
    let caption = text::truncate_chars(title, settings.caption_limit);
    transport
        .send_media(job.chat_id, job.mode, &path, caption, settings.upload_timeout)
        .await?;

    // 파일은 이미 도착했으므로 완료 메시지 실패는 기록만 한다
    if let Err(e) = transport.send_text(job.chat_id, text::DONE, None, &[]).await {
        warn!("완료 메시지 전송 실패 (chat {}): {e}", job.chat_id);
    }
    Ok(())
}

/// 오디오는 후처리로 확장자가 바뀐다. 엔진이 보고한 `ext`를 떼고 코덱 확장자를 붙인다.
fn expected_path(media: &FetchedMedia, mode: MediaMode, settings: &DownloadSettings) -> PathBuf {
    let codec = settings.audio_codec.as_str();
    match (mode, media.ext.as_deref()) {
        (MediaMode::Video, _) => media.path.clone(),
        (MediaMode::Audio, Some(ext)) if ext == codec => media.path.clone(),
        (MediaMode::Audio, Some(ext)) => {
            let file_name = media.path.file_name().unwrap_or_default().to_string_lossy();
            let name: &str = &file_name;
            let stem = name.strip_suffix(&format!(".{ext}")).unwrap_or(name);
            media.path.with_file_name(format!("{stem}.{codec}"))
        }
        (MediaMode::Audio, None) => media.path.with_extension(codec),
    }
}

fn is_partial(name: &str) -> bool {
    name.ends_with(".part") || name.ends_with(".ytdl") || name.contains(".part-Frag")
}

/// 결과 파일 경로와 크기. 예상 경로에 없으면 작업 접두사로 찾는다.
/// 비어 있거나 없으면 실패.
pub async fn resolve_output(
    expected: &Path,
    prefix: &str,
    dir: &Path,
) -> Result<(PathBuf, u64), FetchError> {
    if let Ok(meta) = tokio::fs::metadata(expected).await {
        if meta.is_file() && meta.len() > 0 {
            return Ok((expected.to_path_buf(), meta.len()));
        }
    }

    let missing = || FetchError::MissingOutput(expected.to_path_buf());
    let mut entries = tokio::fs::read_dir(dir).await.map_err(|_| missing())?;
    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(prefix) || is_partial(&name) {
            continue;
        }
        if let Ok(meta) = entry.metadata().await {
            if meta.is_file() && meta.len() > 0 {
                debug!("예상 경로 대신 찾은 파일: {name}");
                return Ok((entry.path(), meta.len()));
            }
        }
    }

    Err(missing())
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != io::ErrorKind::NotFound {
            debug!("임시 파일 삭제 실패 {}: {e}", path.display());
        }
    }
}

/// 결과 파일과 접두사가 같은 잔여 파일(.part 등)을 지운다. 오류는 무시.
async fn cleanup(job: &DownloadJob, dir: &Path) {
    if let Some(path) = &job.file_path {
        remove_quietly(path).await;
    }

    let Ok(mut entries) = tokio::fs::read_dir(dir).await else {
        return;
    };
    while let Ok(Some(entry)) = entries.next_entry().await {
        if entry.file_name().to_string_lossy().starts_with(&job.prefix) {
            remove_quietly(&entry.path()).await;
        }
    }
}
