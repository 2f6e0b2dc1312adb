use std::sync::Arc;

use teloxide::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use yt_fetch_bot::download::engine::YtDlp;
use yt_fetch_bot::pending::PendingStore;
use yt_fetch_bot::{config, events, Data};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::Config::from_env();

    if let Err(e) = tokio::fs::create_dir_all(&config.download_dir).await {
        tracing::error!(
            "다운로드 폴더 생성 실패 {}: {e}",
            config.download_dir.display()
        );
    }

    let cookies = config.cookies_path();
    if cookies.is_file() {
        tracing::info!("쿠키 파일 확인: {}", cookies.display());
    } else {
        tracing::warn!("쿠키 파일 없음: 일부 영상은 다운로드에 실패할 수 있습니다");
    }

    // 백그라운드 정리 작업
    let shutdown = CancellationToken::new();
    let sweeper = config.sweeper().spawn(shutdown.clone());

    // 큰 파일 업로드를 위해 기본 타임아웃을 늘린다
    let http = teloxide::net::default_reqwest_settings()
        .timeout(config.upload_timeout())
        .build()
        .expect("HTTP 클라이언트 생성 실패");
    let bot = Bot::with_client(config.bot_token.clone(), http);

    let data = Arc::new(Data {
        pending: PendingStore::new(),
        settings: config.download_settings(),
        engine: Arc::new(YtDlp::new(config.ytdlp_bin.clone())),
    });

    tracing::info!("봇이 실행 중입니다...");
    Dispatcher::builder(bot, events::schema())
        .dependencies(dptree::deps![data])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    shutdown.cancel();
    if let Err(e) = sweeper.await {
        tracing::error!("정리 작업 종료 오류: {e}");
    }
}
