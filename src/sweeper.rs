use std::io;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// 작업 디렉터리에서 보존 기간이 지난 파일을 주기적으로 지운다.
/// 대기 목록에는 접근하지 않는다.
#[derive(Clone, Debug)]
pub struct Sweeper {
    pub dir: PathBuf,
    /// 절대 지우지 않는 파일 이름 (쿠키 파일)
    pub reserved: String,
    pub retention: Duration,
    pub interval: Duration,
    /// 디렉터리 자체를 읽지 못했을 때의 재시도 간격
    pub retry_interval: Duration,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub deleted: Vec<String>,
    pub failed: usize,
}

impl Sweeper {
    /// 한 번의 정리 주기. 나이가 보존 기간을 *초과*한 일반 파일만 지운다.
    ///
    /// 개별 파일 실패는 기록만 하고 계속 진행한다. 디렉터리가 없으면 아무것도 하지 않는다.
    pub async fn sweep_once(&self, now: SystemTime) -> io::Result<SweepReport> {
        let (expired, failed) = self.collect_expired(now).await?;
        let mut report = remove_all(expired).await;
        report.failed += failed;
        Ok(report)
    }

    /// 지울 파일 목록과 정보 조회에 실패한 항목 수
    async fn collect_expired(
        &self,
        now: SystemTime,
    ) -> io::Result<(Vec<(String, PathBuf)>, usize)> {
        let mut expired = Vec::new();
        let mut failed = 0;

        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok((expired, failed)),
            Err(e) => return Err(e),
        };

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == self.reserved {
                continue;
            }

            let metadata = match entry.metadata().await {
                Ok(m) => m,
                Err(e) => {
                    warn!("파일 정보 조회 실패 {name}: {e}");
                    failed += 1;
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }

            let modified = match metadata.modified() {
                Ok(t) => t,
                Err(e) => {
                    warn!("수정 시각 조회 실패 {name}: {e}");
                    failed += 1;
                    continue;
                }
            };
            // mtime이 미래면 나이 0
            let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
            if age > self.retention {
                expired.push((name, entry.path()));
            }
        }

        Ok((expired, failed))
    }

    /// 직전 주기 결과에 따른 대기 시간. 디렉터리 오류면 더 짧게 재시도한다.
    pub fn pause_after(&self, result: &io::Result<SweepReport>) -> Duration {
        match result {
            Ok(_) => self.interval,
            Err(_) => self.retry_interval,
        }
    }

    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }

    pub async fn run(&self, shutdown: CancellationToken) {
        info!(
            "정리 작업 시작: {} (보존 {}시간)",
            self.dir.display(),
            self.retention.as_secs() / 3600
        );

        loop {
            debug!("오래된 파일 확인 중...");
            let result = self.sweep_once(SystemTime::now()).await;
            match &result {
                Ok(report) if !report.deleted.is_empty() || report.failed > 0 => info!(
                    "정리 완료: 삭제 {}개, 실패 {}개",
                    report.deleted.len(),
                    report.failed
                ),
                Ok(_) => {}
                Err(e) => error!("정리 오류: {e}"),
            }
            let pause = self.pause_after(&result);

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(pause) => {}
            }
        }

        info!("정리 작업 종료");
    }
}

/// 하나가 실패해도 나머지는 계속 지운다.
async fn remove_all(expired: Vec<(String, PathBuf)>) -> SweepReport {
    let mut report = SweepReport::default();
    for (name, path) in expired {
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!("오래된 파일 삭제: {name}");
                report.deleted.push(name);
            }
            Err(e) => {
                warn!("파일 삭제 실패 {name}: {e}");
                report.failed += 1;
            }
        }
    }
    report
}
