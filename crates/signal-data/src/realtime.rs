//! 실시간 피드 드라이버.
//!
//! 타이머마다 데이터 소스를 한 칸 진행시키고, 새 스냅샷을
//! `tokio::sync::watch` 채널로 발행합니다. 소비자는 항상 최신 스냅샷만
//! 보며, 처리하지 못한 중간 스냅샷은 건너뜁니다.

use std::time::Duration;

use signal_core::BarSnapshot;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::source::BarSource;

/// 허용하는 최소 생성 주기. 이보다 짧은 주기는 이 값으로 올립니다.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// 백그라운드에서 실행 중인 실시간 피드.
#[derive(Debug)]
pub struct RealtimeFeed {
    receiver: watch::Receiver<BarSnapshot>,
    handle: JoinHandle<()>,
    cancel: CancellationToken,
}

impl RealtimeFeed {
    /// 드라이버 태스크를 시작합니다.
    ///
    /// 첫 번째 새 바는 `period` 후에 생성됩니다. `cancel`이 취소되거나
    /// 모든 구독자가 사라지면 태스크가 종료됩니다. `period`가
    /// [`MIN_PERIOD`]보다 짧으면 [`MIN_PERIOD`]를 사용합니다.
    ///
    /// # 인자
    /// * `source` - 바를 생성할 데이터 소스
    /// * `period` - 새 바 생성 주기
    /// * `cancel` - 종료 토큰
    pub fn spawn<S>(mut source: S, period: Duration, cancel: CancellationToken) -> Self
    where
        S: BarSource + 'static,
    {
        let period = if period < MIN_PERIOD {
            warn!(?period, "Realtime feed period too short, using minimum");
            MIN_PERIOD
        } else {
            period
        };
        let (sender, receiver) = watch::channel(source.snapshot());
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            info!(source = source.name(), ?period, "Realtime feed started");

            let mut ticker = tokio::time::interval(period);
            // interval의 첫 틱은 즉시 완료되므로 소비
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let bar = source.advance();
                        let snapshot = source.snapshot();
                        debug!(version = snapshot.version, time = bar.time, "Snapshot published");

                        if sender.send(snapshot).is_err() {
                            debug!("All subscribers dropped");
                            break;
                        }
                    }

                    _ = token.cancelled() => {
                        break;
                    }
                }
            }

            info!(source = source.name(), "Realtime feed stopped");
        });

        Self {
            receiver,
            handle,
            cancel,
        }
    }

    /// 새 구독자를 생성합니다.
    pub fn subscribe(&self) -> watch::Receiver<BarSnapshot> {
        self.receiver.clone()
    }

    /// 가장 최근에 발행된 스냅샷.
    pub fn latest(&self) -> BarSnapshot {
        self.receiver.borrow().clone()
    }

    /// 드라이버를 취소하고 태스크가 끝날 때까지 기다립니다.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            warn!("Realtime feed task ended abnormally: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::SyntheticFeed;
    use signal_core::FeedConfig;

    fn feed() -> SyntheticFeed {
        let config = FeedConfig {
            seed: Some(11),
            ..Default::default()
        };
        SyntheticFeed::starting_at(config, 1_700_000_000)
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_one_snapshot_per_tick() {
        let cancel = CancellationToken::new();
        let realtime = RealtimeFeed::spawn(feed(), Duration::from_secs(5), cancel.clone());
        let mut rx = realtime.subscribe();

        assert_eq!(rx.borrow_and_update().version, 50);

        for expected in 51..=53 {
            rx.changed().await.unwrap();
            let snapshot = rx.borrow_and_update().clone();
            assert_eq!(snapshot.version, expected);
            assert_eq!(snapshot.len(), (expected as usize).min(100));
        }

        realtime.shutdown().await;
        assert!(cancel.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_bar_before_first_period() {
        let cancel = CancellationToken::new();
        let realtime = RealtimeFeed::spawn(feed(), Duration::from_secs(5), cancel.clone());

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(realtime.latest().version, 50);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(realtime.latest().version, 51);

        realtime.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_uses_minimum() {
        let realtime = RealtimeFeed::spawn(feed(), Duration::ZERO, CancellationToken::new());
        let mut rx = realtime.subscribe();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().version, 51);

        realtime.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_external_cancel_stops_task() {
        let cancel = CancellationToken::new();
        let realtime = RealtimeFeed::spawn(feed(), Duration::from_secs(1), cancel.clone());
        let mut rx = realtime.subscribe();

        cancel.cancel();
        // 송신자가 사라지면 changed()는 에러
        while rx.changed().await.is_ok() {}

        let version = realtime.latest().version;
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(realtime.latest().version, version);
        realtime.shutdown().await;
    }
}
