//! 합성 피드 실시간 시뮬레이션 명령.
//!
//! 합성 피드를 실시간 드라이버로 돌리면서 새 스냅샷마다 분석 결과를
//! 출력합니다. Ctrl-C로 중단할 수 있습니다.

use std::time::Duration;

use anyhow::{Context, Result};
use signal_analytics::{AnalysisReport, ChartAnalyzer};
use signal_core::{AppConfig, FeedConfig};
use signal_data::{RealtimeFeed, SyntheticFeed};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::output::{render_report, to_json, OutputFormat};

/// 시뮬레이션 설정.
#[derive(Debug, Clone)]
pub struct SimulateConfig {
    /// 생성할 새 바 수
    pub ticks: usize,
    /// 바 생성 주기 (지정하지 않으면 설정 파일 값)
    pub interval_ms: Option<u64>,
    /// 난수 시드 (지정하지 않으면 설정 파일 값)
    pub seed: Option<u64>,
    /// 출력 형식
    pub format: OutputFormat,
}

/// 명령행 옵션을 피드 설정에 덮어씁니다.
fn feed_config(base: &FeedConfig, options: &SimulateConfig) -> FeedConfig {
    let mut feed = base.clone();
    if let Some(interval_ms) = options.interval_ms {
        feed.tick_interval_ms = interval_ms;
    }
    if options.seed.is_some() {
        feed.seed = options.seed;
    }
    feed
}

fn emit(report: &AnalysisReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_report(report)),
        OutputFormat::Json => println!("{}", to_json(report)?),
    }
    Ok(())
}

/// 시뮬레이션을 실행하고 `on_report`에 넘긴 보고서 수를 반환합니다.
///
/// 첫 보고서는 초기 바에 대한 것이며, 이후 새 바마다 하나씩 이어집니다.
/// 보고서는 보관하지 않습니다. `cancel`이 취소되면 남은 틱을 기다리지
/// 않고 끝냅니다.
pub async fn simulate(
    config: &AppConfig,
    options: &SimulateConfig,
    cancel: CancellationToken,
    mut on_report: impl FnMut(&AnalysisReport) -> Result<()>,
) -> Result<usize> {
    let feed = feed_config(&config.feed, options);
    let analyzer = ChartAnalyzer::from_settings(&config.indicators)
        .context("Invalid indicator settings")?;
    let source = SyntheticFeed::from_config(&feed).context("Invalid feed settings")?;

    let realtime = RealtimeFeed::spawn(
        source,
        Duration::from_millis(feed.tick_interval_ms),
        cancel.child_token(),
    );
    let mut rx = realtime.subscribe();

    let initial = analyzer.analyze(&rx.borrow_and_update());
    on_report(&initial)?;
    let mut reports = 1;

    while reports <= options.ticks {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    warn!("Realtime feed closed early");
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                on_report(&analyzer.analyze(&snapshot))?;
                reports += 1;
            }

            _ = cancel.cancelled() => {
                info!("Simulation interrupted");
                break;
            }
        }
    }

    realtime.shutdown().await;
    Ok(reports)
}

/// `simulate` 명령 실행.
pub async fn run(config: &AppConfig, options: SimulateConfig) -> Result<()> {
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let format = options.format;
    let reports = simulate(config, &options, cancel, |report| emit(report, format)).await?;

    info!(reports, "Simulation finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(ticks: usize) -> SimulateConfig {
        SimulateConfig {
            ticks,
            interval_ms: Some(1000),
            seed: Some(2024),
            format: OutputFormat::Json,
        }
    }

    #[test]
    fn test_cli_options_override_feed() {
        let base = FeedConfig::default();
        let feed = feed_config(&base, &options(3));
        assert_eq!(feed.tick_interval_ms, 1000);
        assert_eq!(feed.seed, Some(2024));

        let untouched = feed_config(
            &base,
            &SimulateConfig {
                interval_ms: None,
                seed: None,
                ..options(3)
            },
        );
        assert_eq!(untouched, base);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulation_reports_each_tick() {
        let mut seen = Vec::new();
        let count = simulate(
            &AppConfig::default(),
            &options(3),
            CancellationToken::new(),
            |report| {
                seen.push((report.version, report.bar_count));
                Ok(())
            },
        )
        .await
        .unwrap();

        assert_eq!(count, 4);
        assert_eq!(seen, vec![(50, 50), (51, 51), (52, 52), (53, 53)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_simulation_returns_initial_report() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let count = simulate(&AppConfig::default(), &options(10), cancel, |_| Ok(()))
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
