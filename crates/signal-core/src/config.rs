//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다. 값은 기본값,
//! 설정 파일(TOML 등), `SIGNAL__` 접두사 환경 변수 순서로 덮어씁니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SignalError, SignalResult};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 지표 기간 설정
    pub indicators: IndicatorSettings,
    /// 합성 시세 피드 설정
    pub feed: FeedConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 지표 기간 설정.
///
/// 투표 임계값(RSI 30/70 등)은 고정이며 설정 대상이 아닙니다.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IndicatorSettings {
    /// RSI 기간
    pub rsi_period: usize,
    /// MACD 단기 EMA 기간
    pub macd_fast: usize,
    /// MACD 장기 EMA 기간
    pub macd_slow: usize,
    /// MACD 시그널 기간
    pub macd_signal: usize,
    /// 볼린저 밴드 기간
    pub bollinger_period: usize,
    /// 볼린저 밴드 표준편차 배수
    pub bollinger_multiplier: f64,
    /// 투표에 사용하는 단기 SMA 기간
    pub sma_period: usize,
    /// 참고용 장기 SMA 기간
    pub sma_long_period: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_multiplier: 2.0,
            sma_period: 20,
            sma_long_period: 50,
        }
    }
}

/// 합성 시세 피드 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedConfig {
    /// 시작 가격
    pub base_price: f64,
    /// 바 하나당 최대 가격 변동폭
    pub volatility: f64,
    /// 초기 생성 바 수
    pub initial_bars: usize,
    /// 버퍼 최대 길이
    pub capacity: usize,
    /// 바 간격 (초)
    pub bar_interval_secs: i64,
    /// 실시간 모드의 새 바 생성 주기 (밀리초)
    pub tick_interval_ms: u64,
    /// 난수 시드 (없으면 엔트로피 사용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_price: 1.0850,
            volatility: 0.0015,
            initial_bars: 50,
            capacity: 100,
            bar_interval_secs: 60,
            tick_interval_ms: 5000,
            seed: None,
        }
    }
}

impl FeedConfig {
    /// 설정 값의 범위를 검증합니다.
    pub fn validate(&self) -> SignalResult<()> {
        if !(self.base_price > 0.0) {
            return Err(SignalError::Config(format!(
                "feed.base_price must be positive, got {}",
                self.base_price
            )));
        }
        if !(self.volatility >= 0.0) {
            return Err(SignalError::Config(format!(
                "feed.volatility must not be negative, got {}",
                self.volatility
            )));
        }
        if self.capacity == 0 {
            return Err(SignalError::Config("feed.capacity must be > 0".to_string()));
        }
        if self.bar_interval_secs <= 0 {
            return Err(SignalError::Config(
                "feed.bar_interval_secs must be > 0".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(SignalError::Config(
                "feed.tick_interval_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> SignalResult<Self> {
        Self::build(Some(path.as_ref()))
    }

    /// 파일 없이 기본값과 환경 변수만으로 설정을 로드합니다.
    pub fn load_env() -> SignalResult<Self> {
        Self::build(None)
    }

    fn build(path: Option<&Path>) -> SignalResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        let builder = builder.add_source(
            config::Environment::with_prefix("SIGNAL")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.feed.validate()?;

        tracing::debug!(path = ?path, "Configuration loaded");
        Ok(config)
    }
}
