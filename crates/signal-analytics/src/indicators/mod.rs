//! 기술적 지표 모듈.
//!
//! 바 스냅샷 하나로부터 차트 대시보드에 표시되는 지표들을 계산합니다.
//! 모든 계산은 순수 함수이며, 이력이 지표 기간보다 짧으면 오류 대신
//! `None`을 반환합니다.
//!
//! # 지원 지표
//!
//! ## 추세 지표 (Trend Indicators)
//! - **SMA**: 단순 이동평균 (Simple Moving Average)
//! - **EMA**: 지수 이동평균 (Exponential Moving Average)
//! - **MACD**: 이동평균 수렴/확산 (Moving Average Convergence Divergence)
//!
//! ## 모멘텀 지표 (Momentum Indicators)
//! - **RSI**: 상대강도지수 (Relative Strength Index)
//!
//! ## 변동성 지표 (Volatility Indicators)
//! - **Bollinger Bands**: 볼린저 밴드
//!
//! # 사용 예시
//!
//! ```ignore
//! use signal_analytics::indicators::{IndicatorEngine, IndicatorParams};
//!
//! let engine = IndicatorEngine::with_params(IndicatorParams::default())?;
//! let snapshot = engine.compute(&bars);
//! let votes = snapshot.votes(last_close);
//! ```

pub mod momentum;
pub mod trend;
pub mod volatility;

use serde::{Deserialize, Serialize};
use signal_core::{Bar, IndicatorSettings};
use thiserror::Error;

pub use momentum::{MomentumCalculator, RsiParams, RsiZone, RSI_OVERBOUGHT, RSI_OVERSOLD};
pub use trend::{EmaParams, MacdParams, MacdReading, SmaParams, TrendIndicators};
pub use volatility::{BollingerBands, BollingerBandsParams, VolatilityIndicators};

/// 지표 계산 오류.
#[derive(Debug, Error, PartialEq)]
pub enum IndicatorError {
    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// 지표 엔진 파라미터 묶음.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    /// RSI 파라미터
    pub rsi: RsiParams,
    /// MACD 파라미터
    pub macd: MacdParams,
    /// 볼린저 밴드 파라미터
    pub bollinger: BollingerBandsParams,
    /// 투표에 사용하는 단기 SMA
    pub sma: SmaParams,
    /// 참고용 장기 SMA
    pub sma_long: SmaParams,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi: RsiParams::default(),
            macd: MacdParams::default(),
            bollinger: BollingerBandsParams::default(),
            sma: SmaParams { period: 20 },
            sma_long: SmaParams { period: 50 },
        }
    }
}

impl From<&IndicatorSettings> for IndicatorParams {
    fn from(settings: &IndicatorSettings) -> Self {
        Self {
            rsi: RsiParams {
                period: settings.rsi_period,
            },
            macd: MacdParams {
                fast_period: settings.macd_fast,
                slow_period: settings.macd_slow,
                signal_period: settings.macd_signal,
            },
            bollinger: BollingerBandsParams {
                period: settings.bollinger_period,
                std_dev_multiplier: settings.bollinger_multiplier,
            },
            sma: SmaParams {
                period: settings.sma_period,
            },
            sma_long: SmaParams {
                period: settings.sma_long_period,
            },
        }
    }
}

impl IndicatorParams {
    /// 파라미터 유효성 검증.
    ///
    /// 모든 기간은 0보다 커야 하고, MACD 단기 기간은 장기 기간보다 짧아야
    /// 하며, 볼린저 배수는 양의 유한수여야 합니다.
    pub fn validate(&self) -> IndicatorResult<()> {
        let periods = [
            ("rsi.period", self.rsi.period),
            ("macd.fast_period", self.macd.fast_period),
            ("macd.slow_period", self.macd.slow_period),
            ("macd.signal_period", self.macd.signal_period),
            ("bollinger.period", self.bollinger.period),
            ("sma.period", self.sma.period),
            ("sma_long.period", self.sma_long.period),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, period)| *period == 0) {
            return Err(IndicatorError::InvalidParameter(format!(
                "{name}은(는) 0보다 커야 합니다"
            )));
        }

        if self.macd.fast_period >= self.macd.slow_period {
            return Err(IndicatorError::InvalidParameter(format!(
                "MACD 단기 기간({})은 장기 기간({})보다 짧아야 합니다",
                self.macd.fast_period, self.macd.slow_period
            )));
        }

        let k = self.bollinger.std_dev_multiplier;
        if !k.is_finite() || k <= 0.0 {
            return Err(IndicatorError::InvalidParameter(format!(
                "볼린저 표준편차 배수는 양수여야 합니다: {k}"
            )));
        }

        Ok(())
    }
}

/// 한 시점의 지표 값 모음.
///
/// 각 필드는 이력이 부족하면 `None`입니다.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// RSI
    pub rsi: Option<f64>,
    /// MACD
    pub macd: Option<MacdReading>,
    /// 볼린저 밴드
    pub bollinger: Option<BollingerBands>,
    /// 단기 SMA (기본 20)
    pub sma20: Option<f64>,
    /// 장기 SMA (기본 50). 표시용이며 투표하지 않음.
    pub sma50: Option<f64>,
}

impl IndicatorSnapshot {
    /// RSI 구간 (RSI가 있을 때).
    pub fn rsi_zone(&self) -> Option<RsiZone> {
        self.rsi.map(RsiZone::of)
    }
}

/// 통합 지표 엔진.
///
/// 검증된 파라미터를 보관하고 스냅샷 단위로 모든 지표를 계산합니다.
#[derive(Debug, Default, Clone)]
pub struct IndicatorEngine {
    params: IndicatorParams,
    trend: TrendIndicators,
    momentum: MomentumCalculator,
    volatility: VolatilityIndicators,
}

impl IndicatorEngine {
    /// 기본 파라미터로 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 주어진 파라미터로 엔진 생성.
    ///
    /// # 반환
    /// 파라미터가 유효하지 않으면 `IndicatorError::InvalidParameter`
    pub fn with_params(params: IndicatorParams) -> IndicatorResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            ..Self::default()
        })
    }

    /// 엔진 파라미터.
    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    /// 모든 지표 계산.
    ///
    /// # 인자
    /// * `bars` - 오래된 순서로 정렬된 바
    ///
    /// # 반환
    /// 각 지표의 최신 값 (이력 부족 시 `None`)
    pub fn compute(&self, bars: &[Bar]) -> IndicatorSnapshot {
        IndicatorSnapshot {
            rsi: self.momentum.rsi(bars, self.params.rsi),
            macd: self.trend.macd(bars, self.params.macd),
            bollinger: self.volatility.bollinger_bands(bars, self.params.bollinger),
            sma20: self.trend.sma(bars, self.params.sma),
            sma50: self.trend.sma(bars, self.params.sma_long),
        }
    }

    /// RSI 계산.
    pub fn rsi(&self, bars: &[Bar]) -> Option<f64> {
        self.momentum.rsi(bars, self.params.rsi)
    }

    /// MACD 계산.
    pub fn macd(&self, bars: &[Bar]) -> Option<MacdReading> {
        self.trend.macd(bars, self.params.macd)
    }

    /// 볼린저 밴드 계산.
    pub fn bollinger_bands(&self, bars: &[Bar]) -> Option<BollingerBands> {
        self.volatility.bollinger_bands(bars, self.params.bollinger)
    }

    /// 단기 SMA 계산.
    pub fn sma(&self, bars: &[Bar]) -> Option<f64> {
        self.trend.sma(bars, self.params.sma)
    }
}

/// 기본 파라미터로 모든 지표를 계산합니다.
pub fn compute_indicators(bars: &[Bar]) -> IndicatorSnapshot {
    IndicatorEngine::new().compute(bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(i as i64 * 60, c, c, c, c))
            .collect()
    }

    #[test]
    fn test_default_params_are_valid() {
        assert!(IndicatorParams::default().validate().is_ok());
        let from_settings = IndicatorParams::from(&IndicatorSettings::default());
        assert_eq!(from_settings, IndicatorParams::default());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let mut params = IndicatorParams::default();
        params.rsi.period = 0;
        assert!(matches!(
            IndicatorEngine::with_params(params),
            Err(IndicatorError::InvalidParameter(_))
        ));

        let mut params = IndicatorParams::default();
        params.macd.fast_period = 26;
        assert!(IndicatorEngine::with_params(params).is_err());

        let mut params = IndicatorParams::default();
        params.bollinger.std_dev_multiplier = 0.0;
        assert!(IndicatorEngine::with_params(params).is_err());
    }

    #[test]
    fn test_compute_empty_is_all_none() {
        let snapshot = compute_indicators(&[]);
        assert_eq!(snapshot, IndicatorSnapshot::default());
        assert_eq!(snapshot.rsi_zone(), None);
    }

    #[test]
    fn test_compute_partial_history() {
        // 25개: RSI, 볼린저, SMA20만 계산 가능
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        let snapshot = compute_indicators(&bars_from_closes(&closes));

        assert!(snapshot.rsi.is_some());
        assert!(snapshot.bollinger.is_some());
        assert!(snapshot.sma20.is_some());
        assert!(snapshot.macd.is_none());
        assert!(snapshot.sma50.is_none());
        assert_eq!(snapshot.rsi_zone(), Some(RsiZone::Overbought));
    }

    #[test]
    fn test_compute_full_history() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin()).collect();
        let snapshot = compute_indicators(&bars_from_closes(&closes));

        assert!(snapshot.rsi.is_some());
        assert!(snapshot.macd.is_some());
        assert!(snapshot.bollinger.is_some());
        assert!(snapshot.sma20.is_some());
        assert!(snapshot.sma50.is_some());
    }

    #[test]
    fn test_custom_periods_used() {
        let params = IndicatorParams {
            rsi: RsiParams { period: 3 },
            ..Default::default()
        };
        let engine = IndicatorEngine::with_params(params).unwrap();
        let bars = bars_from_closes(&[1.0, 2.0, 3.0, 4.0]);

        assert!(engine.rsi(&bars).is_some());
        assert!(compute_indicators(&bars).rsi.is_none());
    }
}
