//! 모멘텀 지표 (Momentum Indicators).
//!
//! 가격 모멘텀과 과매수/과매도 상태를 측정합니다.
//! - RSI (Relative Strength Index)

use serde::{Deserialize, Serialize};
use signal_core::Bar;

/// 평균 하락폭이 0일 때 사용하는 RS 값.
///
/// 무한대 대신 100으로 포화시키므로 RSI는 100이 아니라
/// `100 - 100 / 101 ≈ 99.01`이 됩니다. 상승/하락이 모두 없는 구간에도
/// 같은 값이 적용됩니다.
pub const RS_SATURATION: f64 = 100.0;

/// 과매도 기준.
pub const RSI_OVERSOLD: f64 = 30.0;

/// 과매수 기준.
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// RSI 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiParams {
    /// RSI 기간 (기본: 14).
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// RSI 구간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    /// 과매도 (RSI < 30)
    Oversold,
    /// 중립
    Neutral,
    /// 과매수 (RSI > 70)
    Overbought,
}

impl RsiZone {
    /// RSI 값이 속한 구간.
    pub fn of(rsi: f64) -> Self {
        if rsi < RSI_OVERSOLD {
            RsiZone::Oversold
        } else if rsi > RSI_OVERBOUGHT {
            RsiZone::Overbought
        } else {
            RsiZone::Neutral
        }
    }
}

impl std::fmt::Display for RsiZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RsiZone::Oversold => write!(f, "oversold"),
            RsiZone::Neutral => write!(f, "neutral"),
            RsiZone::Overbought => write!(f, "overbought"),
        }
    }
}

/// 모멘텀 지표 계산기.
#[derive(Debug, Default, Clone, Copy)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// RSI (Relative Strength Index) 계산.
    ///
    /// RSI = 100 - (100 / (1 + RS))
    /// RS = 평균 상승폭 / 평균 하락폭
    ///
    /// 마지막 `period`개 종가 변화만 사용하는 단순 평균 방식입니다.
    /// 상승폭과 하락폭 모두 변화 개수가 아니라 `period`로 나눕니다.
    /// 바가 `period + 1`개보다 적으면 `None`.
    pub fn rsi(&self, bars: &[Bar], params: RsiParams) -> Option<f64> {
        let period = params.period;
        if period == 0 || bars.len() < period + 1 {
            return None;
        }

        let recent = &bars[bars.len() - period - 1..];
        let (gain_sum, loss_sum) = recent
            .windows(2)
            .map(|pair| pair[1].close - pair[0].close)
            .fold((0.0, 0.0), |(gain, loss), delta| {
                if delta > 0.0 {
                    (gain + delta, loss)
                } else if delta < 0.0 {
                    (gain, loss - delta)
                } else {
                    (gain, loss)
                }
            });

        let avg_gain = gain_sum / period as f64;
        let avg_loss = loss_sum / period as f64;

        let rs = if avg_loss == 0.0 {
            RS_SATURATION
        } else {
            avg_gain / avg_loss
        };

        Some(100.0 - 100.0 / (1.0 + rs))
    }
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
    fn test_rsi_needs_period_plus_one_bars() {
        let momentum = MomentumCalculator::new();
        let closes: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();

        assert!(momentum.rsi(&bars_from_closes(&closes), RsiParams::default()).is_none());
        assert!(momentum.rsi(&[], RsiParams::default()).is_none());
        assert!(momentum.rsi(&bars_from_closes(&closes), RsiParams { period: 0 }).is_none());
    }

    #[test]
    fn test_rsi_saturates_without_losses() {
        let momentum = MomentumCalculator::new();
        let closes = [
            10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0,
            16.0,
        ];

        let rsi = momentum.rsi(&bars_from_closes(&closes), RsiParams::default()).unwrap();

        assert_eq!(rsi, 100.0 - 100.0 / 101.0);
        assert!((rsi - 99.0099).abs() < 1e-4);
    }

    #[test]
    fn test_rsi_flat_series_also_saturates() {
        let momentum = MomentumCalculator::new();
        let rsi = momentum.rsi(&bars_from_closes(&[5.0; 20]), RsiParams::default()).unwrap();
        assert_eq!(rsi, 100.0 - 100.0 / 101.0);
    }

    #[test]
    fn test_rsi_only_uses_last_period_deltas() {
        let momentum = MomentumCalculator::new();
        // 앞쪽의 큰 하락은 창 밖에 있으므로 무시됨
        let mut closes = vec![100.0, 50.0];
        closes.extend((0..14).map(|i| 50.0 + i as f64));

        let rsi = momentum.rsi(&bars_from_closes(&closes), RsiParams::default()).unwrap();
        assert!(rsi > 99.0);
    }

    #[test]
    fn test_rsi_balanced_moves() {
        let momentum = MomentumCalculator::new();
        // +1, -1 반복: 평균 상승 = 평균 하락 → RS = 1 → RSI = 50
        let closes: Vec<f64> = (0..15).map(|i| if i % 2 == 0 { 10.0 } else { 11.0 }).collect();

        let rsi = momentum.rsi(&bars_from_closes(&closes), RsiParams::default()).unwrap();
        assert!((rsi - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_rsi_falling_market_is_low() {
        let momentum = MomentumCalculator::new();
        let closes: Vec<f64> = (0..20).map(|i| 200.0 - i as f64).collect();

        let rsi = momentum.rsi(&bars_from_closes(&closes), RsiParams::default()).unwrap();
        assert_eq!(rsi, 0.0);
        assert_eq!(RsiZone::of(rsi), RsiZone::Oversold);
    }

    #[test]
    fn test_rsi_zone_boundaries() {
        assert_eq!(RsiZone::of(29.99), RsiZone::Oversold);
        assert_eq!(RsiZone::of(30.0), RsiZone::Neutral);
        assert_eq!(RsiZone::of(70.0), RsiZone::Neutral);
        assert_eq!(RsiZone::of(70.01), RsiZone::Overbought);
    }
}
