//! 변동성 지표 (Volatility Indicators).
//!
//! 가격 변동성을 측정하는 지표들을 제공합니다.
//! - Bollinger Bands (볼린저 밴드)

use serde::{Deserialize, Serialize};
use signal_core::Bar;

/// 볼린저 밴드 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBandsParams {
    /// 이동평균 기간 (기본: 20).
    pub period: usize,
    /// 표준편차 배수 (기본: 2.0).
    pub std_dev_multiplier: f64,
}

impl Default for BollingerBandsParams {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

/// 볼린저 밴드 최신 값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    /// 상단 밴드 (MA + k × σ).
    pub upper: f64,
    /// 중간 밴드 (이동평균).
    pub middle: f64,
    /// 하단 밴드 (MA - k × σ).
    pub lower: f64,
}

impl BollingerBands {
    /// 밴드 폭 ((상단 - 하단) / 중간). 중간값이 0이면 `None`.
    pub fn bandwidth(&self) -> Option<f64> {
        if self.middle == 0.0 {
            return None;
        }
        Some((self.upper - self.lower) / self.middle)
    }

    /// %B ((가격 - 하단) / (상단 - 하단)). 밴드 폭이 0이면 `None`.
    pub fn percent_b(&self, price: f64) -> Option<f64> {
        let width = self.upper - self.lower;
        if width == 0.0 {
            return None;
        }
        Some((price - self.lower) / width)
    }
}

/// 변동성 지표 계산기.
#[derive(Debug, Default, Clone, Copy)]
pub struct VolatilityIndicators;

impl VolatilityIndicators {
    /// 새로운 변동성 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 볼린저 밴드 계산.
    ///
    /// 마지막 `period`개 종가의 모평균과 모표준편차(분산을 `period`로 나눔)를
    /// 사용합니다. 바가 `period`개보다 적으면 `None`.
    pub fn bollinger_bands(
        &self,
        bars: &[Bar],
        params: BollingerBandsParams,
    ) -> Option<BollingerBands> {
        let period = params.period;
        if period == 0 || bars.len() < period {
            return None;
        }

        let window = &bars[bars.len() - period..];
        let n = period as f64;
        let mean = window.iter().map(|b| b.close).sum::<f64>() / n;
        let variance = window
            .iter()
            .map(|b| (b.close - mean).powi(2))
            .sum::<f64>()
            / n;
        let std_dev = variance.sqrt();
        let k = params.std_dev_multiplier;

        Some(BollingerBands {
            upper: mean + k * std_dev,
            middle: mean,
            lower: mean - k * std_dev,
        })
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
    fn test_bollinger_constant_series_collapses() {
        let volatility = VolatilityIndicators::new();
        let bars = bars_from_closes(&[100.0; 20]);

        let bands = volatility
            .bollinger_bands(&bars, BollingerBandsParams::default())
            .unwrap();

        assert_eq!(bands.upper, 100.0);
        assert_eq!(bands.middle, 100.0);
        assert_eq!(bands.lower, 100.0);
        assert_eq!(bands.percent_b(100.0), None);
    }

    #[test]
    fn test_bollinger_population_std_dev() {
        let volatility = VolatilityIndicators::new();
        // 평균 5, 모분산 4 → σ = 2
        let bars = bars_from_closes(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let params = BollingerBandsParams {
            period: 8,
            std_dev_multiplier: 2.0,
        };

        let bands = volatility.bollinger_bands(&bars, params).unwrap();

        assert_eq!(bands.middle, 5.0);
        assert_eq!(bands.upper, 9.0);
        assert_eq!(bands.lower, 1.0);
        assert_eq!(bands.bandwidth(), Some(1.6));
        assert_eq!(bands.percent_b(5.0), Some(0.5));
    }

    #[test]
    fn test_bollinger_uses_last_period_only() {
        let volatility = VolatilityIndicators::new();
        let mut closes = vec![1000.0; 5];
        closes.extend([10.0; 20]);

        let bands = volatility
            .bollinger_bands(&bars_from_closes(&closes), BollingerBandsParams::default())
            .unwrap();
        assert_eq!(bands.middle, 10.0);
    }

    #[test]
    fn test_bollinger_insufficient_data() {
        let volatility = VolatilityIndicators::new();
        let bars = bars_from_closes(&[1.0; 19]);
        assert!(volatility
            .bollinger_bands(&bars, BollingerBandsParams::default())
            .is_none());
    }
}
