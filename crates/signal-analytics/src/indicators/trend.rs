//! 추세 지표 (Trend Indicators).
//!
//! 이동평균 기반의 추세 지표들을 제공합니다.
//! - SMA (Simple Moving Average)
//! - EMA (Exponential Moving Average)
//! - MACD (Moving Average Convergence Divergence)

use serde::{Deserialize, Serialize};
use signal_core::Bar;

/// SMA 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// EMA 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

/// MACD 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdParams {
    /// 단기 EMA 기간 (기본: 12).
    pub fast_period: usize,
    /// 장기 EMA 기간 (기본: 26).
    pub slow_period: usize,
    /// 시그널 라인 기간 (기본: 9).
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// MACD 최신 값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdReading {
    /// MACD 라인 (단기 EMA - 장기 EMA).
    pub macd: f64,
    /// 시그널 라인 (MACD의 EMA).
    pub signal: f64,
    /// 히스토그램 (MACD - 시그널).
    pub histogram: f64,
}

/// 추세 지표 계산기.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 단순 이동평균 (SMA) 계산.
    ///
    /// 마지막 `period`개 종가의 평균입니다. 바가 `period`개보다 적으면 `None`.
    pub fn sma(&self, bars: &[Bar], params: SmaParams) -> Option<f64> {
        let period = params.period;
        if period == 0 || bars.len() < period {
            return None;
        }

        let sum: f64 = bars[bars.len() - period..].iter().map(|b| b.close).sum();
        Some(sum / period as f64)
    }

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// EMA = (현재값 × k) + (이전 EMA × (1 - k)), k = 2 / (period + 1)
    ///
    /// 처음 `period`개 값의 단순 평균을 시드로 삼아 첫 원소로 내보내므로
    /// 결과 길이는 `len - period + 1`입니다. 데이터가 부족하면 빈 벡터.
    pub fn ema(&self, values: &[f64], params: EmaParams) -> Vec<f64> {
        let period = params.period;
        if period == 0 || values.len() < period {
            return Vec::new();
        }

        let k = 2.0 / (period as f64 + 1.0);
        let mut result = Vec::with_capacity(values.len() - period + 1);

        // 첫 EMA는 SMA로 시작
        let mut ema = values[..period].iter().sum::<f64>() / period as f64;
        result.push(ema);

        for value in &values[period..] {
            ema = value * k + ema * (1.0 - k);
            result.push(ema);
        }

        result
    }

    /// MACD 계산.
    ///
    /// MACD 라인 = 단기 EMA - 장기 EMA
    /// 시그널 라인 = MACD 라인의 EMA
    /// 히스토그램 = MACD 라인 - 시그널 라인
    ///
    /// 두 EMA 시리즈는 시간축이 아니라 인덱스로 맞춥니다. 단기 EMA가 더
    /// 길기 때문에 장기 EMA가 끝난 뒤에는 장기 EMA의 마지막 값을 반복해
    /// 사용합니다. 바가 `slow + signal`개보다 적으면 `None`.
    pub fn macd(&self, bars: &[Bar], params: MacdParams) -> Option<MacdReading> {
        if params.fast_period == 0 || params.slow_period == 0 || params.signal_period == 0 {
            return None;
        }
        if bars.len() < params.slow_period + params.signal_period {
            return None;
        }

        let closes = signal_core::closes(bars);
        let fast_ema = self.ema(&closes, EmaParams { period: params.fast_period });
        let slow_ema = self.ema(&closes, EmaParams { period: params.slow_period });
        let slow_last = *slow_ema.last()?;

        let macd_line: Vec<f64> = fast_ema
            .iter()
            .enumerate()
            .map(|(i, fast)| fast - slow_ema.get(i).copied().unwrap_or(slow_last))
            .collect();

        let signal_line = self.ema(&macd_line, EmaParams { period: params.signal_period });

        let macd = *macd_line.last()?;
        let signal = *signal_line.last()?;

        Some(MacdReading {
            macd,
            signal,
            histogram: macd - signal,
        })
    }
}
