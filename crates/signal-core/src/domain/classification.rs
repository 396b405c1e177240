//! 원격 차트 분류기 응답.
//!
//! 비전-언어 모델은 차트 이미지를 보고 자유 형식 텍스트 안에 JSON 객체를
//! 담아 응답합니다. 엔진은 모델을 호출하지 않으며, 이 모듈은 응답 텍스트를
//! 받아 계약에 맞는 [`ChartClassification`]으로 정규화하는 일만 합니다.
//!
//! 정규화 규칙:
//! - `signal`이 인식되지 않으면 NEUTRAL
//! - `confidence`가 0~100 사이의 숫자가 아니면 50
//! - `chartData`의 각 캔들에 1분 간격 타임스탬프를 현재 시각 기준으로 부여
//! - 누락된 가격은 0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Bar, SignalVote};
use crate::error::{SignalError, SignalResult};

/// 신뢰도 값이 유효하지 않을 때 사용하는 기본값.
pub const DEFAULT_CONFIDENCE: f64 = 50.0;

/// 추출된 캔들 사이의 간격 (초).
pub const EXTRACTED_BAR_INTERVAL_SECS: i64 = 60;

/// 정규화된 차트 분류 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartClassification {
    /// 분류기 신호
    pub signal: SignalVote,
    /// 신뢰도 (0 ~ 100)
    pub confidence: f64,
    /// 분석 설명
    pub analysis: String,
    /// 분류기가 식별한 패턴 이름
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// 이미지에서 추출된 캔들 (오래된 것부터)
    pub chart_data: Vec<Bar>,
    /// 분류기가 제시한 지지선
    pub supports: Vec<f64>,
    /// 분류기가 제시한 저항선
    pub resistances: Vec<f64>,
}

impl ChartClassification {
    /// 모델 응답 텍스트에서 JSON 객체를 찾아 정규화합니다.
    ///
    /// 텍스트의 첫 `{`부터 마지막 `}`까지를 JSON으로 해석합니다.
    pub fn from_model_text(text: &str, now: DateTime<Utc>) -> SignalResult<Self> {
        let json = extract_json_object(text).ok_or_else(|| {
            SignalError::InvalidInput("Invalid response format from classifier".to_string())
        })?;
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value, now)
    }

    /// 이미 파싱된 JSON 값을 정규화합니다.
    pub fn from_value(value: &Value, now: DateTime<Utc>) -> SignalResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            SignalError::InvalidInput("Classifier response is not a JSON object".to_string())
        })?;

        let signal = object
            .get("signal")
            .and_then(Value::as_str)
            .and_then(SignalVote::parse)
            .unwrap_or_default();

        let confidence = object
            .get("confidence")
            .and_then(Value::as_f64)
            .filter(|c| (0.0..=100.0).contains(c))
            .unwrap_or(DEFAULT_CONFIDENCE);

        let analysis = object
            .get("analysis")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let pattern = object
            .get("pattern")
            .and_then(Value::as_str)
            .map(str::to_string);

        let chart_data = object
            .get("chartData")
            .and_then(Value::as_array)
            .map(|candles| stamp_candles(candles, now.timestamp()))
            .unwrap_or_default();

        Ok(Self {
            signal,
            confidence,
            analysis,
            pattern,
            chart_data,
            supports: number_list(object.get("supports")),
            resistances: number_list(object.get("resistances")),
        })
    }
}

/// 텍스트에서 첫 `{`부터 마지막 `}`까지의 구간을 반환합니다.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

fn stamp_candles(candles: &[Value], now_secs: i64) -> Vec<Bar> {
    let count = candles.len() as i64;
    candles
        .iter()
        .enumerate()
        .map(|(index, candle)| {
            let price = |key: &str| candle.get(key).and_then(Value::as_f64).unwrap_or(0.0);
            let time = now_secs - (count - 1 - index as i64) * EXTRACTED_BAR_INTERVAL_SECS;
            Bar::new(time, price("open"), price("high"), price("low"), price("close"))
        })
        .collect()
}

fn number_list(value: Option<&Value>) -> Vec<f64> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_f64).collect())
        .unwrap_or_default()
}
