//! OHLCV 바 데이터.
//!
//! 엔진이 소비하는 유일한 시장 데이터 단위입니다. 바는 생성 이후 변경되지
//! 않으며, OHLC 일관성(`low ≤ min(open, close)`, `high ≥ max(open, close)`)은
//! 데이터 소스의 책임으로 엔진에서 검증하지 않습니다.

use serde::{Deserialize, Serialize};

/// OHLCV 캔들스틱 바.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// 바 시작 시간 (유닉스 초, 단조 증가)
    pub time: i64,
    /// 시가
    pub open: f64,
    /// 고가
    pub high: f64,
    /// 저가
    pub low: f64,
    /// 종가
    pub close: f64,
    /// 거래량 (선택)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl Bar {
    /// 새 바를 생성합니다.
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    /// 거래량을 설정합니다.
    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// 캔들 몸통 크기(절대값)를 반환합니다.
    pub fn body_size(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// 윗꼬리 길이를 반환합니다.
    pub fn upper_wick(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    /// 아랫꼬리 길이를 반환합니다.
    pub fn lower_wick(&self) -> f64 {
        self.open.min(self.close) - self.low
    }
}

/// 바 시퀀스에서 종가만 추출합니다.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wicks_and_body() {
        let bar = Bar::new(0, 1.0, 1.0006, 0.995, 1.0005);

        assert!((bar.body_size() - 0.0005).abs() < 1e-12);
        assert!((bar.upper_wick() - 0.0001).abs() < 1e-12);
        assert!((bar.lower_wick() - 0.005).abs() < 1e-12);
    }

    #[test]
    fn test_volume_is_optional_in_json() {
        let bar: Bar =
            serde_json::from_str(r#"{"time":60,"open":1,"high":2,"low":0.5,"close":1.5}"#)
                .unwrap();
        assert_eq!(bar.volume, None);

        let json = serde_json::to_string(&bar.with_volume(10)).unwrap();
        assert!(json.contains("\"volume\":10"));
    }
}
