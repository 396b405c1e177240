//! 시장 구조 탐지.
//!
//! 지표와는 독립적으로 바의 가격 구조를 읽습니다.
//! - 지지/저항 레벨 ([`levels`])
//! - 가격 패턴 분류 ([`patterns`])

pub mod levels;
pub mod patterns;

use serde::{Deserialize, Serialize};
use signal_core::Bar;

pub use levels::{detect_levels, PriceLevels, LEVEL_LOOKBACK, MAX_LEVELS};
pub use patterns::{classify_pattern, PatternLabel, PATTERN_WINDOW};

/// 시장 구조 탐지 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStructure {
    /// 지지 레벨 (최대 3개)
    pub supports: Vec<f64>,
    /// 저항 레벨 (최대 3개)
    pub resistances: Vec<f64>,
    /// 패턴 라벨
    pub pattern: PatternLabel,
}

impl MarketStructure {
    /// 현재 가격보다 아래에 있는 가장 가까운 지지 레벨.
    pub fn nearest_support(&self, price: f64) -> Option<f64> {
        self.supports
            .iter()
            .copied()
            .filter(|level| *level <= price)
            .fold(None, |best: Option<f64>, level| {
                Some(best.map_or(level, |b| b.max(level)))
            })
    }

    /// 현재 가격보다 위에 있는 가장 가까운 저항 레벨.
    pub fn nearest_resistance(&self, price: f64) -> Option<f64> {
        self.resistances
            .iter()
            .copied()
            .filter(|level| *level >= price)
            .fold(None, |best: Option<f64>, level| {
                Some(best.map_or(level, |b| b.min(level)))
            })
    }
}

/// 지지/저항 레벨과 패턴을 함께 탐지합니다.
pub fn detect_structure(bars: &[Bar]) -> MarketStructure {
    let PriceLevels {
        supports,
        resistances,
    } = detect_levels(bars);

    MarketStructure {
        supports,
        resistances,
        pattern: classify_pattern(bars),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_history_is_empty_structure() {
        let bars: Vec<Bar> = (0..9)
            .map(|i| Bar::new(i * 60, 1.0, 1.1, 0.9, 1.0))
            .collect();

        let structure = detect_structure(&bars);
        assert!(structure.supports.is_empty());
        assert!(structure.resistances.is_empty());
        assert_eq!(structure.pattern, PatternLabel::InsufficientData);
    }

    #[test]
    fn test_nearest_levels() {
        let structure = MarketStructure {
            supports: vec![1.00, 1.02, 1.05],
            resistances: vec![1.10, 1.08, 1.04],
            pattern: PatternLabel::Consolidation,
        };

        assert_eq!(structure.nearest_support(1.03), Some(1.02));
        assert_eq!(structure.nearest_resistance(1.06), Some(1.08));
        assert_eq!(structure.nearest_support(0.5), None);
        assert_eq!(structure.nearest_resistance(2.0), None);
    }
}
