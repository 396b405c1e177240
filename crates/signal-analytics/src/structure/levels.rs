//! 지지/저항 레벨 탐지.
//!
//! 좌우 `LEVEL_LOOKBACK`개 바와 비교해 국소 저점(지지)과 국소 고점(저항)을
//! 찾습니다. 비교는 같은 값을 허용하는 비엄격 비교입니다.

use serde::{Deserialize, Serialize};
use signal_core::Bar;

/// 국소 극값 판정에 사용하는 좌우 바 개수.
pub const LEVEL_LOOKBACK: usize = 5;

/// 종류별로 보고하는 최대 레벨 수.
pub const MAX_LEVELS: usize = 3;

/// 지지/저항 레벨.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceLevels {
    /// 지지 레벨 (탐지 순서, 최근 것 최대 3개)
    pub supports: Vec<f64>,
    /// 저항 레벨 (탐지 순서, 최근 것 최대 3개)
    pub resistances: Vec<f64>,
}

/// 지지/저항 레벨 탐지.
///
/// 인덱스 `i`(`LOOKBACK ≤ i < len − LOOKBACK`)의 저가가 앞뒤 5개 바의
/// 저가 이하이면 지지, 고가가 앞뒤 5개 바의 고가 이상이면 저항입니다.
/// 같은 값은 처음 나온 것만 남기고, 마지막 3개를 반환합니다.
pub fn detect_levels(bars: &[Bar]) -> PriceLevels {
    let mut supports = Vec::new();
    let mut resistances = Vec::new();

    if bars.len() > 2 * LEVEL_LOOKBACK {
        for i in LEVEL_LOOKBACK..bars.len() - LEVEL_LOOKBACK {
            let current = &bars[i];
            let neighbours = bars[i - LEVEL_LOOKBACK..i]
                .iter()
                .chain(&bars[i + 1..=i + LEVEL_LOOKBACK]);

            let (is_low, is_high) = neighbours.fold((true, true), |(low, high), bar| {
                (low && bar.low >= current.low, high && bar.high <= current.high)
            });

            if is_low {
                supports.push(current.low);
            }
            if is_high {
                resistances.push(current.high);
            }
        }
    }

    PriceLevels {
        supports: most_recent_unique(supports),
        resistances: most_recent_unique(resistances),
    }
}

/// 첫 등장 순서를 유지하며 중복을 제거한 뒤 마지막 `MAX_LEVELS`개를 남깁니다.
fn most_recent_unique(levels: Vec<f64>) -> Vec<f64> {
    let mut unique: Vec<f64> = Vec::with_capacity(levels.len());
    for level in levels {
        if !unique.contains(&level) {
            unique.push(level);
        }
    }

    let skip = unique.len().saturating_sub(MAX_LEVELS);
    unique.split_off(skip)
}
