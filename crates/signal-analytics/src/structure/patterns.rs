//! 가격 패턴 분류.
//!
//! 최근 10개 바를 앞/뒤 5개씩 나눠 비교하고, 마지막 바의 꼬리 모양과
//! 최근 종가 흐름을 확인합니다. 규칙은 순서가 있는 테이블이며 처음 일치한
//! 규칙이 결과가 됩니다.
//!
//! ## 규칙 순서
//! 1. **이중 바닥 (W)**: 두 구간의 최저가 차이 1% 미만, 뒷구간 고가 상승
//! 2. **이중 천장 (M)**: 두 구간의 최고가 차이 1% 미만, 뒷구간 저가 하락
//! 3. **망치형**: 아래 꼬리 > 몸통 × 2, 위 꼬리 < 몸통 × 0.5
//! 4. **유성형**: 위 꼬리 > 몸통 × 2, 아래 꼬리 < 몸통 × 0.5
//! 5. **상승 추세**: 최근 5개 종가가 감소하지 않음
//! 6. **하락 추세**: 최근 5개 종가가 증가하지 않음
//! 7. **횡보**

use serde::{Deserialize, Serialize};
use signal_core::{Bar, SignalVote};

/// 패턴 분류에 필요한 최소 바 개수.
pub const PATTERN_WINDOW: usize = 10;

const HALF_WINDOW: usize = PATTERN_WINDOW / 2;

/// 이중 바닥/천장 판정의 상대 허용 오차.
const DOUBLE_LEVEL_TOLERANCE: f64 = 0.01;

/// 가격 패턴 라벨.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternLabel {
    /// 이중 바닥 (W)
    DoubleBottom,
    /// 이중 천장 (M)
    DoubleTop,
    /// 망치형 (아래 꼬리 거부)
    Hammer,
    /// 유성형 (위 꼬리 거부)
    ShootingStar,
    /// 상승 추세
    Uptrend,
    /// 하락 추세
    Downtrend,
    /// 횡보
    Consolidation,
    /// 데이터 부족
    InsufficientData,
}

impl PatternLabel {
    /// 가격 행동 관점의 방향 힌트.
    ///
    /// 표시용이며 지표 합의에는 포함되지 않습니다.
    pub fn directional_hint(&self) -> SignalVote {
        match self {
            PatternLabel::DoubleBottom | PatternLabel::Hammer | PatternLabel::Uptrend => {
                SignalVote::Buy
            }
            PatternLabel::DoubleTop | PatternLabel::ShootingStar | PatternLabel::Downtrend => {
                SignalVote::Sell
            }
            PatternLabel::Consolidation | PatternLabel::InsufficientData => SignalVote::Neutral,
        }
    }

    /// 직렬화 형식과 같은 라벨 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternLabel::DoubleBottom => "double-bottom",
            PatternLabel::DoubleTop => "double-top",
            PatternLabel::Hammer => "hammer",
            PatternLabel::ShootingStar => "shooting-star",
            PatternLabel::Uptrend => "uptrend",
            PatternLabel::Downtrend => "downtrend",
            PatternLabel::Consolidation => "consolidation",
            PatternLabel::InsufficientData => "insufficient-data",
        }
    }
}

impl std::fmt::Display for PatternLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 규칙 평가에 필요한 값들.
struct PatternContext<'a> {
    first_low: f64,
    first_high: f64,
    second_low: f64,
    second_high: f64,
    last: &'a Bar,
    recent: &'a [Bar],
}

impl<'a> PatternContext<'a> {
    fn new(bars: &'a [Bar]) -> Self {
        let window = &bars[bars.len() - PATTERN_WINDOW..];
        let (first, second) = window.split_at(HALF_WINDOW);
        let (first_low, first_high) = low_high(first);
        let (second_low, second_high) = low_high(second);

        Self {
            first_low,
            first_high,
            second_low,
            second_high,
            last: &window[PATTERN_WINDOW - 1],
            recent: second,
        }
    }
}

fn low_high(bars: &[Bar]) -> (f64, f64) {
    bars.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), bar| {
            (low.min(bar.low), high.max(bar.high))
        })
}

type PatternRule = fn(&PatternContext<'_>) -> bool;

/// 순서가 있는 패턴 규칙 테이블. 처음 일치한 규칙이 결과가 됩니다.
const PATTERN_RULES: &[(PatternLabel, PatternRule)] = &[
    (PatternLabel::DoubleBottom, is_double_bottom),
    (PatternLabel::DoubleTop, is_double_top),
    (PatternLabel::Hammer, is_hammer),
    (PatternLabel::ShootingStar, is_shooting_star),
    (PatternLabel::Uptrend, is_uptrend),
    (PatternLabel::Downtrend, is_downtrend),
];

fn is_double_bottom(ctx: &PatternContext<'_>) -> bool {
    (ctx.first_low - ctx.second_low).abs() / ctx.first_low < DOUBLE_LEVEL_TOLERANCE
        && ctx.second_high > ctx.first_high
}

fn is_double_top(ctx: &PatternContext<'_>) -> bool {
    (ctx.first_high - ctx.second_high).abs() / ctx.first_high < DOUBLE_LEVEL_TOLERANCE
        && ctx.second_low < ctx.first_low
}

fn is_hammer(ctx: &PatternContext<'_>) -> bool {
    let body = ctx.last.body_size();
    ctx.last.lower_wick() > body * 2.0 && ctx.last.upper_wick() < body * 0.5
}

fn is_shooting_star(ctx: &PatternContext<'_>) -> bool {
    let body = ctx.last.body_size();
    ctx.last.upper_wick() > body * 2.0 && ctx.last.lower_wick() < body * 0.5
}

fn is_uptrend(ctx: &PatternContext<'_>) -> bool {
    ctx.recent.windows(2).all(|w| w[1].close >= w[0].close)
}

fn is_downtrend(ctx: &PatternContext<'_>) -> bool {
    ctx.recent.windows(2).all(|w| w[1].close <= w[0].close)
}

/// 최근 바들의 가격 패턴 분류.
///
/// 바가 10개보다 적으면 `InsufficientData`.
pub fn classify_pattern(bars: &[Bar]) -> PatternLabel {
    if bars.len() < PATTERN_WINDOW {
        return PatternLabel::InsufficientData;
    }

    let ctx = PatternContext::new(bars);
    PATTERN_RULES
        .iter()
        .find(|(_, rule)| rule(&ctx))
        .map(|(label, _)| *label)
        .unwrap_or(PatternLabel::Consolidation)
}
