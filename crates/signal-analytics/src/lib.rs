//! 차트 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 기술적 지표 (RSI, EMA, MACD, SMA, 볼린저 밴드)
//! - 지표별 매매 투표와 합의 편향
//! - 지지/저항 레벨 및 가격 패턴 분류
//! - 스냅샷 단위 분석 보고서
//!
//! 엔진은 동기식 순수 계산이며 I/O나 전역 상태가 없습니다.
//!
//! # Re-exports
//!
//! - [`indicators`]: 지표 계산 (IndicatorEngine, IndicatorSnapshot 등)
//! - [`structure`]: 시장 구조 (MarketStructure, PatternLabel 등)
//! - [`consensus`]: 투표 합의 (Consensus)

pub mod analysis;
pub mod consensus;
pub mod indicators;
pub mod structure;
pub mod votes;

// Analysis 모듈 re-exports
pub use analysis::{AnalysisReport, ChartAnalyzer};

// Consensus 모듈 re-exports
pub use consensus::{aggregate_consensus, aggregate_votes, Consensus};

// Indicators 모듈 re-exports
pub use indicators::{
    compute_indicators,
    // 변동성 지표
    BollingerBands,
    BollingerBandsParams,
    // 추세 지표
    EmaParams,
    // 엔진
    IndicatorEngine,
    IndicatorError,
    IndicatorParams,
    IndicatorResult,
    IndicatorSnapshot,
    MacdParams,
    MacdReading,
    // 모멘텀 지표
    MomentumCalculator,
    RsiParams,
    RsiZone,
    SmaParams,
    TrendIndicators,
    VolatilityIndicators,
};

// Structure 모듈 re-exports
pub use structure::{detect_structure, MarketStructure, PatternLabel};

// Votes 모듈 re-exports
pub use votes::{IndicatorKind, IndicatorVote};
