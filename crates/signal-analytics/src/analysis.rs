//! 스냅샷 분석 파이프라인.
//!
//! 바 스냅샷 하나에 대해 지표 계산, 구조 탐지, 투표 합의를 차례로
//! 수행해 하나의 보고서로 묶습니다. 모든 값은 스냅샷마다 새로 계산합니다.

use serde::{Deserialize, Serialize};
use signal_core::{BarSnapshot, IndicatorSettings};
use tracing::debug;

use crate::consensus::{aggregate_consensus, Consensus};
use crate::indicators::{IndicatorEngine, IndicatorParams, IndicatorResult, IndicatorSnapshot};
use crate::structure::{detect_structure, MarketStructure};
use crate::votes::IndicatorVote;

/// 스냅샷 분석 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// 분석한 스냅샷 버전
    pub version: u64,
    /// 바 개수
    pub bar_count: usize,
    /// 마지막 종가
    pub last_price: Option<f64>,
    /// 지표 값
    pub indicators: IndicatorSnapshot,
    /// 지표별 투표
    pub votes: Vec<IndicatorVote>,
    /// 시장 구조
    pub structure: MarketStructure,
    /// 투표 합의
    pub consensus: Consensus,
}

/// 차트 분석기.
#[derive(Debug, Clone, Default)]
pub struct ChartAnalyzer {
    engine: IndicatorEngine,
}

impl ChartAnalyzer {
    /// 기본 지표 파라미터로 분석기 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 지표 파라미터를 지정해 분석기 생성.
    pub fn with_params(params: IndicatorParams) -> IndicatorResult<Self> {
        Ok(Self {
            engine: IndicatorEngine::with_params(params)?,
        })
    }

    /// 설정 파일의 지표 설정으로 분석기 생성.
    pub fn from_settings(settings: &IndicatorSettings) -> IndicatorResult<Self> {
        Self::with_params(IndicatorParams::from(settings))
    }

    /// 지표 엔진 참조.
    pub fn engine(&self) -> &IndicatorEngine {
        &self.engine
    }

    /// 스냅샷 분석.
    ///
    /// 가격 기준 투표에는 마지막 종가를 사용합니다. 바가 없으면 가격을 0으로
    /// 보고 가격 기준 투표를 생략합니다.
    pub fn analyze(&self, snapshot: &BarSnapshot) -> AnalysisReport {
        let span = signal_core::analysis_span!("analysis", snapshot.version, snapshot.len());
        let _guard = span.enter();

        let bars = snapshot.bars();
        let last_price = snapshot.last_price();

        let indicators = self.engine.compute(bars);
        let votes = indicators.votes(last_price.unwrap_or(0.0));
        let consensus = aggregate_consensus(&votes);
        let structure = detect_structure(bars);

        debug!(
            bars = bars.len(),
            rsi = ?indicators.rsi,
            votes = votes.len(),
            buy = consensus.buy_count,
            sell = consensus.sell_count,
            bias = %consensus.bias,
            pattern = %structure.pattern,
            "Snapshot analyzed"
        );

        AnalysisReport {
            version: snapshot.version,
            bar_count: bars.len(),
            last_price,
            indicators,
            votes,
            structure,
            consensus,
        }
    }
}
