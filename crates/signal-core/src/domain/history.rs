//! 최근 분류 결과 히스토리와 대시보드 통계.
//!
//! 메모리 안에서만 유지되며 저장소에 기록하지 않습니다.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ChartClassification, SignalVote};

/// 히스토리에 보관하는 최대 기록 수.
pub const HISTORY_LIMIT: usize = 50;

/// 히스토리 한 건.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    /// 고유 ID
    pub id: Uuid,
    /// 신호
    pub signal: SignalVote,
    /// 신뢰도 (0 ~ 100)
    pub confidence: f64,
    /// 기록 시각
    pub timestamp: DateTime<Utc>,
}

impl SignalRecord {
    /// 새 기록을 생성합니다.
    pub fn new(signal: SignalVote, confidence: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            signal,
            confidence,
            timestamp,
        }
    }

    /// 분류 결과로부터 기록을 생성합니다.
    pub fn from_classification(result: &ChartClassification, timestamp: DateTime<Utc>) -> Self {
        Self::new(result.signal, result.confidence, timestamp)
    }
}

/// 히스토리 통계.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryStats {
    /// 전체 분석 수
    pub total: usize,
    /// 방향성 신호(BUY/SELL) 수
    pub active: usize,
    /// 평균 신뢰도 (기록이 없으면 0)
    pub average_confidence: f64,
}

/// 최신 기록이 앞에 오는 고정 길이 히스토리.
#[derive(Debug, Clone)]
pub struct SignalHistory {
    records: VecDeque<SignalRecord>,
    limit: usize,
}

impl Default for SignalHistory {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}

impl SignalHistory {
    /// 최대 길이를 지정해 생성합니다.
    pub fn new(limit: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// 기록을 맨 앞에 추가하고 한도를 넘는 오래된 기록을 버립니다.
    pub fn record(&mut self, record: SignalRecord) {
        self.records.push_front(record);
        self.records.truncate(self.limit);
    }

    /// 최신순 기록.
    pub fn records(&self) -> impl Iterator<Item = &SignalRecord> {
        self.records.iter()
    }

    /// 기록 수.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 통계를 계산합니다.
    pub fn stats(&self) -> HistoryStats {
        let total = self.records.len();
        let active = self
            .records
            .iter()
            .filter(|r| r.signal.is_directional())
            .count();
        let average_confidence = if total > 0 {
            self.records.iter().map(|r| r.confidence).sum::<f64>() / total as f64
        } else {
            0.0
        };

        HistoryStats {
            total,
            active,
            average_confidence,
        }
    }
}
