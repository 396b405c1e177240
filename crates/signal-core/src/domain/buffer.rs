//! 롤링 바 버퍼와 불변 스냅샷.
//!
//! 버퍼는 데이터 소스가 소유하고 변경합니다. 분석 엔진은 버퍼를 직접
//! 읽지 않고 [`BarBuffer::snapshot`]으로 얻은 [`BarSnapshot`]만 소비하므로
//! 계산 도중 입력이 바뀌는 일이 없습니다.

use std::collections::VecDeque;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Bar;

/// 기본 버퍼 최대 길이.
pub const DEFAULT_BUFFER_CAPACITY: usize = 100;

/// 최대 길이를 넘으면 가장 오래된 바를 버리는 롤링 버퍼.
#[derive(Debug, Clone)]
pub struct BarBuffer {
    bars: VecDeque<Bar>,
    capacity: usize,
    version: u64,
}

impl Default for BarBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_CAPACITY)
    }
}

impl BarBuffer {
    /// 주어진 최대 길이로 빈 버퍼를 생성합니다. 0은 1로 보정됩니다.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            bars: VecDeque::with_capacity(capacity),
            capacity,
            version: 0,
        }
    }

    /// 기존 바 목록으로 버퍼를 생성합니다.
    pub fn from_bars(capacity: usize, bars: impl IntoIterator<Item = Bar>) -> Self {
        let mut buffer = Self::new(capacity);
        buffer.extend(bars);
        buffer
    }

    /// 바를 추가하고, 최대 길이를 넘으면 가장 오래된 바를 제거해 반환합니다.
    pub fn push(&mut self, bar: Bar) -> Option<Bar> {
        if let Some(last) = self.bars.back() {
            if bar.time <= last.time {
                tracing::debug!(
                    last_time = last.time,
                    new_time = bar.time,
                    "Non-increasing bar time accepted as-is"
                );
            }
        }

        self.bars.push_back(bar);
        self.version += 1;

        if self.bars.len() > self.capacity {
            self.bars.pop_front()
        } else {
            None
        }
    }

    /// 여러 바를 순서대로 추가합니다.
    pub fn extend(&mut self, bars: impl IntoIterator<Item = Bar>) {
        for bar in bars {
            self.push(bar);
        }
    }

    /// 모든 바를 제거합니다.
    pub fn clear(&mut self) {
        self.bars.clear();
        self.version += 1;
    }

    /// 가장 최근 바를 반환합니다.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.back()
    }

    /// 현재 바 개수.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// 버퍼가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 최대 길이.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 변경될 때마다 증가하는 버전.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// 현재 내용을 복사한 불변 스냅샷을 생성합니다.
    pub fn snapshot(&self) -> BarSnapshot {
        BarSnapshot {
            version: self.version,
            bars: self.bars.iter().copied().collect(),
        }
    }
}

/// 특정 버전의 버퍼 내용을 담은 불변 스냅샷.
///
/// 내부 바 배열은 `Arc`로 공유되므로 복제 비용이 작고 스레드 간 전달이
/// 자유롭습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSnapshot {
    /// 스냅샷을 만든 시점의 버퍼 버전
    pub version: u64,
    /// 시간순 바 목록
    pub bars: Arc<[Bar]>,
}

impl BarSnapshot {
    /// 바 목록으로 스냅샷을 직접 생성합니다.
    pub fn new(version: u64, bars: impl Into<Arc<[Bar]>>) -> Self {
        Self {
            version,
            bars: bars.into(),
        }
    }

    /// 바 슬라이스를 반환합니다.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// 가장 최근 종가.
    pub fn last_price(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }
}

impl Deref for BarSnapshot {
    type Target = [Bar];

    fn deref(&self) -> &Self::Target {
        &self.bars
    }
}

impl From<Vec<Bar>> for BarSnapshot {
    fn from(bars: Vec<Bar>) -> Self {
        Self::new(0, bars)
    }
}
