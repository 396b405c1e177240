//! 지표 투표 합의.
//!
//! 지표별 투표를 집계해 BUY/SELL/NEUTRAL 편향을 결정합니다.
//! 편향은 매수 수와 매도 수만 비교하며, 중립 투표 수는 영향을 주지 않습니다.

use serde::{Deserialize, Serialize};
use signal_core::SignalVote;

use crate::votes::IndicatorVote;

/// 투표 집계 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Consensus {
    /// 매수 투표 수
    pub buy_count: usize,
    /// 매도 투표 수
    pub sell_count: usize,
    /// 중립 투표 수
    pub neutral_count: usize,
    /// 합의 편향
    pub bias: SignalVote,
}

impl Consensus {
    /// 전체 투표 수.
    pub fn total(&self) -> usize {
        self.buy_count + self.sell_count + self.neutral_count
    }

    /// 투표 하나를 더한 결과.
    fn tally(mut self, vote: SignalVote) -> Self {
        match vote {
            SignalVote::Buy => self.buy_count += 1,
            SignalVote::Sell => self.sell_count += 1,
            SignalVote::Neutral => self.neutral_count += 1,
        }
        self
    }

    fn with_bias(mut self) -> Self {
        self.bias = if self.buy_count > self.sell_count {
            SignalVote::Buy
        } else if self.sell_count > self.buy_count {
            SignalVote::Sell
        } else {
            SignalVote::Neutral
        };
        self
    }
}

/// 투표 목록으로부터 합의를 계산합니다.
///
/// 순서에 무관하며, 같은 입력에 대해 항상 같은 결과를 냅니다.
pub fn aggregate_votes<I>(votes: I) -> Consensus
where
    I: IntoIterator<Item = SignalVote>,
{
    votes
        .into_iter()
        .fold(Consensus::default(), Consensus::tally)
        .with_bias()
}

/// 지표 투표 목록으로부터 합의를 계산합니다.
pub fn aggregate_consensus(votes: &[IndicatorVote]) -> Consensus {
    aggregate_votes(votes.iter().map(|v| v.vote))
}
