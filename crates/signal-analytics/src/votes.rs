//! 지표별 매매 투표.
//!
//! 각 지표 값을 고정 임계값으로 BUY/SELL/NEUTRAL 투표로 변환합니다.
//!
//! | 지표 | BUY | SELL |
//! |---|---|---|
//! | RSI | < 30 | > 70 |
//! | MACD | macd > signal | macd < signal |
//! | 볼린저 | 가격 ≤ 하단 | 가격 ≥ 상단 |
//! | SMA | 가격 > SMA | 가격 < SMA |

use serde::{Deserialize, Serialize};
use signal_core::SignalVote;

use crate::indicators::{
    BollingerBands, IndicatorSnapshot, MacdReading, RSI_OVERBOUGHT, RSI_OVERSOLD,
};

/// 투표하는 지표 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    Rsi,
    Macd,
    Bollinger,
    Sma,
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndicatorKind::Rsi => write!(f, "RSI"),
            IndicatorKind::Macd => write!(f, "MACD"),
            IndicatorKind::Bollinger => write!(f, "Bollinger"),
            IndicatorKind::Sma => write!(f, "SMA"),
        }
    }
}

/// 지표 하나의 투표.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorVote {
    /// 지표 종류
    pub kind: IndicatorKind,
    /// 투표
    pub vote: SignalVote,
}

impl IndicatorVote {
    pub fn new(kind: IndicatorKind, vote: SignalVote) -> Self {
        Self { kind, vote }
    }
}

/// RSI 투표.
pub fn rsi_vote(rsi: f64) -> SignalVote {
    if rsi < RSI_OVERSOLD {
        SignalVote::Buy
    } else if rsi > RSI_OVERBOUGHT {
        SignalVote::Sell
    } else {
        SignalVote::Neutral
    }
}

/// MACD 투표 (MACD 라인과 시그널 라인 비교).
pub fn macd_vote(macd: &MacdReading) -> SignalVote {
    if macd.macd > macd.signal {
        SignalVote::Buy
    } else if macd.macd < macd.signal {
        SignalVote::Sell
    } else {
        SignalVote::Neutral
    }
}

/// 볼린저 밴드 투표. 밴드 경계에 닿은 경우도 포함합니다.
pub fn bollinger_vote(bands: &BollingerBands, price: f64) -> SignalVote {
    if price <= bands.lower {
        SignalVote::Buy
    } else if price >= bands.upper {
        SignalVote::Sell
    } else {
        SignalVote::Neutral
    }
}

/// SMA 투표.
pub fn sma_vote(sma: f64, price: f64) -> SignalVote {
    if price > sma {
        SignalVote::Buy
    } else if price < sma {
        SignalVote::Sell
    } else {
        SignalVote::Neutral
    }
}

impl IndicatorSnapshot {
    /// 계산된 지표들의 투표 목록.
    ///
    /// 값이 없는 지표는 투표하지 않습니다. 가격 기준 투표(볼린저, SMA)는
    /// 현재 가격이 0보다 클 때만 포함됩니다. 장기 SMA는 투표하지 않습니다.
    pub fn votes(&self, price: f64) -> Vec<IndicatorVote> {
        let mut votes = Vec::with_capacity(4);

        if let Some(rsi) = self.rsi {
            votes.push(IndicatorVote::new(IndicatorKind::Rsi, rsi_vote(rsi)));
        }
        if let Some(macd) = &self.macd {
            votes.push(IndicatorVote::new(IndicatorKind::Macd, macd_vote(macd)));
        }
        if price > 0.0 {
            if let Some(bands) = &self.bollinger {
                votes.push(IndicatorVote::new(
                    IndicatorKind::Bollinger,
                    bollinger_vote(bands, price),
                ));
            }
            if let Some(sma) = self.sma20 {
                votes.push(IndicatorVote::new(IndicatorKind::Sma, sma_vote(sma, price)));
            }
        }

        votes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_snapshot() -> IndicatorSnapshot {
        IndicatorSnapshot {
            rsi: Some(25.0),
            macd: Some(MacdReading {
                macd: -0.5,
                signal: -0.2,
                histogram: -0.3,
            }),
            bollinger: Some(BollingerBands {
                upper: 1.10,
                middle: 1.08,
                lower: 1.06,
            }),
            sma20: Some(1.07),
            sma50: Some(1.09),
        }
    }

    #[test]
    fn test_rsi_vote_thresholds() {
        assert_eq!(rsi_vote(29.9), SignalVote::Buy);
        assert_eq!(rsi_vote(30.0), SignalVote::Neutral);
        assert_eq!(rsi_vote(70.0), SignalVote::Neutral);
        assert_eq!(rsi_vote(70.1), SignalVote::Sell);
    }

    #[test]
    fn test_macd_vote() {
        let reading = |macd, signal| MacdReading {
            macd,
            signal,
            histogram: macd - signal,
        };
        assert_eq!(macd_vote(&reading(1.0, 0.5)), SignalVote::Buy);
        assert_eq!(macd_vote(&reading(0.5, 1.0)), SignalVote::Sell);
        assert_eq!(macd_vote(&reading(0.5, 0.5)), SignalVote::Neutral);
    }

    #[test]
    fn test_bollinger_vote_touching_bands() {
        let bands = BollingerBands {
            upper: 2.0,
            middle: 1.5,
            lower: 1.0,
        };
        assert_eq!(bollinger_vote(&bands, 1.0), SignalVote::Buy);
        assert_eq!(bollinger_vote(&bands, 2.0), SignalVote::Sell);
        assert_eq!(bollinger_vote(&bands, 1.5), SignalVote::Neutral);

        // 밴드가 한 점으로 모이면 하단 조건이 먼저 적용됨
        let flat = BollingerBands {
            upper: 1.0,
            middle: 1.0,
            lower: 1.0,
        };
        assert_eq!(bollinger_vote(&flat, 1.0), SignalVote::Buy);
    }

    #[test]
    fn test_sma_vote() {
        assert_eq!(sma_vote(1.0, 1.1), SignalVote::Buy);
        assert_eq!(sma_vote(1.0, 0.9), SignalVote::Sell);
        assert_eq!(sma_vote(1.0, 1.0), SignalVote::Neutral);
    }

    #[test]
    fn test_snapshot_votes_order_and_values() {
        let votes = full_snapshot().votes(1.065);

        let kinds: Vec<_> = votes.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IndicatorKind::Rsi,
                IndicatorKind::Macd,
                IndicatorKind::Bollinger,
                IndicatorKind::Sma
            ]
        );
        assert_eq!(votes[0].vote, SignalVote::Buy);
        assert_eq!(votes[1].vote, SignalVote::Sell);
        assert_eq!(votes[2].vote, SignalVote::Neutral);
        assert_eq!(votes[3].vote, SignalVote::Sell);
    }

    #[test]
    fn test_price_votes_require_positive_price() {
        let votes = full_snapshot().votes(0.0);
        assert_eq!(votes.len(), 2);
        assert!(votes
            .iter()
            .all(|v| matches!(v.kind, IndicatorKind::Rsi | IndicatorKind::Macd)));
    }

    #[test]
    fn test_missing_indicators_do_not_vote() {
        assert!(IndicatorSnapshot::default().votes(1.0).is_empty());

        let snapshot = IndicatorSnapshot {
            sma20: Some(1.0),
            ..Default::default()
        };
        let votes = snapshot.votes(2.0);
        assert_eq!(votes, vec![IndicatorVote::new(IndicatorKind::Sma, SignalVote::Buy)]);
    }
}
