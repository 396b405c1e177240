//! 방향성 매매 투표.
//!
//! 개별 지표, 패턴, 원격 분류기가 내놓는 BUY/SELL/NEUTRAL 판단을
//! 하나의 타입으로 표현합니다.

use serde::{Deserialize, Serialize};

/// 방향성 투표.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalVote {
    /// 매수
    Buy,
    /// 매도
    Sell,
    /// 중립
    #[default]
    Neutral,
}

impl SignalVote {
    /// 방향성이 있는 투표(BUY/SELL)인지 확인합니다.
    pub fn is_directional(&self) -> bool {
        !matches!(self, SignalVote::Neutral)
    }

    /// 투표 문자열을 해석합니다.
    ///
    /// 영문 표기(BUY/SELL/NEUTRAL)와 대시보드의 포르투갈어 표기
    /// (COMPRA/VENDA/NEUTRO)를 대소문자 구분 없이 받아들입니다.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "BUY" | "COMPRA" => Some(SignalVote::Buy),
            "SELL" | "VENDA" => Some(SignalVote::Sell),
            "NEUTRAL" | "NEUTRO" => Some(SignalVote::Neutral),
            _ => None,
        }
    }
}

impl std::fmt::Display for SignalVote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalVote::Buy => write!(f, "BUY"),
            SignalVote::Sell => write!(f, "SELL"),
            SignalVote::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

impl std::str::FromStr for SignalVote {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown signal: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_vocabularies() {
        assert_eq!(SignalVote::parse("buy"), Some(SignalVote::Buy));
        assert_eq!(SignalVote::parse("COMPRA"), Some(SignalVote::Buy));
        assert_eq!(SignalVote::parse(" venda "), Some(SignalVote::Sell));
        assert_eq!(SignalVote::parse("NEUTRO"), Some(SignalVote::Neutral));
        assert_eq!(SignalVote::parse("AGUARDAR"), None);
        assert!("hold".parse::<SignalVote>().is_err());
    }

    #[test]
    fn test_serde_uppercase() {
        assert_eq!(serde_json::to_string(&SignalVote::Sell).unwrap(), "\"SELL\"");
        let vote: SignalVote = serde_json::from_str("\"NEUTRAL\"").unwrap();
        assert_eq!(vote, SignalVote::Neutral);
        assert!(!vote.is_directional());
    }

    #[test]
    fn test_default_is_neutral() {
        assert_eq!(SignalVote::default(), SignalVote::Neutral);
    }
}
