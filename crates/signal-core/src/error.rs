//! 시그널 엔진의 에러 타입.
//!
//! 분석 엔진 자체는 데이터 부족을 `None`으로 표현하므로 에러를 내지
//! 않습니다. 이 모듈의 에러는 설정 로드와 외부 입력 해석에서만 발생합니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum SignalError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 시그널 엔진 작업을 위한 Result 타입.
pub type SignalResult<T> = Result<T, SignalError>;

impl From<serde_json::Error> for SignalError {
    fn from(err: serde_json::Error) -> Self {
        SignalError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for SignalError {
    fn from(err: config::ConfigError) -> Self {
        SignalError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SignalError = err.into();
        assert!(matches!(err, SignalError::Serialization(_)));
    }
}
