//! 데이터 모듈 오류 타입.

use signal_core::SignalError;
use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(String),

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 직렬화/역직렬화 오류
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// 설정 오류
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Serialization(err.to_string())
    }
}

impl From<SignalError> for DataError {
    fn from(err: SignalError) -> Self {
        match err {
            SignalError::Config(msg) => DataError::Config(msg),
            SignalError::InvalidInput(msg) => DataError::InvalidData(msg),
            SignalError::Serialization(msg) => DataError::Serialization(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
