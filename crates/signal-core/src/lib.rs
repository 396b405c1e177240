//! # Signal Core
//!
//! 차트 시그널 엔진의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 엔진 전반에서 사용되는 기본 타입을 제공합니다:
//! - OHLCV 바와 롤링 바 버퍼 (버전이 붙은 스냅샷)
//! - 지표별 매매 투표 (BUY/SELL/NEUTRAL)
//! - 원격 차트 분류 응답 정규화
//! - 시그널 히스토리 및 통계
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use self::config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
