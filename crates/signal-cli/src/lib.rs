//! 차트 시그널 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 바 파일 분석
//! - 합성 피드 실시간 시뮬레이션
//! - 원격 분류기 응답 정규화
//! - 표/JSON 출력

pub mod commands;
pub mod output;
