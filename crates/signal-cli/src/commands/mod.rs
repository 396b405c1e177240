//! CLI 명령어 구현 모듈.

pub mod analyze;
pub mod classify;
pub mod simulate;

// 각 서브모듈 직접 사용 권장 (run 함수 이름 충돌 방지)
