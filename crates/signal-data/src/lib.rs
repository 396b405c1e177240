//! 시세 데이터 소스.
//!
//! 이 crate는 다음을 제공합니다:
//! - 데이터 소스 추상화 ([`BarSource`])
//! - 시드 지정이 가능한 합성 시세 피드
//! - JSON 바 파일 로더
//! - 주기적으로 스냅샷을 발행하는 실시간 드라이버

pub mod error;
pub mod loader;
pub mod realtime;
pub mod source;
pub mod synthetic;

pub use error::{DataError, Result};
pub use loader::{load_bars, parse_bars};
pub use realtime::RealtimeFeed;
pub use source::BarSource;
pub use synthetic::SyntheticFeed;
