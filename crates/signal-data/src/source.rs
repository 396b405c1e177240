//! 바 데이터 소스 추상화.

use signal_core::{Bar, BarSnapshot};

/// 롤링 버퍼를 소유하고 새 바를 생성하는 데이터 소스.
///
/// 버퍼 변경은 소스만 수행하며, 소비자는 [`BarSnapshot`]만 읽습니다.
pub trait BarSource: Send {
    /// 소스 이름 (로그용).
    fn name(&self) -> &str;

    /// 새 바 하나를 생성해 버퍼에 추가하고 반환합니다.
    fn advance(&mut self) -> Bar;

    /// 현재 버퍼의 불변 스냅샷.
    fn snapshot(&self) -> BarSnapshot;
}
