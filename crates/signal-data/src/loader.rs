//! JSON 바 파일 로더.
//!
//! 바 배열(`[{"time": .., "open": .., ...}, ...]`)을 읽습니다. `volume`은
//! 생략할 수 있습니다.

use std::path::Path;

use signal_core::Bar;
use tracing::debug;

use crate::error::{DataError, Result};

/// 파일에서 바 목록을 읽습니다.
pub fn load_bars<P: AsRef<Path>>(path: P) -> Result<Vec<Bar>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| DataError::Io(format!("{}: {}", path.display(), e)))?;
    let bars = parse_bars(&text)?;

    debug!(path = %path.display(), bars = bars.len(), "Bars loaded");
    Ok(bars)
}

/// JSON 텍스트에서 바 목록을 해석하고 검증합니다.
///
/// 가격은 유한수여야 하고, 시간은 엄격히 증가해야 합니다.
pub fn parse_bars(text: &str) -> Result<Vec<Bar>> {
    let bars: Vec<Bar> = serde_json::from_str(text)?;
    validate_bars(&bars)?;
    Ok(bars)
}

fn validate_bars(bars: &[Bar]) -> Result<()> {
    if let Some((index, _)) = bars.iter().enumerate().find(|(_, bar)| {
        ![bar.open, bar.high, bar.low, bar.close]
            .iter()
            .all(|v| v.is_finite())
    }) {
        return Err(DataError::InvalidData(format!(
            "bar {index} has a non-finite price"
        )));
    }

    if let Some(index) = bars
        .windows(2)
        .position(|pair| pair[1].time <= pair[0].time)
    {
        return Err(DataError::InvalidData(format!(
            "bar times must be strictly increasing (bar {} at {} follows {})",
            index + 1,
            bars[index + 1].time,
            bars[index].time
        )));
    }

    Ok(())
}
