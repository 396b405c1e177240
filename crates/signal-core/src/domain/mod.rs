//! 차트 분석을 위한 도메인 모델.

mod bar;
mod buffer;
mod classification;
mod history;
mod signal;

pub use bar::*;
pub use buffer::*;
pub use classification::*;
pub use history::*;
pub use signal::*;
