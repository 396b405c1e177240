//! 합성 시세 피드.
//!
//! 랜덤 워크로 1분봉을 생성합니다. 시드를 지정하면 같은 시작 시각에 대해
//! 항상 같은 바 시퀀스를 만듭니다.
//!
//! - 초기 바: 변동 = (u - 0.5) × 변동성
//! - 이후 바: 변동 = (±1) × u × 변동성, 시가는 직전 종가
//! - 고가/저가: 몸통 바깥으로 u × 변동성 × 0.5 만큼 확장
//! - 가격은 소수점 5자리로 반올림, 거래량은 [100, 1100) 균등 분포

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use signal_core::{Bar, BarBuffer, BarSnapshot, FeedConfig};
use tracing::{debug, info};

use crate::error::Result;
use crate::source::BarSource;

/// 가격 반올림 배율 (소수점 5자리).
const PRICE_SCALE: f64 = 100_000.0;

const VOLUME_RANGE: std::ops::Range<u64> = 100..1100;

fn round_price(value: f64) -> f64 {
    (value * PRICE_SCALE).round() / PRICE_SCALE
}

/// 랜덤 워크 기반 합성 시세 피드.
#[derive(Debug)]
pub struct SyntheticFeed {
    config: FeedConfig,
    rng: StdRng,
    buffer: BarBuffer,
}

impl SyntheticFeed {
    /// 설정을 검증하고 현재 시각에서 끝나는 초기 바로 피드를 생성합니다.
    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::starting_at(config.clone(), Utc::now().timestamp()))
    }

    /// 지정한 시각(`now`, 유닉스 초) 직전에 끝나는 초기 바로 피드를 생성합니다.
    ///
    /// 초기 바의 시간은 `now - count × 간격`부터 `now - 간격`까지입니다.
    pub fn starting_at(config: FeedConfig, now: i64) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut feed = Self {
            buffer: BarBuffer::new(config.capacity),
            config,
            rng,
        };
        feed.seed_history(now);

        info!(
            bars = feed.buffer.len(),
            base_price = feed.config.base_price,
            seeded = feed.config.seed.is_some(),
            "Synthetic feed initialized"
        );
        feed
    }

    /// 피드 설정.
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    fn seed_history(&mut self, now: i64) {
        let interval = self.config.bar_interval_secs;
        let volatility = self.config.volatility;
        let mut price = self.config.base_price;

        for i in (1..=self.config.initial_bars as i64).rev() {
            let change = (self.rng.gen::<f64>() - 0.5) * volatility;
            let open = price;
            let close = price + change;
            let bar = self.make_bar(now - i * interval, open, close);
            self.buffer.push(bar);
            // 초기 구간은 반올림 전 종가로 이어짐
            price = close;
        }
    }

    fn make_bar(&mut self, time: i64, open: f64, close: f64) -> Bar {
        let wick = self.config.volatility * 0.5;
        let high = open.max(close) + self.rng.gen::<f64>() * wick;
        let low = open.min(close) - self.rng.gen::<f64>() * wick;
        let volume = self.rng.gen_range(VOLUME_RANGE);

        Bar::new(
            time,
            round_price(open),
            round_price(high),
            round_price(low),
            round_price(close),
        )
        .with_volume(volume)
    }
}

impl BarSource for SyntheticFeed {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn advance(&mut self) -> Bar {
        let (time, open) = match self.buffer.last() {
            Some(last) => (last.time + self.config.bar_interval_secs, last.close),
            None => (Utc::now().timestamp(), self.config.base_price),
        };

        let direction = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let change = direction * self.rng.gen::<f64>() * self.config.volatility;
        let bar = self.make_bar(time, open, open + change);

        self.buffer.push(bar);
        debug!(time = bar.time, close = bar.close, "Synthetic bar generated");
        bar
    }

    fn snapshot(&self) -> BarSnapshot {
        self.buffer.snapshot()
    }
}
