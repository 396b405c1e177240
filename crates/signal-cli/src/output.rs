//! 결과 출력 형식.
//!
//! 사람이 읽는 표 형식과 기계가 읽는 JSON 형식을 제공합니다.

use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use signal_analytics::{AnalysisReport, RsiZone};
use signal_core::{ChartClassification, HistoryStats};

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// 표 형식
    #[default]
    Table,
    /// JSON
    Json,
}

/// 값을 JSON 문자열로 직렬화합니다.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn fmt_price(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.5}"))
}

fn fmt_levels(levels: &[f64]) -> String {
    if levels.is_empty() {
        return "-".to_string();
    }
    levels
        .iter()
        .map(|v| format!("{v:.5}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// 분석 보고서를 표 형식으로 렌더링합니다.
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let ind = &report.indicators;

    let _ = writeln!(
        out,
        "snapshot v{}  bars {}  last {}",
        report.version,
        report.bar_count,
        fmt_price(report.last_price)
    );
    let _ = writeln!(out, "{:-<48}", "");

    let rsi = ind.rsi.map_or_else(
        || "-".to_string(),
        |v| format!("{v:.2} ({})", RsiZone::of(v)),
    );
    let _ = writeln!(out, "{:<12}{}", "RSI", rsi);

    let macd = ind.macd.map_or_else(
        || "-".to_string(),
        |m| {
            format!(
                "{:.6} / signal {:.6} / hist {:.6}",
                m.macd, m.signal, m.histogram
            )
        },
    );
    let _ = writeln!(out, "{:<12}{}", "MACD", macd);

    let bands = ind.bollinger.map_or_else(
        || "-".to_string(),
        |b| format!("{:.5} / {:.5} / {:.5}", b.upper, b.middle, b.lower),
    );
    let _ = writeln!(out, "{:<12}{}", "Bollinger", bands);
    if let Some(b) = ind.bollinger {
        let percent_b = report
            .last_price
            .and_then(|price| b.percent_b(price))
            .map_or_else(|| "-".to_string(), |v| format!("{:.1}%", v * 100.0));
        let width = b
            .bandwidth()
            .map_or_else(|| "-".to_string(), |v| format!("{v:.5}"));
        let _ = writeln!(out, "{:<12}{} (width {})", "%B", percent_b, width);
    }
    let _ = writeln!(out, "{:<12}{}", "SMA20", fmt_price(ind.sma20));
    let _ = writeln!(out, "{:<12}{}", "SMA50", fmt_price(ind.sma50));
    let _ = writeln!(out, "{:-<48}", "");

    for vote in &report.votes {
        let _ = writeln!(out, "{:<12}{}", vote.kind.to_string(), vote.vote);
    }
    let consensus = &report.consensus;
    let _ = writeln!(
        out,
        "{:<12}{} (buy {}, sell {}, neutral {})",
        "Consensus",
        consensus.bias,
        consensus.buy_count,
        consensus.sell_count,
        consensus.neutral_count
    );
    let _ = writeln!(out, "{:-<48}", "");

    let structure = &report.structure;
    let _ = writeln!(
        out,
        "{:<12}{} (hint {})",
        "Pattern",
        structure.pattern,
        structure.pattern.directional_hint()
    );
    let _ = writeln!(out, "{:<12}{}", "Supports", fmt_levels(&structure.supports));
    let _ = writeln!(
        out,
        "{:<12}{}",
        "Resistances",
        fmt_levels(&structure.resistances)
    );
    if let Some(price) = report.last_price {
        let _ = writeln!(
            out,
            "{:<12}{} / {}",
            "Nearest",
            fmt_price(structure.nearest_support(price)),
            fmt_price(structure.nearest_resistance(price))
        );
    }

    out
}

/// 분류 결과를 표 형식으로 렌더링합니다.
pub fn render_classification(result: &ChartClassification) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<12}{} ({:.0}%)",
        "Signal", result.signal, result.confidence
    );
    if let Some(pattern) = &result.pattern {
        let _ = writeln!(out, "{:<12}{}", "Pattern", pattern);
    }
    let _ = writeln!(out, "{:<12}{}", "Candles", result.chart_data.len());
    let _ = writeln!(out, "{:<12}{}", "Supports", fmt_levels(&result.supports));
    let _ = writeln!(
        out,
        "{:<12}{}",
        "Resistances",
        fmt_levels(&result.resistances)
    );
    if !result.analysis.is_empty() {
        let _ = writeln!(out, "{:<12}{}", "Analysis", result.analysis);
    }

    out
}

/// 히스토리 통계를 한 줄로 렌더링합니다.
pub fn render_stats(stats: &HistoryStats) -> String {
    format!(
        "history: {} analyses, {} active, avg confidence {:.1}%",
        stats.total, stats.active, stats.average_confidence
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_analytics::ChartAnalyzer;
    use signal_core::{Bar, BarSnapshot, SignalVote};

    #[test]
    fn test_report_table_for_short_history() {
        let bars: Vec<Bar> = (0..5)
            .map(|i| Bar::new(i * 60, 1.0, 1.1, 0.9, 1.05))
            .collect();
        let report = ChartAnalyzer::new().analyze(&BarSnapshot::from(bars));

        let table = render_report(&report);
        assert!(table.contains("bars 5"));
        assert!(table.contains("last 1.05000"));
        assert!(table.contains("insufficient-data"));
        assert!(table.contains("Consensus   NEUTRAL (buy 0, sell 0, neutral 0)"));
    }

    #[test]
    fn test_report_table_shows_band_position_and_nearest_levels() {
        // 20개 종가 중 마지막만 튀어 %B가 계산되고, 앞쪽 골짜기가 지지 레벨이 됨
        let closes = [
            1.10, 1.09, 1.08, 1.07, 1.06, 1.05, 1.04, 1.05, 1.06, 1.07, 1.08, 1.09, 1.10, 1.09,
            1.08, 1.07, 1.08, 1.09, 1.10, 1.11,
        ];
        let bars: Vec<Bar> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(i as i64 * 60, c, c, c, c))
            .collect();
        let report = ChartAnalyzer::new().analyze(&BarSnapshot::from(bars));

        let bands = report.indicators.bollinger.unwrap();
        let expected_b = format!("{:.1}%", bands.percent_b(1.11).unwrap() * 100.0);

        let table = render_report(&report);
        assert!(table.contains(&format!("%B          {expected_b}")));
        assert!(table.contains("Nearest     1.04000 / -"));
    }

    #[test]
    fn test_classification_table() {
        let result = ChartClassification {
            signal: SignalVote::Buy,
            confidence: 82.0,
            analysis: "double bottom near support".to_string(),
            pattern: Some("double-bottom".to_string()),
            chart_data: Vec::new(),
            supports: vec![1.08],
            resistances: Vec::new(),
        };

        let table = render_classification(&result);
        assert!(table.contains("BUY (82%)"));
        assert!(table.contains("1.08000"));
        assert!(table.contains("Resistances -"));
    }

    #[test]
    fn test_stats_line() {
        let stats = HistoryStats {
            total: 4,
            active: 3,
            average_confidence: 67.5,
        };
        assert_eq!(
            render_stats(&stats),
            "history: 4 analyses, 3 active, avg confidence 67.5%"
        );
    }

    #[test]
    fn test_json_output() {
        let json = to_json(&HistoryStats::default()).unwrap();
        assert!(json.contains("\"average_confidence\": 0.0"));
    }
}
