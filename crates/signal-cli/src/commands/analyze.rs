//! 바 파일 분석 명령.

use std::path::Path;

use anyhow::{Context, Result};
use signal_analytics::{AnalysisReport, ChartAnalyzer};
use signal_core::{AppConfig, BarSnapshot};
use tracing::info;

use crate::output::{render_report, to_json, OutputFormat};

/// JSON 바 파일을 읽어 분석 보고서를 생성합니다.
pub fn analyze_file(config: &AppConfig, input: &Path) -> Result<AnalysisReport> {
    let bars = signal_data::load_bars(input)
        .with_context(|| format!("Failed to load bars from {}", input.display()))?;
    let analyzer = ChartAnalyzer::from_settings(&config.indicators)
        .context("Invalid indicator settings")?;

    info!(path = %input.display(), bars = bars.len(), "Analyzing bar file");
    Ok(analyzer.analyze(&BarSnapshot::from(bars)))
}

/// `analyze` 명령 실행.
pub fn run(config: &AppConfig, input: &Path, format: OutputFormat) -> Result<()> {
    let report = analyze_file(config, input)?;

    match format {
        OutputFormat::Table => print!("{}", render_report(&report)),
        OutputFormat::Json => println!("{}", to_json(&report)?),
    }
    Ok(())
}
