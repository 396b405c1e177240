//! 원격 분류기 응답 정규화 명령.
//!
//! 응답 파일마다 분류 결과를 정규화해 히스토리에 기록하고, 응답에 포함된
//! 캔들이 있으면 엔진으로 다시 분석합니다.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use signal_analytics::{AnalysisReport, ChartAnalyzer};
use signal_core::{
    AppConfig, BarSnapshot, ChartClassification, HistoryStats, SignalHistory, SignalRecord,
};
use tracing::{info, warn};

use crate::output::{render_classification, render_report, render_stats, to_json, OutputFormat};

/// 응답 하나의 처리 결과.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedReply {
    /// 응답 파일 경로
    pub source: PathBuf,
    /// 정규화된 분류 결과
    pub classification: ChartClassification,
    /// 추출된 캔들에 대한 엔진 분석 (캔들이 없으면 생략)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisReport>,
}

/// 전체 처리 결과.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyOutcome {
    /// 응답별 결과 (입력 순서)
    pub replies: Vec<ClassifiedReply>,
    /// 히스토리 통계
    pub stats: HistoryStats,
}

/// 응답 텍스트 하나를 정규화하고 분석합니다.
pub fn classify_reply(
    analyzer: &ChartAnalyzer,
    text: &str,
    now: DateTime<Utc>,
) -> Result<(ChartClassification, Option<AnalysisReport>)> {
    let classification =
        ChartClassification::from_model_text(text, now).context("Failed to parse classifier reply")?;

    let analysis = if classification.chart_data.is_empty() {
        None
    } else {
        let snapshot = BarSnapshot::from(classification.chart_data.clone());
        Some(analyzer.analyze(&snapshot))
    };

    Ok((classification, analysis))
}

/// 여러 응답 파일을 처리하고 히스토리 통계를 계산합니다.
///
/// 읽거나 해석할 수 없는 응답은 경고 후 건너뜁니다.
pub fn classify_files(config: &AppConfig, inputs: &[PathBuf]) -> Result<ClassifyOutcome> {
    let analyzer = ChartAnalyzer::from_settings(&config.indicators)
        .context("Invalid indicator settings")?;
    let mut history = SignalHistory::default();
    let mut replies = Vec::with_capacity(inputs.len());

    for path in inputs {
        let now = Utc::now();
        let outcome = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
            .and_then(|text| classify_reply(&analyzer, &text, now));

        match outcome {
            Ok((classification, analysis)) => {
                history.record(SignalRecord::from_classification(&classification, now));
                info!(
                    path = %path.display(),
                    signal = %classification.signal,
                    confidence = classification.confidence,
                    candles = classification.chart_data.len(),
                    "Classifier reply normalized"
                );
                replies.push(ClassifiedReply {
                    source: path.clone(),
                    classification,
                    analysis,
                });
            }
            Err(e) => warn!(path = %path.display(), "Skipping reply: {:#}", e),
        }
    }

    if replies.is_empty() && !inputs.is_empty() {
        anyhow::bail!("No classifier reply could be processed");
    }

    Ok(ClassifyOutcome {
        replies,
        stats: history.stats(),
    })
}

/// `classify` 명령 실행.
pub fn run(config: &AppConfig, inputs: &[PathBuf], format: OutputFormat) -> Result<()> {
    let outcome = classify_files(config, inputs)?;

    match format {
        OutputFormat::Json => println!("{}", to_json(&outcome)?),
        OutputFormat::Table => {
            for reply in &outcome.replies {
                println!("== {}", reply.source.display());
                print!("{}", render_classification(&reply.classification));
                if let Some(report) = &reply.analysis {
                    println!();
                    print!("{}", render_report(report));
                }
                println!();
            }
            println!("{}", render_stats(&outcome.stats));
        }
    }
    Ok(())
}
