//! 차트 시그널 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # JSON 바 파일 분석
//! signal analyze --input data/bars.json
//!
//! # 합성 피드로 실시간 시뮬레이션 (1초 간격, 10틱)
//! signal simulate --ticks 10 --interval-ms 1000 --seed 42
//!
//! # 분류기 응답 정규화 (JSON 출력)
//! signal classify --input reply1.txt --input reply2.txt --format json
//!
//! # 설정 파일 지정
//! signal --config config/default.toml analyze --input data/bars.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use signal_cli::commands::{analyze, classify, simulate};
use signal_cli::output::OutputFormat;
use signal_core::{init_logging, AppConfig, LogConfig};
use tracing::debug;

/// 설정 파일을 지정하지 않았을 때 찾는 기본 경로.
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Parser)]
#[command(name = "signal")]
#[command(about = "Chart signal CLI - 기술적 지표와 패턴 기반 매매 신호", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (기본: config/default.toml, 없으면 기본값과 환경 변수만 사용)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// JSON 바 파일 분석
    Analyze {
        /// 바 배열 JSON 파일
        #[arg(short, long)]
        input: PathBuf,

        /// 출력 형식
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// 합성 피드 실시간 시뮬레이션
    Simulate {
        /// 생성할 새 바 수
        #[arg(short, long, default_value = "5")]
        ticks: usize,

        /// 바 생성 주기 (밀리초, 기본: 설정 파일 값)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// 난수 시드 (기본: 설정 파일 값)
        #[arg(long)]
        seed: Option<u64>,

        /// 출력 형식
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// 원격 분류기 응답 정규화 및 히스토리 통계
    Classify {
        /// 분류기 응답 텍스트 파일 (여러 번 지정 가능)
        #[arg(short, long, required = true)]
        input: Vec<PathBuf>,

        /// 출력 형식
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => AppConfig::load(DEFAULT_CONFIG_PATH)
            .with_context(|| format!("Failed to load config {DEFAULT_CONFIG_PATH}")),
        None => AppConfig::load_env().context("Failed to load config from environment"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    init_logging(LogConfig::from(&config.logging))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
    debug!(?config, "Configuration ready");

    match cli.command {
        Commands::Analyze { input, format } => analyze::run(&config, &input, format)?,

        Commands::Simulate {
            ticks,
            interval_ms,
            seed,
            format,
        } => {
            let options = simulate::SimulateConfig {
                ticks,
                interval_ms,
                seed,
                format,
            };
            simulate::run(&config, options).await?
        }

        Commands::Classify { input, format } => classify::run(&config, &input, format)?,
    }

    Ok(())
}
