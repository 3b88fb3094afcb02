use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wms_feature_translator::{app, config, i18n, merge::WritePolicy, translate::TranslationMode, ui_cli};

/// 한국어 기능 정의서 카탈로그를 기준으로 en/vi 카탈로그를 채운다.
#[derive(Debug, Parser)]
#[command(name = "wms_feature_translator", version, about)]
struct Cli {
    /// 설정 파일 경로 (없으면 기본값으로 생성)
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// 메시지 카탈로그 디렉터리
    #[arg(long)]
    messages_dir: Option<PathBuf>,
    /// 번역 방식 (terms|copy)
    #[arg(long)]
    mode: Option<TranslationMode>,
    /// 기존 번역도 덮어쓴다
    #[arg(long)]
    overwrite: bool,
    /// 계산만 하고 파일은 쓰지 않는다
    #[arg(long)]
    dry_run: bool,
    /// 용어표 디렉터리
    #[arg(long)]
    terms_dir: Option<PathBuf>,
    /// 진행 메시지 언어 (auto/ko/en)
    #[arg(long, short = 'L')]
    lang: Option<String>,
    /// 로그 상세도 (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 일괄 번역을 한 번 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    // 설정을 읽기 전에 실패해도 CLI/시스템 언어로 오류를 보여준다.
    let mut tr = i18n::Translator::new(&i18n::resolve_language(cli.lang.as_deref(), None));
    match try_run(cli, &mut tr) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = ui_cli::print_error(&mut io::stderr(), &tr, &*err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn try_run(cli: Cli, tr: &mut i18n::Translator) -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = config::load_or_default(&cli.config)?;
    if let Some(dir) = cli.messages_dir {
        cfg.messages_dir = dir;
    }
    if let Some(mode) = cli.mode {
        cfg.mode = mode;
    }
    if cli.overwrite {
        cfg.write_policy = WritePolicy::Overwrite;
    }
    if let Some(dir) = cli.terms_dir {
        cfg.terms_dir = Some(dir);
    }

    let lang = i18n::resolve_language(cli.lang.as_deref(), Some(cfg.language.as_str()));
    *tr = i18n::Translator::new(&lang);

    let mut stdout = io::stdout().lock();
    ui_cli::print_header(&mut stdout, tr, &cfg)?;
    let report = app::run(&cfg, cli.dry_run)?;
    ui_cli::print_report(&mut stdout, tr, &cfg, &report)?;
    Ok(())
}
