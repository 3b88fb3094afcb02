use std::io::{self, Write};

use crate::app::RunReport;
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::translate::TranslationMode;

/// 실행 설정 요약을 출력한다.
pub fn print_header(out: &mut impl Write, tr: &Translator, cfg: &Config) -> io::Result<()> {
    writeln!(out, "{}", tr.t(keys::HEADING))?;
    writeln!(out, "{} {}", tr.t(keys::MODE), cfg.mode)?;
    writeln!(out, "{} {}", tr.t(keys::POLICY), cfg.write_policy)?;
    Ok(())
}

/// 로드한 파일과 처리 결과를 사람이 읽을 수 있는 형태로 출력한다.
pub fn print_report(
    out: &mut impl Write,
    tr: &Translator,
    cfg: &Config,
    report: &RunReport,
) -> io::Result<()> {
    writeln!(
        out,
        "{} {} ({})",
        tr.t(keys::LOADED_SOURCE),
        report.source_path.display(),
        report.source_entries
    )?;
    for locale in &report.locales {
        writeln!(out, "{} {}", tr.t(keys::LOADED_TARGET), locale.path.display())?;
    }

    writeln!(out, "{}", tr.t(keys::SUMMARY_HEADING))?;
    writeln!(out, "{} {}", tr.t(keys::SUMMARY_PROCESSED), report.processed())?;
    writeln!(out, "{} {}", tr.t(keys::SUMMARY_SKIPPED), report.skipped())?;
    writeln!(out, "{} {}", tr.t(keys::SUMMARY_FAILED), report.failed())?;
    let skipped = report.skipped_ids();
    if !skipped.is_empty() {
        let ids: Vec<&str> = skipped.iter().map(|id| id.as_str()).collect();
        writeln!(out, "{} {}", tr.t(keys::SUMMARY_SKIPPED_IDS), ids.join(", "))?;
    }

    let by_category = report.processed_by_category();
    if !by_category.is_empty() {
        let parts: Vec<String> = by_category
            .iter()
            .map(|(cat, n)| format!("{} {n}", cat.prefix()))
            .collect();
        writeln!(out, "{} {}", tr.t(keys::SUMMARY_BY_CATEGORY), parts.join(", "))?;
    }

    for locale in &report.locales {
        let counts = format!(
            "{} {}, {} {}, {} {}",
            tr.t(keys::LOCALE_INSERTED),
            locale.merge.inserted,
            tr.t(keys::LOCALE_REPLACED),
            locale.merge.replaced,
            tr.t(keys::LOCALE_KEPT),
            locale.merge.kept
        );
        let status = if locale.written {
            tr.t(keys::LOCALE_SAVED)
        } else {
            tr.t(keys::LOCALE_UNCHANGED)
        };
        writeln!(out, "  [{}] {status} {} ({counts})", locale.locale, locale.path.display())?;
    }

    if report.dry_run {
        writeln!(out, "{}", tr.t(keys::DRY_RUN))?;
    }
    if cfg.mode == TranslationMode::Copy && report.processed() > 0 {
        writeln!(out, "{}", tr.t(keys::COPY_NOTE))?;
    }
    writeln!(out, "{}", tr.t(keys::DONE))?;
    Ok(())
}

/// 실행을 중단시킨 오류를 진행 메시지 언어로 출력한다.
pub fn print_error(out: &mut impl Write, tr: &Translator, err: &dyn std::error::Error) -> io::Result<()> {
    writeln!(out, "{}: {err}", tr.t(keys::ERROR_PREFIX))
}
