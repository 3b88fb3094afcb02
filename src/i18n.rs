use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const HEADING: &str = "run.heading";
    pub const LOADED_SOURCE: &str = "run.loaded_source";
    pub const LOADED_TARGET: &str = "run.loaded_target";
    pub const MODE: &str = "run.mode";
    pub const POLICY: &str = "run.policy";

    pub const SUMMARY_HEADING: &str = "summary.heading";
    pub const SUMMARY_PROCESSED: &str = "summary.processed";
    pub const SUMMARY_SKIPPED: &str = "summary.skipped";
    pub const SUMMARY_FAILED: &str = "summary.failed";
    pub const SUMMARY_SKIPPED_IDS: &str = "summary.skipped_ids";
    pub const SUMMARY_BY_CATEGORY: &str = "summary.by_category";
    pub const LOCALE_INSERTED: &str = "locale.inserted";
    pub const LOCALE_REPLACED: &str = "locale.replaced";
    pub const LOCALE_KEPT: &str = "locale.kept";
    pub const LOCALE_SAVED: &str = "locale.saved";
    pub const LOCALE_UNCHANGED: &str = "locale.unchanged";
    pub const DRY_RUN: &str = "run.dry_run";
    pub const COPY_NOTE: &str = "run.copy_note";
    pub const DONE: &str = "run.done";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }
}

/// 진행 메시지 번역기.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
        }
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "ko".to_string())
}

/// "en_US.UTF-8", "ko-KR" 같은 표기에서 지원 언어 코드를 뽑는다. auto나 빈 값은 None.
fn normalize_lang(code: &str) -> Option<String> {
    let lang = code
        .trim()
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_lang(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_lang(&lang) {
            return Some(code);
        }
    }
    None
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        HEADING => "=== WMS 기능 정의서 번역 ===",
        LOADED_SOURCE => "원본 카탈로그:",
        LOADED_TARGET => "대상 카탈로그:",
        MODE => "번역 방식:",
        POLICY => "쓰기 정책:",
        SUMMARY_HEADING => "\n-- 결과 --",
        SUMMARY_PROCESSED => "처리한 기능:",
        SUMMARY_SKIPPED => "건너뜀(원문 미작성):",
        SUMMARY_FAILED => "실패:",
        SUMMARY_SKIPPED_IDS => "건너뛴 기능:",
        SUMMARY_BY_CATEGORY => "분류별 처리:",
        LOCALE_INSERTED => "추가",
        LOCALE_REPLACED => "교체",
        LOCALE_KEPT => "유지",
        LOCALE_SAVED => "저장 완료:",
        LOCALE_UNCHANGED => "변경 없음:",
        DRY_RUN => "드라이런: 파일을 쓰지 않았습니다.",
        COPY_NOTE => "참고: 한국어 원문이 그대로 복사되었습니다. 실제 번역은 수동으로 진행해야 합니다.",
        DONE => "번역 완료!",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        HEADING => "=== WMS feature catalog translation ===",
        LOADED_SOURCE => "Source catalog:",
        LOADED_TARGET => "Target catalog:",
        MODE => "Mode:",
        POLICY => "Write policy:",
        SUMMARY_HEADING => "\n-- Summary --",
        SUMMARY_PROCESSED => "Features processed:",
        SUMMARY_SKIPPED => "Skipped (incomplete source):",
        SUMMARY_FAILED => "Failed:",
        SUMMARY_SKIPPED_IDS => "Skipped features:",
        SUMMARY_BY_CATEGORY => "Processed by category:",
        LOCALE_INSERTED => "inserted",
        LOCALE_REPLACED => "replaced",
        LOCALE_KEPT => "kept",
        LOCALE_SAVED => "Saved:",
        LOCALE_UNCHANGED => "Unchanged:",
        DRY_RUN => "Dry run: no files were written.",
        COPY_NOTE => "Note: Korean source text was copied verbatim. Translate it manually.",
        DONE => "Done.",
        _ => return None,
    })
}
