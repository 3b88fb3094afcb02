//! 용어표(term pack) 로드.
//!
//! 형식은 순서를 보존하기 위해 `[[term]]` 배열을 쓴다.
//!
//! ```toml
//! [[term]]
//! source = "재고"
//! target = "Stock"
//! ```

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::translate::TermMap;

/// 용어표 로드 중 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum TermPackError {
    #[error("용어표 입출력 오류 ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("용어표 파싱 오류 ({}): {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("`{0}` 언어의 용어표가 없음")]
    Unsupported(String),
}

#[derive(Debug, Deserialize)]
struct TermPackFile {
    #[serde(default, rename = "term")]
    terms: Vec<TermEntry>,
}

#[derive(Debug, Deserialize)]
struct TermEntry {
    source: String,
    target: String,
}

/// TOML 문자열을 용어표로 변환한다. 항목 순서를 그대로 유지한다.
pub fn parse_term_pack(src: &str) -> Result<TermMap, toml::de::Error> {
    let file: TermPackFile = toml::from_str(src)?;
    Ok(file
        .terms
        .into_iter()
        .map(|e| (e.source, e.target))
        .collect())
}

/// 바이너리에 포함된 기본 용어표(한국어 원문 기준).
pub fn built_in(locale: &str) -> Option<TermMap> {
    let src = match base_code(&locale.to_lowercase()).as_str() {
        "en" => include_str!("../terms/en.toml"),
        "vi" => include_str!("../terms/vi.toml"),
        _ => return None,
    };
    parse_term_pack(src).ok()
}

fn base_code(code: &str) -> String {
    code.split(['-', '_']).next().unwrap_or_default().to_string()
}

/// 대상 언어의 용어표를 찾는다.
/// 디렉터리가 주어지면 `<dir>/<code>.toml`, `<dir>/<base>.toml` 순으로 찾고,
/// 없으면 내장 용어표로 폴백한다.
pub fn load_terms(locale: &str, dir: Option<&Path>) -> Result<TermMap, TermPackError> {
    if let Some(dir) = dir {
        let code = locale.to_lowercase();
        let mut candidates = vec![code.clone()];
        let base = base_code(&code);
        if base != code {
            candidates.push(base);
        }
        for candidate in candidates {
            let path = dir.join(format!("{candidate}.toml"));
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(source) => return Err(TermPackError::Io { path, source }),
            };
            let terms =
                parse_term_pack(&content).map_err(|source| TermPackError::Parse {
                    path: path.clone(),
                    source,
                })?;
            debug!(path = %path.display(), terms = terms.len(), "용어표 파일 사용");
            return Ok(terms);
        }
    }
    built_in(locale).ok_or_else(|| TermPackError::Unsupported(locale.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_packs_parse_in_order() {
        let en = built_in("en").expect("en pack");
        let vi = built_in("vi").expect("vi pack");
        assert_eq!(en.len(), 51);
        assert_eq!(vi.len(), 51);
        let head: Vec<_> = en.iter().take(4).collect();
        assert_eq!(
            head,
            [
                ("필수", "Required"),
                ("선택", "Optional"),
                ("기본값", "Default"),
                ("상품", "Product")
            ]
        );
        assert_eq!(vi.iter().last(), Some(("대기", "Chờ")));
    }

    #[test]
    fn region_code_falls_back_to_base_pack() {
        assert_eq!(built_in("en-US"), built_in("en"));
        assert!(built_in("de").is_none());
    }

    #[test]
    fn directory_pack_overrides_built_in() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("en.toml"),
            "[[term]]\nsource = \"재고\"\ntarget = \"Inventory\"\n",
        )
        .unwrap();
        let terms = load_terms("en-us", Some(dir.path())).unwrap();
        assert_eq!(terms.iter().collect::<Vec<_>>(), [("재고", "Inventory")]);

        // 디렉터리에 파일이 없으면 내장 용어표
        let vi = load_terms("vi", Some(dir.path())).unwrap();
        assert_eq!(Some(vi), built_in("vi"));
    }

    #[test]
    fn broken_pack_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("vi.toml"), "[[term]]\nsource = 1\n").unwrap();
        assert!(matches!(
            load_terms("vi", Some(dir.path())),
            Err(TermPackError::Parse { .. })
        ));
    }

    #[test]
    fn unknown_locale_without_pack_is_unsupported() {
        assert!(matches!(
            load_terms("ja", None),
            Err(TermPackError::Unsupported(code)) if code == "ja"
        ));
    }
}
