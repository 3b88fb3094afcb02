//! 용어 치환 기반의 간이 번역.
//!
//! 용어표의 각 항목을 정의된 순서대로 하나씩 적용하며, 앞 단계의 결과가 다음 단계의
//! 입력이 된다. 단어 경계를 보지 않으므로 다른 용어의 일부인 용어가 먼저 오면
//! 결과가 깨질 수 있다. 이 순서 의존성은 그대로 유지한다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// "데이터 없음"을 뜻하는 기본 자리표시자. 번역하지 않는다.
pub const DEFAULT_PLACEHOLDER: &str = "-";

/// 순서가 있는 원문 용어 → 대상 용어 표.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermMap {
    pairs: Vec<(String, String)>,
}

impl TermMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.pairs.push((source.into(), target.into()));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for TermMap {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut map = TermMap::new();
        for (s, t) in iter {
            map.push(s, t);
        }
        map
    }
}

/// 텍스트의 용어를 순차 치환한다. 빈 문자열과 자리표시자는 그대로 돌려준다.
pub fn translate(text: &str, terms: &TermMap, placeholder: &str) -> String {
    if text.is_empty() || text == placeholder {
        return text.to_string();
    }
    let mut result = text.to_string();
    for (source, target) in terms.iter() {
        if source.is_empty() {
            continue;
        }
        if result.contains(source) {
            result = result.replace(source, target);
        }
    }
    result
}

/// 대상 언어 값을 만드는 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationMode {
    /// 용어표 치환
    #[default]
    Terms,
    /// 한국어 원문을 그대로 복사(수동 번역 전 단계)
    Copy,
}

impl TranslationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationMode::Terms => "terms",
            TranslationMode::Copy => "copy",
        }
    }
}

impl fmt::Display for TranslationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranslationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "terms" => Ok(TranslationMode::Terms),
            "copy" => Ok(TranslationMode::Copy),
            other => Err(format!("알 수 없는 번역 방식: {other} (terms|copy)")),
        }
    }
}

/// 방식에 따라 필드 값을 만든다. 복사 모드에서는 용어표가 필요 없다.
pub fn render_field(
    text: &str,
    mode: TranslationMode,
    terms: Option<&TermMap>,
    placeholder: &str,
) -> String {
    match (mode, terms) {
        (TranslationMode::Terms, Some(terms)) => translate(text, terms, placeholder),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_and_empty_are_identity() {
        let terms: TermMap = [("-", "dash"), ("재고", "Stock")].into_iter().collect();
        assert_eq!(translate("-", &terms, DEFAULT_PLACEHOLDER), "-");
        assert_eq!(translate("", &terms, DEFAULT_PLACEHOLDER), "");
    }

    #[test]
    fn custom_placeholder() {
        let terms: TermMap = [("없음", "None")].into_iter().collect();
        assert_eq!(translate("없음", &terms, "없음"), "없음");
        assert_eq!(translate("없음", &terms, "-"), "None");
    }

    #[test]
    fn only_mapped_terms_change() {
        let terms: TermMap = [("재고", "Stock")].into_iter().collect();
        assert_eq!(translate("재고 현황", &terms, "-"), "Stock 현황");
    }

    #[test]
    fn substitution_is_sequential_in_definition_order() {
        let terms: TermMap = [("상품", "Product"), ("상품명", "Product Name")]
            .into_iter()
            .collect();
        assert_eq!(translate("상품명", &terms, "-"), "Product명");

        let reversed: TermMap = [("상품명", "Product Name"), ("상품", "Product")]
            .into_iter()
            .collect();
        assert_eq!(translate("상품명", &reversed, "-"), "Product Name");
    }

    #[test]
    fn later_terms_see_earlier_output() {
        let terms: TermMap = [("입고", "In"), ("In", "Inbound")].into_iter().collect();
        assert_eq!(translate("입고 처리", &terms, "-"), "Inbound 처리");
    }

    #[test]
    fn empty_source_term_is_ignored() {
        let terms: TermMap = [("", "X"), ("재고", "Stock")].into_iter().collect();
        assert_eq!(translate("재고", &terms, "-"), "Stock");
    }

    #[test]
    fn copy_mode_keeps_source_text() {
        let terms: TermMap = [("재고", "Stock")].into_iter().collect();
        assert_eq!(
            render_field("재고", TranslationMode::Copy, Some(&terms), "-"),
            "재고"
        );
        assert_eq!(
            render_field("재고", TranslationMode::Terms, Some(&terms), "-"),
            "Stock"
        );
    }

    #[test]
    fn mode_parses_from_flag_text() {
        assert_eq!("Copy".parse::<TranslationMode>(), Ok(TranslationMode::Copy));
        assert!("machine".parse::<TranslationMode>().is_err());
    }
}
