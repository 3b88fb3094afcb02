//! 기능 ID 추출과 기능별 필드 조회.

use std::collections::HashSet;
use std::fmt;

use crate::catalog::Catalog;

/// 기능 ID 접두어로 구분되는 업무 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// 재고 관리
    Stock,
    /// 피킹/패킹
    Picking,
    /// 반품/불량
    Return,
    /// 출고/배송
    Outbound,
    /// 시스템/인증
    User,
    /// 통계/리포트
    Report,
    /// 설정/관리
    Config,
    /// 알 수 없는 접두어
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Stock,
        Category::Picking,
        Category::Return,
        Category::Outbound,
        Category::User,
        Category::Report,
        Category::Config,
        Category::Other,
    ];

    pub fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "STK" => Category::Stock,
            "PIC" => Category::Picking,
            "RET" => Category::Return,
            "OUT" => Category::Outbound,
            "USER" => Category::User,
            "RPT" => Category::Report,
            "CFG" => Category::Config,
            _ => Category::Other,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            Category::Stock => "STK",
            Category::Picking => "PIC",
            Category::Return => "RET",
            Category::Outbound => "OUT",
            Category::User => "USER",
            Category::Report => "RPT",
            Category::Config => "CFG",
            Category::Other => "?",
        }
    }
}

/// `STK-001` 같은 기능 식별자. 값 자체는 불투명 문자열로 취급한다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureId(String);

impl FeatureId {
    /// 공백뿐인 문자열은 ID가 될 수 없다.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn category(&self) -> Category {
        let prefix = self.0.split('-').next().unwrap_or_default();
        Category::from_prefix(prefix)
    }

    /// 접두어 뒤의 일련번호. 표시/정렬 용도 외의 의미는 없다.
    pub fn ordinal(&self) -> Option<u32> {
        let (_, tail) = self.0.split_once('-')?;
        tail.parse().ok()
    }

    /// 네임스페이스 안에서 이 기능의 필드를 가리키는 복합 키.
    pub fn key(&self, namespace: &str, field: FeatureField) -> String {
        namespaced_key(namespace, &format!("{}{}", self.0, field.suffix()))
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 기능 레코드를 구성하는 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureField {
    Name,
    Desc,
    Input,
    Output,
    Process,
}

impl FeatureField {
    /// 번역 대상이 되는 종속 필드.
    pub const TRANSLATABLE: [FeatureField; 3] =
        [FeatureField::Input, FeatureField::Output, FeatureField::Process];

    pub fn suffix(&self) -> &'static str {
        match self {
            FeatureField::Name => "-name",
            FeatureField::Desc => "-desc",
            FeatureField::Input => "-input",
            FeatureField::Output => "-output",
            FeatureField::Process => "-process",
        }
    }
}

impl fmt::Display for FeatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix().trim_start_matches('-'))
    }
}

pub fn namespaced_key(namespace: &str, local: &str) -> String {
    if namespace.is_empty() {
        local.to_string()
    } else {
        format!("{namespace}.{local}")
    }
}

/// 네임스페이스 안에서 `master_suffix`로 끝나는 키를 찾아 기능 ID 목록을 만든다.
/// 순서는 카탈로그 순서를 따르며 중복은 제거한다.
pub fn derive_feature_ids(catalog: &Catalog, namespace: &str, master_suffix: &str) -> Vec<FeatureId> {
    let prefix = namespaced_key(namespace, "");
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for key in catalog.keys() {
        let Some(local) = key.strip_prefix(prefix.as_str()) else {
            continue;
        };
        if local.contains('.') {
            continue;
        }
        let Some(raw) = local.strip_suffix(master_suffix) else {
            continue;
        };
        if let Some(id) = FeatureId::new(raw) {
            if seen.insert(id.clone()) {
                ids.push(id);
            }
        }
    }
    ids
}

/// 기능 정의서에 실린 WMS 기능 52개. 분류 순, 일련번호 순.
pub const WMS_FEATURE_IDS: [&str; 51] = [
    "STK-001", "STK-002", "STK-003", "STK-004", "STK-005", "STK-006", "STK-007", "STK-008",
    "STK-009", "STK-010", "STK-011", "STK-012", "STK-013", "STK-014", "STK-015",
    "PIC-001", "PIC-002", "PIC-003", "PIC-004", "PIC-005", "PIC-006", "PIC-007", "PIC-008",
    "PIC-009", "PIC-010",
    "RET-001", "RET-002", "RET-003", "RET-004", "RET-005", "RET-006", "RET-007",
    "OUT-001", "OUT-002", "OUT-003", "OUT-004", "OUT-005",
    "USER-001", "USER-002", "USER-003", "USER-004",
    "RPT-001", "RPT-002", "RPT-003", "RPT-004", "RPT-005", "RPT-006",
    "CFG-001", "CFG-002", "CFG-003", "CFG-004",
];

/// 이름으로 고정 ID 목록을 찾는다.
pub fn preset(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "wms" => Some(&WMS_FEATURE_IDS),
        _ => None,
    }
}

/// 번역 가능한 기능 레코드. 세 종속 필드가 모두 비어 있지 않다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    pub id: FeatureId,
    pub input: String,
    pub output: String,
    pub process: String,
}

impl FeatureRecord {
    pub fn fields(&self) -> [(FeatureField, &str); 3] {
        [
            (FeatureField::Input, self.input.as_str()),
            (FeatureField::Output, self.output.as_str()),
            (FeatureField::Process, self.process.as_str()),
        ]
    }
}

/// 원본 카탈로그에서 한 기능을 조회한 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLookup {
    Complete(FeatureRecord),
    /// 아직 작성되지 않은 필드가 있다.
    Incomplete { missing: Vec<FeatureField> },
    /// 필드가 있지만 문자열이 아니다.
    Invalid { field: FeatureField },
}

pub fn lookup_record(catalog: &Catalog, namespace: &str, id: &FeatureId) -> RecordLookup {
    let mut texts = Vec::with_capacity(3);
    let mut missing = Vec::new();
    for field in FeatureField::TRANSLATABLE {
        match catalog.get(&id.key(namespace, field)) {
            None | Some(serde_json::Value::Null) => missing.push(field),
            Some(serde_json::Value::String(s)) if s.is_empty() => missing.push(field),
            Some(serde_json::Value::String(s)) => texts.push(s.clone()),
            Some(_) => return RecordLookup::Invalid { field },
        }
    }
    if !missing.is_empty() {
        return RecordLookup::Incomplete { missing };
    }
    let mut texts = texts.into_iter();
    RecordLookup::Complete(FeatureRecord {
        id: id.clone(),
        input: texts.next().unwrap_or_default(),
        output: texts.next().unwrap_or_default(),
        process: texts.next().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(pairs: &[(&str, &str)]) -> Catalog {
        let mut cat = Catalog::new(crate::catalog::CatalogShape::Flat);
        for (k, v) in pairs {
            cat.insert(*k, *v);
        }
        cat
    }

    #[test]
    fn ids_come_from_master_suffix_in_catalog_order() {
        let cat = catalog(&[
            ("features.PIC-002-name", "피킹"),
            ("features.STK-001-name", "재고"),
            ("features.STK-001-desc", "설명"),
            ("features.PIC-002-name", "중복"),
            ("nav.home-name", "홈"),
            ("features.sub.X-name", "깊은 키"),
        ]);
        let ids: Vec<_> = derive_feature_ids(&cat, "features", "-name")
            .into_iter()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(ids, ["PIC-002", "STK-001"]);
    }

    #[test]
    fn empty_namespace_reads_top_level() {
        let cat = catalog(&[("RET-003-name", "반품"), ("features.STK-001-name", "재고")]);
        let ids = derive_feature_ids(&cat, "", "-name");
        assert_eq!(ids, [FeatureId::new("RET-003").unwrap()]);
    }

    #[test]
    fn category_and_ordinal() {
        let id = FeatureId::new("USER-004").unwrap();
        assert_eq!(id.category(), Category::User);
        assert_eq!(id.ordinal(), Some(4));
        let odd = FeatureId::new("ZZZ-abc").unwrap();
        assert_eq!(odd.category(), Category::Other);
        assert_eq!(odd.ordinal(), None);
        assert!(FeatureId::new("  ").is_none());
    }

    #[test]
    fn record_requires_all_three_fields() {
        let cat = catalog(&[
            ("features.STK-015-input", "상품 ID (필수)"),
            ("features.STK-015-output", ""),
        ]);
        let id = FeatureId::new("STK-015").unwrap();
        assert_eq!(
            lookup_record(&cat, "features", &id),
            RecordLookup::Incomplete {
                missing: vec![FeatureField::Output, FeatureField::Process]
            }
        );
    }

    #[test]
    fn complete_record_keeps_field_texts() {
        let cat = catalog(&[
            ("features.STK-015-input", "a"),
            ("features.STK-015-output", "b"),
            ("features.STK-015-process", "c"),
        ]);
        let id = FeatureId::new("STK-015").unwrap();
        let RecordLookup::Complete(record) = lookup_record(&cat, "features", &id) else {
            panic!("expected complete record");
        };
        assert_eq!(record.fields().map(|(_, t)| t), ["a", "b", "c"]);
    }

    #[test]
    fn non_string_field_is_invalid() {
        let mut cat = catalog(&[("features.STK-001-input", "a")]);
        cat.insert("features.STK-001-output", serde_json::json!(["x"]));
        let id = FeatureId::new("STK-001").unwrap();
        assert_eq!(
            lookup_record(&cat, "features", &id),
            RecordLookup::Invalid {
                field: FeatureField::Output
            }
        );
    }

    #[test]
    fn wms_preset_covers_every_category_in_order() {
        let ids = preset("wms").unwrap();
        assert_eq!(ids.len(), 52);
        assert_eq!(ids.first(), Some(&"STK-001"));
        assert_eq!(ids.last(), Some(&"CFG-004"));
        let parsed: Vec<FeatureId> = ids.iter().filter_map(|raw| FeatureId::new(*raw)).collect();
        assert!(parsed.iter().all(|id| id.category() != Category::Other));
        assert!(parsed
            .windows(2)
            .all(|w| (w[0].category(), w[0].ordinal()) < (w[1].category(), w[1].ordinal())));
        assert!(preset("erp").is_none());
    }
}
