//! 번역 결과를 대상 카탈로그에 반영한다.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::ops::AddAssign;

use crate::catalog::Catalog;
use crate::feature::{FeatureField, FeatureId};

/// 대상 카탈로그에 이미 값이 있을 때의 처리 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// 비어 있는 필드만 채운다. 기존 번역은 건드리지 않는다.
    #[default]
    FillMissing,
    /// 항상 새 값으로 덮어쓴다.
    Overwrite,
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WritePolicy::FillMissing => "fill_missing",
            WritePolicy::Overwrite => "overwrite",
        })
    }
}

/// 필드 단위 반영 결과 집계.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// 없거나 비어 있던 필드를 채움
    pub inserted: usize,
    /// 다른 값이 있던 필드를 덮어씀
    pub replaced: usize,
    /// 그대로 둠
    pub kept: usize,
}

impl MergeOutcome {
    pub fn changed(&self) -> bool {
        self.inserted + self.replaced > 0
    }
}

impl AddAssign for MergeOutcome {
    fn add_assign(&mut self, rhs: Self) {
        self.inserted += rhs.inserted;
        self.replaced += rhs.replaced;
        self.kept += rhs.kept;
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// 한 기능의 필드들을 정책에 따라 대상 카탈로그에 쓴다.
pub fn merge(
    target: &mut Catalog,
    namespace: &str,
    feature_id: &FeatureId,
    fields: &[(FeatureField, String)],
    policy: WritePolicy,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    for (field, text) in fields {
        let key = feature_id.key(namespace, *field);
        match target.get(&key) {
            None => {
                target.insert(key, text.as_str());
                outcome.inserted += 1;
            }
            Some(existing) if is_blank(existing) => {
                target.insert(key, text.as_str());
                outcome.inserted += 1;
            }
            Some(existing) => {
                let same = existing.as_str() == Some(text.as_str());
                if policy == WritePolicy::Overwrite && !same {
                    target.insert(key, text.as_str());
                    outcome.replaced += 1;
                } else {
                    outcome.kept += 1;
                }
            }
        }
    }
    outcome
}
