use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{self, Catalog, CatalogError, CatalogShape};
use crate::config::{Config, ConfigError};
use crate::feature::{self, Category, FeatureField, FeatureId, RecordLookup};
use crate::merge::{self, MergeOutcome};
use crate::terms::{self, TermPackError};
use crate::translate::{self, TermMap, TranslationMode};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다. 모두 실행을 중단시킨다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("카탈로그 오류: {0}")]
    Catalog(#[from] CatalogError),
    #[error("용어표 오류: {0}")]
    TermPack(#[from] TermPackError),
    #[error("`{locale}` 카탈로그 형태({found})가 기준 형태({expected})와 다름")]
    ShapeMismatch {
        locale: String,
        found: CatalogShape,
        expected: CatalogShape,
    },
}

/// 기능 하나의 처리 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Translated,
    /// 원문이 아직 작성되지 않음
    Skipped { missing: Vec<FeatureField> },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordReport {
    pub id: FeatureId,
    pub outcome: RecordOutcome,
}

/// 대상 언어 하나의 반영 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleReport {
    pub locale: String,
    pub path: PathBuf,
    pub merge: MergeOutcome,
    /// 실제로 파일을 다시 썼는지 여부
    pub written: bool,
}

/// 한 번의 일괄 실행 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub source_path: PathBuf,
    pub source_entries: usize,
    pub records: Vec<RecordReport>,
    pub locales: Vec<LocaleReport>,
    pub dry_run: bool,
}

impl RunReport {
    fn count(&self, pred: impl Fn(&RecordOutcome) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn processed(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Translated))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RecordOutcome::Failed { .. }))
    }

    /// 건너뛴 기능 ID. 분류, 일련번호 순으로 정렬한다.
    pub fn skipped_ids(&self) -> Vec<&FeatureId> {
        let mut ids: Vec<&FeatureId> = self
            .records
            .iter()
            .filter(|r| matches!(r.outcome, RecordOutcome::Skipped { .. }))
            .map(|r| &r.id)
            .collect();
        ids.sort_by(|a, b| {
            (a.category(), a.ordinal(), a.as_str()).cmp(&(b.category(), b.ordinal(), b.as_str()))
        });
        ids
    }

    /// 분류별 처리 건수. 0건인 분류는 뺀다.
    pub fn processed_by_category(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .iter()
            .map(|cat| {
                let n = self
                    .records
                    .iter()
                    .filter(|r| r.outcome == RecordOutcome::Translated && r.id.category() == *cat)
                    .count();
                (*cat, n)
            })
            .filter(|(_, n)| *n > 0)
            .collect()
    }
}

struct Target {
    locale: String,
    path: PathBuf,
    catalog: Catalog,
    terms: Option<TermMap>,
    merge: MergeOutcome,
}

fn load_target(config: &Config, locale: &str) -> Result<Target, AppError> {
    let path = config.catalog_path(locale);
    let catalog = catalog::load(&path)?;
    let terms = match config.mode {
        TranslationMode::Terms => Some(terms::load_terms(locale, config.terms_dir.as_deref())?),
        TranslationMode::Copy => None,
    };
    info!(locale, path = %path.display(), entries = catalog.len(), "대상 카탈로그 로드");
    Ok(Target {
        locale: locale.to_string(),
        path,
        catalog,
        terms,
        merge: MergeOutcome::default(),
    })
}

/// 모든 카탈로그를 한 형태로 맞춘다. 원본에 복합 키가 없으면
/// 처음으로 형태가 드러난 대상 카탈로그를 기준으로 삼는다.
fn reconcile_shapes(source: &Catalog, targets: &mut [Target]) -> Result<(), AppError> {
    let expected = std::iter::once(source)
        .chain(targets.iter().map(|t| &t.catalog))
        .find(|c| !c.is_shapeless())
        .map(Catalog::shape);
    let Some(expected) = expected else {
        return Ok(());
    };
    for target in targets.iter_mut() {
        if target.catalog.is_shapeless() {
            target.catalog.set_shape(expected);
        } else if target.catalog.shape() != expected {
            return Err(AppError::ShapeMismatch {
                locale: target.locale.clone(),
                found: target.catalog.shape(),
                expected,
            });
        }
    }
    Ok(())
}

fn feature_ids(config: &Config, source: &Catalog) -> Vec<FeatureId> {
    if let Some(list) = &config.feature_ids {
        return list.iter().filter_map(|raw| FeatureId::new(raw.as_str())).collect();
    }
    if let Some(preset) = config.feature_preset.as_deref().and_then(feature::preset) {
        return preset.iter().filter_map(|raw| FeatureId::new(*raw)).collect();
    }
    feature::derive_feature_ids(source, &config.namespace, &config.master_suffix)
}

/// 원본 카탈로그를 기준으로 모든 대상 카탈로그를 한 번에 채운다.
///
/// 모든 대상 파일을 메모리에서 계산하고 직렬화까지 끝낸 뒤에만 쓰기 시작하므로
/// 치명적 오류가 나면 어떤 파일도 바뀌지 않는다.
pub fn run(config: &Config, dry_run: bool) -> Result<RunReport, AppError> {
    config.validate()?;

    let source_path = config.catalog_path(&config.source_locale);
    let source = catalog::load(&source_path)?;
    info!(path = %source_path.display(), entries = source.len(), "원본 카탈로그 로드");

    let mut targets = config
        .target_locales
        .iter()
        .map(|locale| load_target(config, locale))
        .collect::<Result<Vec<_>, _>>()?;
    reconcile_shapes(&source, &mut targets)?;

    let ids = feature_ids(config, &source);
    debug!(count = ids.len(), "기능 ID 추출");

    let mut records = Vec::with_capacity(ids.len());
    for id in ids {
        let outcome = match feature::lookup_record(&source, &config.namespace, &id) {
            RecordLookup::Complete(record) => {
                for target in &mut targets {
                    let fields: Vec<(FeatureField, String)> = record
                        .fields()
                        .iter()
                        .map(|(field, text)| {
                            let value = translate::render_field(
                                text,
                                config.mode,
                                target.terms.as_ref(),
                                &config.placeholder,
                            );
                            (*field, value)
                        })
                        .collect();
                    let outcome = merge::merge(
                        &mut target.catalog,
                        &config.namespace,
                        &id,
                        &fields,
                        config.write_policy,
                    );
                    target.merge += outcome;
                }
                debug!(feature = %id, "번역 반영");
                RecordOutcome::Translated
            }
            RecordLookup::Incomplete { missing } => {
                debug!(feature = %id, ?missing, "원문 미작성으로 건너뜀");
                RecordOutcome::Skipped { missing }
            }
            RecordLookup::Invalid { field } => {
                let reason = format!("`{field}` 필드가 문자열이 아님");
                warn!(feature = %id, %reason, "기능 처리 실패");
                RecordOutcome::Failed { reason }
            }
        };
        records.push(RecordReport { id, outcome });
    }

    let rendered = targets
        .iter()
        .map(|t| t.catalog.render())
        .collect::<Result<Vec<_>, _>>()?;

    let mut locales = Vec::with_capacity(targets.len());
    for (target, body) in targets.into_iter().zip(rendered) {
        let written = !dry_run && target.merge.changed();
        if written {
            catalog::save_rendered(&target.path, &body)?;
            info!(locale = %target.locale, path = %target.path.display(), "대상 카탈로그 저장");
        }
        locales.push(LocaleReport {
            locale: target.locale,
            path: target.path,
            merge: target.merge,
            written,
        });
    }

    Ok(RunReport {
        source_path,
        source_entries: source.len(),
        records,
        locales,
        dry_run,
    })
}
