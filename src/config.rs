use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::feature;
use crate::merge::WritePolicy;
use crate::translate::{TranslationMode, DEFAULT_PLACEHOLDER};

/// 설정 파일 기본 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다. 파일에 없는 항목은 기본값을 쓴다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 메시지 카탈로그 디렉터리 (`<dir>/<locale>.json`)
    pub messages_dir: PathBuf,
    /// 원본(정답) 언어
    pub source_locale: String,
    /// 채워 넣을 대상 언어 목록
    pub target_locales: Vec<String>,
    /// 기능 키가 들어 있는 네임스페이스. 빈 문자열이면 최상위.
    pub namespace: String,
    /// 기능 ID를 찾을 때 쓰는 대표 필드 접미사
    pub master_suffix: String,
    /// 번역하지 않는 "데이터 없음" 값
    pub placeholder: String,
    pub mode: TranslationMode,
    pub write_policy: WritePolicy,
    /// 지정하면 카탈로그에서 ID를 찾지 않고 이 목록만 처리한다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_ids: Option<Vec<String>>,
    /// 이름 붙은 고정 ID 목록 (`wms`). `feature_ids`가 있으면 무시한다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_preset: Option<String>,
    /// 용어표 디렉터리 (`<dir>/<locale>.toml`). 없으면 내장 용어표.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_dir: Option<PathBuf>,
    /// 진행 메시지 언어 (auto/ko/en)
    pub language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            messages_dir: PathBuf::from("src/messages"),
            source_locale: "ko".into(),
            target_locales: vec!["en".into(), "vi".into()],
            namespace: "features".into(),
            master_suffix: "-name".into(),
            placeholder: DEFAULT_PLACEHOLDER.into(),
            mode: TranslationMode::default(),
            write_policy: WritePolicy::default(),
            feature_ids: None,
            feature_preset: None,
            terms_dir: None,
            language: "auto".into(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("잘못된 설정: {0}")]
    Invalid(String),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 실행 전에 설정 조합을 검사한다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_locales.is_empty() {
            return Err(ConfigError::Invalid("대상 언어가 비어 있음".into()));
        }
        if self.target_locales.contains(&self.source_locale) {
            return Err(ConfigError::Invalid(format!(
                "원본 언어 `{}`가 대상 언어에 포함됨",
                self.source_locale
            )));
        }
        if self.master_suffix.is_empty() {
            return Err(ConfigError::Invalid("master_suffix가 비어 있음".into()));
        }
        if self.namespace.contains('.') {
            return Err(ConfigError::Invalid(format!(
                "네임스페이스에는 점(.)을 쓸 수 없음: {}",
                self.namespace
            )));
        }
        if let Some(name) = &self.feature_preset {
            if feature::preset(name).is_none() {
                return Err(ConfigError::Invalid(format!("알 수 없는 기능 목록: {name}")));
            }
        }
        Ok(())
    }

    /// `<messages_dir>/<locale>.json`
    pub fn catalog_path(&self, locale: &str) -> PathBuf {
        self.messages_dir.join(format!("{locale}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = load_or_default(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
        assert_eq!(load_or_default(&path).unwrap(), cfg);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "mode = \"copy\"\nwrite_policy = \"overwrite\"\nfeature_ids = [\"STK-001\"]\n",
        )
        .unwrap();
        let cfg = load_or_default(&path).unwrap();
        assert_eq!(cfg.mode, TranslationMode::Copy);
        assert_eq!(cfg.write_policy, WritePolicy::Overwrite);
        assert_eq!(cfg.feature_ids, Some(vec!["STK-001".to_string()]));
        assert_eq!(cfg.target_locales, ["en", "vi"]);
    }

    #[test]
    fn source_in_targets_is_invalid() {
        let cfg = Config {
            target_locales: vec!["ko".into()],
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn unknown_feature_preset_is_invalid() {
        let cfg = Config {
            feature_preset: Some("erp".into()),
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
        let cfg = Config {
            feature_preset: Some("wms".into()),
            ..Config::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn catalog_path_joins_locale() {
        let cfg = Config::default();
        assert_eq!(cfg.catalog_path("vi"), PathBuf::from("src/messages/vi.json"));
    }
}
