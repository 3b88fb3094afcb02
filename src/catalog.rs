//! 메시지 카탈로그(JSON) 로드/저장.
//!
//! 메모리 안에서는 항상 `features.STK-001-input` 같은 점(.) 구분 복합 키를 쓰는
//! 1단 맵으로 다룬다. 중첩 형태 파일은 로드할 때 평탄화하고 저장할 때 다시 중첩한다.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// 디스크에 저장된 카탈로그의 형태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogShape {
    /// `{"features": {"STK-001-name": "..."}}`
    Nested,
    /// `{"features.STK-001-name": "..."}`
    Flat,
}

impl CatalogShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogShape::Nested => "nested",
            CatalogShape::Flat => "flat",
        }
    }
}

impl fmt::Display for CatalogShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 카탈로그 입출력 중 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("카탈로그 파일을 찾을 수 없음: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("파일 입출력 오류 ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("JSON 파싱 오류 ({}): {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("최상위 값이 JSON 객체가 아님: {}", .path.display())]
    NotAnObject { path: PathBuf },
    #[error("중첩 키와 평탄화 키가 한 파일에 섞여 있음 ({}): `{key}`", .path.display())]
    MixedShape { path: PathBuf, key: String },
    #[error("키 충돌: `{key}` 위치에 값을 넣을 수 없음")]
    KeyConflict { key: String },
    #[error("JSON 직렬화 오류: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 경로 정보가 붙기 전의 형태 판별 오류.
#[derive(Debug, PartialEq, Eq)]
enum ShapeError {
    NotAnObject,
    Mixed(String),
}

impl ShapeError {
    fn at(self, path: &Path) -> CatalogError {
        let path = path.to_path_buf();
        match self {
            ShapeError::NotAnObject => CatalogError::NotAnObject { path },
            ShapeError::Mixed(key) => CatalogError::MixedShape { path, key },
        }
    }
}

/// 한 언어의 메시지 카탈로그.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    shape: CatalogShape,
    entries: IndexMap<String, Value>,
}

impl Catalog {
    pub fn new(shape: CatalogShape) -> Self {
        Self {
            shape,
            entries: IndexMap::new(),
        }
    }

    /// 파싱된 JSON 문서를 정규 형태로 변환한다.
    fn from_value(value: Value) -> Result<Self, ShapeError> {
        let Value::Object(root) = value else {
            return Err(ShapeError::NotAnObject);
        };

        let nested = root.values().any(Value::is_object);
        if nested {
            if let Some(key) = root.keys().find(|k| k.contains('.')) {
                return Err(ShapeError::Mixed(key.clone()));
            }
            let mut entries = IndexMap::new();
            flatten_into(None, root, &mut entries)?;
            Ok(Self {
                shape: CatalogShape::Nested,
                entries,
            })
        } else {
            let shape = if root.keys().any(|k| k.contains('.')) {
                CatalogShape::Flat
            } else {
                // 점 키도 객체도 없으면 두 형태의 출력이 같다.
                CatalogShape::Nested
            };
            Ok(Self {
                shape,
                entries: root.into_iter().collect(),
            })
        }
    }

    pub fn shape(&self) -> CatalogShape {
        self.shape
    }

    /// 복합 키가 하나도 없어서 어느 형태로 저장해도 결과가 같은지 여부.
    pub fn is_shapeless(&self) -> bool {
        !self.entries.keys().any(|k| k.contains('.'))
            && !self.entries.values().any(Value::is_object)
    }

    pub fn set_shape(&mut self, shape: CatalogShape) {
        self.shape = shape;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// 문자열 값만 반환한다. 다른 타입이면 None.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// 값을 넣는다. 기존 키면 원래 위치를 유지하고 이전 값을 돌려준다.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// 로드 당시의 형태로 JSON 문서를 재구성한다.
    pub fn to_value(&self) -> Result<Value, CatalogError> {
        let mut root = Map::new();
        match self.shape {
            CatalogShape::Flat => {
                for (k, v) in &self.entries {
                    root.insert(k.clone(), v.clone());
                }
            }
            CatalogShape::Nested => {
                for (k, v) in &self.entries {
                    insert_path(&mut root, k, v.clone())?;
                }
            }
        }
        Ok(Value::Object(root))
    }

    /// 들여쓰기 2칸, 비ASCII 문자 그대로, 삽입 순서 유지로 직렬화한다.
    pub fn render(&self) -> Result<String, CatalogError> {
        let mut out = serde_json::to_string_pretty(&self.to_value()?)?;
        out.push('\n');
        Ok(out)
    }
}

/// `prefix`가 None이면 최상위. 빈 문자열 키도 한 단계로 유지해야 하므로 구분한다.
fn flatten_into(
    prefix: Option<&str>,
    map: Map<String, Value>,
    out: &mut IndexMap<String, Value>,
) -> Result<(), ShapeError> {
    for (k, v) in map {
        let key = match prefix {
            None => k.clone(),
            Some(prefix) => format!("{prefix}.{k}"),
        };
        if prefix.is_some() && k.contains('.') {
            return Err(ShapeError::Mixed(key));
        }
        match v {
            Value::Object(inner) if !inner.is_empty() => flatten_into(Some(&key), inner, out)?,
            // 빈 객체는 그대로 잎으로 보관해야 저장 시 사라지지 않는다.
            leaf => {
                out.insert(key, leaf);
            }
        }
    }
    Ok(())
}

fn insert_path(root: &mut Map<String, Value>, key: &str, value: Value) -> Result<(), CatalogError> {
    let conflict = || CatalogError::KeyConflict {
        key: key.to_string(),
    };
    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };

    let mut node = root;
    if let Some(parents) = parents {
        for segment in parents.split('.') {
            let slot = node
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            node = match slot {
                Value::Object(map) => map,
                _ => return Err(conflict()),
            };
        }
    }
    if node
        .get(leaf)
        .is_some_and(|existing| existing.as_object().is_some_and(|m| !m.is_empty()))
    {
        return Err(conflict());
    }
    node.insert(leaf.to_string(), value);
    Ok(())
}

/// 카탈로그 파일을 읽는다.
pub fn load(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => CatalogError::NotFound {
            path: path.to_path_buf(),
        },
        _ => CatalogError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    let value: Value = serde_json::from_str(content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Catalog::from_value(value).map_err(|e| e.at(path))
}

/// 카탈로그를 직렬화해 파일 전체를 덮어쓴다.
pub fn save(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    let rendered = catalog.render()?;
    save_rendered(path, &rendered)
}

/// 이미 직렬화된 내용을 같은 디렉터리의 임시 파일에 쓴 뒤 rename 한다.
pub fn save_rendered(path: &Path, rendered: &str) -> Result<(), CatalogError> {
    let io_err = |source: io::Error| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    // 임시 파일은 0600으로 만들어지므로 기존 파일의 권한을 이어받는다.
    match fs::metadata(path) {
        Ok(meta) => tmp
            .as_file()
            .set_permissions(meta.permissions())
            .map_err(io_err)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(io_err(e)),
    }
    tmp.write_all(rendered.as_bytes()).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
