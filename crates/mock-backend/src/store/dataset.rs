//! 静态数据集
//!
//! 进程启动时加载一次，之后只读共享。文件格式：
//!
//! ```json
//! {
//!   "participants": { "<fspId>": { ... } },
//!   "parties": { "<idType>": { "<idValue>": { ... } } }
//! }
//! ```
//!
//! 记录内容对服务是不透明的，查询命中后原样返回。

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use backend_shared::error::{BackendError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 编译期内置的默认数据集
pub const BUNDLED_DATASET: &str = include_str!("../../data/data.json");

/// 静态数据集
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    participants: Map<String, Value>,
    /// idType -> idValue -> party
    #[serde(default)]
    parties: HashMap<String, HashMap<String, Value>>,
}

/// 数据集统计信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub participants: usize,
    pub id_types: usize,
    pub parties: usize,
}

impl Dataset {
    /// 加载内置数据集
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_DATASET)
    }

    /// 从 JSON 文本解析
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| BackendError::DatasetLoad(e.to_string()))
    }

    /// 从文件加载
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            BackendError::DatasetLoad(format!("读取 {} 失败: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw).map_err(|e| match e {
            BackendError::DatasetLoad(msg) => {
                BackendError::DatasetLoad(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// 指定路径时从文件加载，否则使用内置数据集
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::bundled(),
        }
    }

    /// 按 (idType, idValue) 两级查询参与方
    pub fn party(&self, id_type: &str, id_value: &str) -> Option<&Value> {
        self.parties.get(id_type)?.get(id_value)
    }

    /// 所有 participant 记录
    pub fn participants(&self) -> &Map<String, Value> {
        &self.participants
    }

    /// 遍历所有参与方 (idType, idValue, party)
    pub fn iter_parties(&self) -> impl Iterator<Item = (&str, &str, &Value)> {
        self.parties.iter().flat_map(|(id_type, by_value)| {
            by_value
                .iter()
                .map(move |(id_value, party)| (id_type.as_str(), id_value.as_str(), party))
        })
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            participants: self.participants.len(),
            id_types: self.parties.len(),
            parties: self.parties.values().map(HashMap::len).sum(),
        }
    }
}
