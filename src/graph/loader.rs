//! 从文件加载边列表
//!
//! 支持两种格式，按扩展名区分：
//! - `.json`: `{"edges": [{"from": "a", "to": "b", "weight": 7}]}`
//! - `.toml`: 若干 `[[edges]]` 表

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Edge, Graph};
use crate::core::{RouteError, RouteResult};

/// 图文件的内容
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphFile {
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphFile {
    pub fn from_json(content: &str) -> RouteResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml(content: &str) -> RouteResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn into_graph(self) -> Graph {
        Graph::build(&self.edges)
    }
}

impl From<&Graph> for GraphFile {
    fn from(graph: &Graph) -> Self {
        Self {
            edges: graph.edges(),
        }
    }
}

/// 读取图文件并构建图
pub fn load_graph<P: AsRef<Path>>(path: P) -> RouteResult<Graph> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let file = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => GraphFile::from_json(&content)?,
        Some("toml") => GraphFile::from_toml(&content)?,
        other => {
            return Err(RouteError::Config(format!(
                "不支持的图文件格式: {:?} ({})",
                other,
                path.display()
            )))
        }
    };
    log::info!("从 {} 加载了 {} 条边", path.display(), file.edges.len());
    Ok(file.into_graph())
}
