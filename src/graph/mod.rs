//! 带权有向图模型
//!
//! 图的拓扑在构建后不再变化（排除策略会构造一个裁剪后的新图，而不是原地修改）。
//! 最短路径运行时的距离与前驱状态保存在运行结果中，不保存在顶点上。

pub mod loader;
pub mod sample;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::{RouteError, RouteResult, Weight};

/// 一条有向边 `(from, to, weight)`，只用于构建图
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub weight: Weight,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: Weight) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}

/// 图中的一个顶点，包含到各邻接顶点的边权
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    name: String,
    neighbours: HashMap<String, Weight>,
}

impl Vertex {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            neighbours: HashMap::new(),
        }
    }

    pub fn with_neighbours(name: impl Into<String>, neighbours: HashMap<String, Weight>) -> Self {
        Self {
            name: name.into(),
            neighbours,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 邻接顶点名 -> 边权
    pub fn neighbours(&self) -> &HashMap<String, Weight> {
        &self.neighbours
    }

    pub fn weight_to(&self, neighbour: &str) -> Option<Weight> {
        self.neighbours.get(neighbour).copied()
    }

    pub fn out_degree(&self) -> usize {
        self.neighbours.len()
    }
}

/// 顶点名到顶点的映射
///
/// 不变式：任何邻接表中的顶点名都必须是图中的顶点
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    vertices: HashMap<String, Vertex>,
}

impl Graph {
    /// 从边列表构建图
    ///
    /// 第一遍创建所有出现过的顶点，第二遍填充邻接表。
    /// 同一有序顶点对的重复边以最后一次出现的权重为准。
    pub fn build(edges: &[Edge]) -> Self {
        let mut vertices: HashMap<String, Vertex> = HashMap::with_capacity(edges.len());

        for edge in edges {
            for name in [&edge.from, &edge.to] {
                if !vertices.contains_key(name) {
                    vertices.insert(name.clone(), Vertex::new(name.clone()));
                }
            }
        }

        for edge in edges {
            if let Some(vertex) = vertices.get_mut(&edge.from) {
                if let Some(previous) = vertex.neighbours.insert(edge.to.clone(), edge.weight) {
                    log::warn!(
                        "重复边 {} -> {}: 权重 {} 被 {} 覆盖",
                        edge.from,
                        edge.to,
                        previous,
                        edge.weight
                    );
                }
            }
        }

        log::debug!("图构建完成: {} 个顶点, {} 条边", vertices.len(), edges.len());
        Self { vertices }
    }

    /// 从已有的顶点映射构建图
    ///
    /// 映射的键必须与顶点名一致，且邻接表不能引用映射之外的顶点
    pub fn from_vertices(vertices: HashMap<String, Vertex>) -> RouteResult<Self> {
        for (key, vertex) in &vertices {
            if key != vertex.name() {
                return Err(RouteError::invalid_argument(format!(
                    "顶点键 \"{}\" 与顶点名 \"{}\" 不一致",
                    key,
                    vertex.name()
                )));
            }
            if let Some(dangling) = vertex
                .neighbours
                .keys()
                .find(|n| !vertices.contains_key(n.as_str()))
            {
                return Err(RouteError::not_found(dangling.clone()));
            }
        }
        Ok(Self { vertices })
    }

    pub fn vertex(&self, name: &str) -> Option<&Vertex> {
        self.vertices.get(name)
    }

    /// 同 [`Graph::vertex`]，顶点不存在时返回 `NotFound`
    pub fn require_vertex(&self, name: &str) -> RouteResult<&Vertex> {
        self.vertices
            .get(name)
            .ok_or_else(|| RouteError::not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vertices.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// 按名字排序的顶点名
    pub fn vertex_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.vertices.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// 所有边，按 `(from, to)` 排序
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .vertices
            .values()
            .flat_map(|v| {
                v.neighbours
                    .iter()
                    .map(move |(to, w)| Edge::new(v.name.clone(), to.clone(), *w))
            })
            .collect();
        edges.sort_unstable_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)));
        edges
    }

    pub fn edge_count(&self) -> usize {
        self.vertices.values().map(Vertex::out_degree).sum()
    }

    pub fn edge_weight(&self, from: &str, to: &str) -> Option<Weight> {
        self.vertices.get(from).and_then(|v| v.weight_to(to))
    }

    /// 删除顶点以及所有指向它的边
    pub fn remove_vertex(&mut self, name: &str) -> Option<Vertex> {
        let removed = self.vertices.remove(name)?;
        for vertex in self.vertices.values_mut() {
            vertex.neighbours.remove(name);
        }
        Some(removed)
    }

    pub fn into_vertices(self) -> HashMap<String, Vertex> {
        self.vertices
    }
}
