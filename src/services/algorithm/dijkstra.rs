//! Dijkstra算法模块
//!
//! 使用二叉堆（惰性删除）实现的单源最短路径。每次运行的距离与前驱状态保存在
//! 独立的 [`ShortestPathTree`] 中，图本身只读，多次运行之间不会互相影响。

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::Instant;

use crate::core::{Cost, Distance, Leg, Route, RouteOutcome, RouteResult, Weight};
use crate::graph::Graph;

/// Dijkstra算法结构体
pub struct Dijkstra;

/// 单次运行中顶点的状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VertexState {
    /// 本次运行的起点
    Source,
    /// 从起点不可达
    Unreached,
    /// 经由 `predecessor` 沿权重为 `weight` 的边到达
    ReachedVia { predecessor: String, weight: Weight },
}

/// 单次运行中一个顶点的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexRecord {
    /// `None` 表示无穷远
    pub distance: Option<Distance>,
    pub state: VertexState,
}

/// 算法统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlgorithmStats {
    pub vertices_settled: usize,
    pub edges_traversed: usize,
    pub relaxations: usize,
    pub execution_time_us: u64,
}

impl AlgorithmStats {
    pub fn new() -> Self {
        Self::default()
    }
}

/// 优先队列元素，按 `(distance, name)` 构成小顶堆
#[derive(Debug, Clone, Eq, PartialEq)]
struct NodeDistance<'g> {
    distance: Distance,
    name: &'g str,
}

impl Ord for NodeDistance<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.name.cmp(self.name))
    }
}

impl PartialOrd for NodeDistance<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Dijkstra {
    /// 计算从 `source` 到图中所有顶点的最短距离和前驱
    ///
    /// 起点不存在时返回 `NotFound`。距离相同的顶点按名字顺序出队，
    /// 相同的图和起点总是得到相同的结果。
    pub fn run(graph: &Graph, source: &str) -> RouteResult<ShortestPathTree> {
        let started = Instant::now();
        let source = graph.require_vertex(source)?.name();

        let mut stats = AlgorithmStats::new();
        let mut distances: HashMap<&str, Distance> = HashMap::with_capacity(graph.len());
        let mut predecessors: HashMap<&str, (&str, Weight)> = HashMap::with_capacity(graph.len());
        let mut settled: HashSet<&str> = HashSet::with_capacity(graph.len());
        let mut to_visit: BinaryHeap<NodeDistance> = BinaryHeap::new();

        distances.insert(source, 0);
        to_visit.push(NodeDistance {
            distance: 0,
            name: source,
        });

        // 不可达的顶点永远不会入队，队列耗尽即表示剩余顶点全部不可达
        while let Some(NodeDistance { distance, name }) = to_visit.pop() {
            // 过期的队列元素
            if !settled.insert(name) {
                continue;
            }
            stats.vertices_settled += 1;

            let vertex = graph.require_vertex(name)?;
            for (neighbour, weight) in vertex.neighbours() {
                stats.edges_traversed += 1;
                let neighbour = neighbour.as_str();
                if settled.contains(neighbour) {
                    continue;
                }

                let candidate = distance + Distance::from(*weight);
                let shorter = distances
                    .get(neighbour)
                    .map_or(true, |&current| candidate < current);
                if shorter {
                    stats.relaxations += 1;
                    distances.insert(neighbour, candidate);
                    predecessors.insert(neighbour, (name, *weight));
                    to_visit.push(NodeDistance {
                        distance: candidate,
                        name: neighbour,
                    });
                }
            }
        }

        let records = graph
            .vertices()
            .map(|vertex| {
                let name = vertex.name();
                let state = if name == source {
                    VertexState::Source
                } else if let Some((predecessor, weight)) = predecessors.get(name) {
                    VertexState::ReachedVia {
                        predecessor: predecessor.to_string(),
                        weight: *weight,
                    }
                } else {
                    VertexState::Unreached
                };
                let record = VertexRecord {
                    distance: distances.get(name).copied(),
                    state,
                };
                (name.to_string(), record)
            })
            .collect();

        stats.execution_time_us = started.elapsed().as_micros() as u64;
        log::debug!(
            "Dijkstra from {}: settled {} of {} vertices, traversed {} edges, {} relaxations, {}us",
            source,
            stats.vertices_settled,
            graph.len(),
            stats.edges_traversed,
            stats.relaxations,
            stats.execution_time_us
        );

        Ok(ShortestPathTree {
            source: source.to_string(),
            records,
            stats,
        })
    }

    /// 查找从起点到终点的最短路径
    ///
    /// 起点或终点不存在时返回 `NotFound`，且在运行之前检查
    pub fn shortest_path(graph: &Graph, source: &str, destination: &str) -> RouteResult<RouteOutcome> {
        graph.require_vertex(destination)?;
        let tree = Self::run(graph, source)?;
        Ok(tree.route_to(destination))
    }
}

/// 一次单源运行的完整结果
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: String,
    records: HashMap<String, VertexRecord>,
    stats: AlgorithmStats,
}

impl ShortestPathTree {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn stats(&self) -> &AlgorithmStats {
        &self.stats
    }

    pub fn record(&self, name: &str) -> Option<&VertexRecord> {
        self.records.get(name)
    }

    pub fn distance(&self, name: &str) -> Option<Distance> {
        self.records.get(name).and_then(|r| r.distance)
    }

    /// 到 `destination` 的最短距离；顶点不存在或不可达时为 `Cost::Unreachable`
    pub fn path_cost(&self, destination: &str) -> Cost {
        Cost::from(self.distance(destination))
    }

    /// 沿前驱回溯得到从起点到 `destination` 的各段边
    fn walk_back(&self, destination: &str) -> Option<Vec<Leg>> {
        let mut legs = Vec::new();
        let mut current = destination;
        loop {
            match &self.records.get(current)?.state {
                VertexState::Source => break,
                VertexState::Unreached => return None,
                VertexState::ReachedVia {
                    predecessor,
                    weight,
                } => {
                    legs.push(Leg {
                        from: predecessor.clone(),
                        to: current.to_string(),
                        weight: *weight,
                    });
                    current = predecessor;
                }
            }
        }
        legs.reverse();
        Some(legs)
    }

    /// 从起点到 `destination` 的顶点序列
    ///
    /// 不可达（或顶点不存在）时返回 `None`，不会返回部分路径
    pub fn reconstruct(&self, destination: &str) -> Option<Vec<String>> {
        self.walk_back(destination).map(|legs| {
            let mut vertices = Vec::with_capacity(legs.len() + 1);
            vertices.push(self.source.clone());
            vertices.extend(legs.into_iter().map(|leg| leg.to));
            vertices
        })
    }

    pub fn route_to(&self, destination: &str) -> RouteOutcome {
        match self.walk_back(destination) {
            Some(legs) => RouteOutcome::Found(Route::from_legs(self.source.clone(), legs)),
            None => RouteOutcome::unreachable(destination),
        }
    }

    /// 到每个顶点的结果，按顶点名排序
    pub fn all_routes(&self) -> Vec<RouteOutcome> {
        let mut names: Vec<&str> = self.records.keys().map(String::as_str).collect();
        names.sort_unstable();
        names.into_iter().map(|name| self.route_to(name)).collect()
    }

    /// 从起点可达的顶点数（含起点）
    pub fn reached_count(&self) -> usize {
        self.records
            .values()
            .filter(|r| r.distance.is_some())
            .count()
    }
}
