//! 排除约束的最短路径
//!
//! 先复制一份图并删除所有禁止经过的顶点（以及与之相连的边），再在裁剪后的图上运行 Dijkstra

use std::collections::HashSet;

use super::dijkstra::Dijkstra;
use crate::core::{RouteError, RouteOutcome, RouteResult};
use crate::graph::Graph;

/// 必不经过约束
pub struct MustNotPass;

impl MustNotPass {
    /// 检查排除集合不包含起点或终点，并确认两者都在图中
    pub fn validate<S: AsRef<str>>(
        graph: &Graph,
        source: &str,
        destination: &str,
        forbidden: &[S],
    ) -> RouteResult<()> {
        if let Some(bad) = forbidden
            .iter()
            .map(AsRef::as_ref)
            .find(|name| *name == source || *name == destination)
        {
            return Err(RouteError::invalid_argument(format!(
                "排除集合不能包含起点或终点: \"{}\"",
                bad
            )));
        }
        graph.require_vertex(source)?;
        graph.require_vertex(destination)?;
        Ok(())
    }

    /// 返回删除了 `forbidden` 中顶点后的新图，原图不变
    ///
    /// 图中不存在的名字会被忽略
    pub fn prune<S: AsRef<str>>(graph: &Graph, forbidden: &[S]) -> Graph {
        let forbidden: HashSet<&str> = forbidden.iter().map(AsRef::as_ref).collect();
        let mut pruned = graph.clone();
        for name in &forbidden {
            if pruned.remove_vertex(name).is_some() {
                log::debug!("排除顶点 {}", name);
            }
        }
        pruned
    }

    /// 不经过 `forbidden` 中任何顶点的最短路径
    pub fn shortest_path<S: AsRef<str>>(
        graph: &Graph,
        source: &str,
        destination: &str,
        forbidden: &[S],
    ) -> RouteResult<RouteOutcome> {
        Self::validate(graph, source, destination, forbidden)?;

        let pruned = Self::prune(graph, forbidden);
        let outcome = Dijkstra::run(&pruned, source)?.route_to(destination);
        log::info!(
            "must-not-pass {} -> {} excluding {} vertices: {}",
            source,
            destination,
            graph.len() - pruned.len(),
            outcome
        );
        Ok(outcome)
    }
}
