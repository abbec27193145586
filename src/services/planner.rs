//! 路径查询入口
//!
//! 把一张只读的图和搜索配置绑定在一起，对外提供三类查询。
//! 每次查询都返回独立的结果值，同一张图上的查询之间不共享任何可变状态。

use crate::config::SearchConfig;
use crate::core::{RouteOutcome, RouteResult};
use crate::graph::Graph;

use super::algorithm::{Dijkstra, MustNotPass, MustPass, MustPassResult};

pub struct RoutePlanner<'g> {
    graph: &'g Graph,
    config: SearchConfig,
}

impl<'g> RoutePlanner<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// 普通最短路径
    pub fn shortest(&self, source: &str, destination: &str) -> RouteResult<RouteOutcome> {
        let outcome = Dijkstra::shortest_path(self.graph, source, destination)?;
        log::info!("dijkstra {} -> {}: {}", source, destination, outcome);
        Ok(outcome)
    }

    /// 不经过 `forbidden` 中任何顶点的最短路径
    pub fn avoiding<S: AsRef<str>>(
        &self,
        source: &str,
        destination: &str,
        forbidden: &[S],
    ) -> RouteResult<RouteOutcome> {
        MustNotPass::shortest_path(self.graph, source, destination, forbidden)
    }

    /// 经过 `required` 中全部顶点的最短路径
    pub fn via<S: AsRef<str>>(
        &self,
        source: &str,
        destination: &str,
        required: &[S],
    ) -> RouteResult<MustPassResult> {
        MustPass::with_config(self.graph, &self.config).shortest_path(source, destination, required)
    }

    /// 从 `source` 到每个顶点的最短路径，按顶点名排序
    pub fn all_from(&self, source: &str) -> RouteResult<Vec<RouteOutcome>> {
        Ok(Dijkstra::run(self.graph, source)?.all_routes())
    }
}
