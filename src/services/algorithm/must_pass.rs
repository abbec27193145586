//! 必经约束的最短路径
//!
//! 枚举必经顶点的全部排列（`k!` 种，复杂度随 `k` 指数增长，只适用于很小的必经集合），
//! 对每种排列计算 `src, w1, ..., wk, dest` 各相邻两点间最短距离之和，取总代价最小的排列。
//! 改用子集动态规划属于另一种算法，这里不做。
//!
//! 每个不同的段起点只运行一次 Dijkstra，所有排列共享这些结果；查询期间图不会改变，
//! 因此与逐段重新运行得到的代价完全相同。

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

use super::dijkstra::{Dijkstra, ShortestPathTree};
use super::permutation::{factorial, Permutations};
use crate::config::SearchConfig;
use crate::core::{Cost, Route, RouteError, RouteOutcome, RouteResult};
use crate::graph::Graph;

/// 必经约束查询的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MustPassResult {
    /// 选中的必经顶点顺序；全部排列都不可达时为第一个排列
    pub order: Vec<String>,
    pub outcome: RouteOutcome,
    pub orderings_evaluated: usize,
}

impl MustPassResult {
    pub fn cost(&self) -> Cost {
        self.outcome.cost()
    }
}

/// 必经约束
pub struct MustPass<'g> {
    graph: &'g Graph,
    max_waypoints: usize,
    parallel: bool,
}

impl<'g> MustPass<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self::with_config(graph, &SearchConfig::default())
    }

    pub fn with_config(graph: &'g Graph, config: &SearchConfig) -> Self {
        Self {
            graph,
            max_waypoints: config.max_waypoints,
            parallel: config.parallel,
        }
    }

    pub fn with_max_waypoints(mut self, max_waypoints: usize) -> Self {
        self.max_waypoints = max_waypoints;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// 检查参数并返回去重后的必经顶点（保持首次出现的顺序）
    ///
    /// 检查顺序：起点/终点出现在必经集合中 -> 顶点不存在 -> 数量上限
    pub fn validate<'a, S: AsRef<str>>(
        &self,
        source: &str,
        destination: &str,
        required: &'a [S],
    ) -> RouteResult<Vec<&'a str>> {
        let mut seen = HashSet::new();
        let mut waypoints = Vec::with_capacity(required.len());
        for name in required.iter().map(AsRef::as_ref) {
            if name == source || name == destination {
                return Err(RouteError::invalid_argument(format!(
                    "必经集合不能包含起点或终点: \"{}\"",
                    name
                )));
            }
            if seen.insert(name) {
                waypoints.push(name);
            }
        }

        self.graph.require_vertex(source)?;
        self.graph.require_vertex(destination)?;
        for name in &waypoints {
            self.graph.require_vertex(name)?;
        }

        if waypoints.len() > self.max_waypoints {
            return Err(RouteError::TooManyWaypoints {
                count: waypoints.len(),
                limit: self.max_waypoints,
            });
        }
        Ok(waypoints)
    }

    /// 依次经过 `required` 中全部顶点（顺序任意）的最短路径
    pub fn shortest_path<S: AsRef<str>>(
        &self,
        source: &str,
        destination: &str,
        required: &[S],
    ) -> RouteResult<MustPassResult> {
        let waypoints = self.validate(source, destination, required)?;
        log::debug!(
            "must-pass {} -> {}: {} waypoints, {:?} orderings (limit {} waypoints)",
            source,
            destination,
            waypoints.len(),
            factorial(waypoints.len()),
            self.max_waypoints
        );
        let trees = self.leg_trees(source, &waypoints)?;

        let (best_cost, best_index, best_perm, evaluated) =
            self.best_ordering(source, destination, &waypoints, &trees);

        let order: Vec<String> = best_perm.iter().map(|&i| waypoints[i].to_string()).collect();
        let outcome = match best_cost {
            Cost::Unreachable => RouteOutcome::unreachable(destination),
            Cost::Finite(_) => {
                let stops = Self::stops(source, destination, &waypoints, &best_perm);
                match Self::stitch(&stops, &trees) {
                    Ok(route) => {
                        debug_assert_eq!(Cost::Finite(route.cost()), best_cost);
                        RouteOutcome::Found(route)
                    }
                    Err((from, to)) => {
                        log::warn!(
                            "must-pass {} -> {}: leg {} -> {} has no route despite cost {}",
                            source,
                            destination,
                            from,
                            to,
                            best_cost
                        );
                        RouteOutcome::unreachable(destination)
                    }
                }
            }
        };

        log::info!(
            "must-pass {} -> {} via {:?}: best order #{} of {} ({}) {}",
            source,
            destination,
            waypoints,
            best_index,
            evaluated,
            best_cost,
            outcome
        );

        Ok(MustPassResult {
            order,
            outcome,
            orderings_evaluated: evaluated,
        })
    }

    /// 对起点和每个必经顶点各运行一次 Dijkstra
    fn leg_trees(
        &self,
        source: &str,
        waypoints: &[&str],
    ) -> RouteResult<HashMap<String, ShortestPathTree>> {
        let origins: Vec<&str> = std::iter::once(source).chain(waypoints.iter().copied()).collect();
        let run = |origin: &&str| Dijkstra::run(self.graph, origin).map(|t| (origin.to_string(), t));
        if self.parallel {
            origins.par_iter().map(run).collect()
        } else {
            origins.iter().map(run).collect()
        }
    }

    /// 返回 `(代价, 排列序号, 排列, 已评估的排列数)`
    ///
    /// 代价相同时取序号最小（最先枚举到）的排列，并行与串行结果一致
    fn best_ordering(
        &self,
        source: &str,
        destination: &str,
        waypoints: &[&str],
        trees: &HashMap<String, ShortestPathTree>,
    ) -> (Cost, usize, Vec<usize>, usize) {
        let evaluate = |(index, perm): (usize, Vec<usize>)| {
            let stops = Self::stops(source, destination, waypoints, &perm);
            (Self::ordering_cost(&stops, trees), index, perm)
        };
        let key = |candidate: &(Cost, usize, Vec<usize>)| (candidate.0, candidate.1);

        let permutations = Permutations::new(waypoints.len()).enumerate();
        let evaluated = std::sync::atomic::AtomicUsize::new(0);
        let counted = |item| {
            evaluated.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            evaluate(item)
        };

        let best = if self.parallel && waypoints.len() > 1 {
            permutations
                .par_bridge()
                .map(counted)
                .min_by(|a, b| key(a).cmp(&key(b)))
        } else {
            permutations.map(counted).min_by(|a, b| key(a).cmp(&key(b)))
        };

        // 至少存在一个（可能为空的）排列
        let (cost, index, perm) = best.unwrap_or((Cost::Unreachable, 0, Vec::new()));
        (cost, index, perm, evaluated.into_inner())
    }

    fn stops<'a>(
        source: &'a str,
        destination: &'a str,
        waypoints: &[&'a str],
        perm: &[usize],
    ) -> Vec<&'a str> {
        let mut stops = Vec::with_capacity(perm.len() + 2);
        stops.push(source);
        stops.extend(perm.iter().map(|&i| waypoints[i]));
        stops.push(destination);
        stops
    }

    /// 相邻两点最短距离之和，任一段不可达则整体不可达
    fn ordering_cost(stops: &[&str], trees: &HashMap<String, ShortestPathTree>) -> Cost {
        let mut total = Cost::Finite(0);
        for pair in stops.windows(2) {
            let leg = trees
                .get(pair[0])
                .map_or(Cost::Unreachable, |tree| tree.path_cost(pair[1]));
            total = total + leg;
            if !total.is_finite() {
                break;
            }
        }
        total
    }

    /// 拼接各段路径，失败时返回无法连通的那一段
    fn stitch<'a>(
        stops: &[&'a str],
        trees: &HashMap<String, ShortestPathTree>,
    ) -> Result<Route, (&'a str, &'a str)> {
        let mut route = Route::single(stops[0]);
        for pair in stops.windows(2) {
            let leg = trees
                .get(pair[0])
                .and_then(|tree| tree.route_to(pair[1]).into_route())
                .ok_or((pair[0], pair[1]))?;
            route = route.concat(leg);
        }
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn graph() -> Graph {
        Graph::build(&[
            Edge::new("s", "t", 1),
            Edge::new("s", "p", 2),
            Edge::new("p", "q", 2),
            Edge::new("q", "t", 2),
            Edge::new("s", "q", 10),
            Edge::new("q", "p", 1),
            Edge::new("p", "t", 20),
        ])
    }

    #[test]
    fn test_empty_required_is_plain_shortest_path() {
        let g = graph();
        let result = MustPass::new(&g)
            .shortest_path::<&str>("s", "t", &[])
            .expect("查询应当成功");
        assert!(result.order.is_empty());
        assert_eq!(result.orderings_evaluated, 1);
        assert_eq!(
            result.outcome,
            Dijkstra::shortest_path(&g, "s", "t").expect("查询应当成功")
        );
    }

    #[test]
    fn test_picks_cheapest_order() {
        let g = graph();
        // p,q: 2 + 2 + 2 = 6；q,p: 4 + 1 + 4 = 9
        let result = MustPass::new(&g)
            .shortest_path("s", "t", &["q", "p"])
            .expect("查询应当成功");
        assert_eq!(result.order, vec!["p", "q"]);
        assert_eq!(result.cost(), Cost::Finite(6));
        assert_eq!(result.orderings_evaluated, 2);
        let route = result.outcome.route().expect("路径应当存在");
        assert_eq!(route.vertices(), ["s", "p", "q", "t"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let g = graph();
        let sequential = MustPass::new(&g)
            .with_parallel(false)
            .shortest_path("s", "t", &["p", "q"])
            .expect("查询应当成功");
        let parallel = MustPass::new(&g)
            .with_parallel(true)
            .shortest_path("s", "t", &["p", "q"])
            .expect("查询应当成功");
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_ties_keep_first_ordering() {
        // a,b 与 b,a 总代价相同
        let g = Graph::build(&[
            Edge::new("s", "a", 1),
            Edge::new("s", "b", 1),
            Edge::new("a", "b", 1),
            Edge::new("b", "a", 1),
            Edge::new("a", "t", 1),
            Edge::new("b", "t", 1),
        ]);
        for parallel in [false, true] {
            let result = MustPass::new(&g)
                .with_parallel(parallel)
                .shortest_path("s", "t", &["b", "a"])
                .expect("查询应当成功");
            assert_eq!(result.order, vec!["b", "a"]);
            assert_eq!(result.cost(), Cost::Finite(3));
        }
    }

    #[test]
    fn test_three_way_tie_keeps_first_insertion_ordering() {
        // 除 x->y 外必经顶点两两相连，代价为 4 的顺序有 y,x,z / y,z,x / x,z,y / z,x,y / z,y,x，
        // 枚举顺序 x,y,z -> y,x,z -> ... 中最先出现的是 y,x,z
        let mut edges = Vec::new();
        for w in ["x", "y", "z"] {
            edges.push(Edge::new("s", w, 1));
            edges.push(Edge::new(w, "t", 1));
        }
        for (from, to) in [("y", "x"), ("x", "z"), ("z", "x"), ("y", "z"), ("z", "y")] {
            edges.push(Edge::new(from, to, 1));
        }
        let g = Graph::build(&edges);
        for parallel in [false, true] {
            let result = MustPass::new(&g)
                .with_parallel(parallel)
                .shortest_path("s", "t", &["x", "y", "z"])
                .expect("查询应当成功");
            assert_eq!(result.order, vec!["y", "x", "z"], "parallel {}", parallel);
            assert_eq!(result.cost(), Cost::Finite(4));
            assert_eq!(result.orderings_evaluated, 6);
            let route = result.outcome.route().expect("路径应当存在");
            assert_eq!(route.vertices(), ["s", "y", "x", "z", "t"]);
        }
    }

    #[test]
    fn test_stitch_reports_missing_leg() {
        let g = graph();
        let mut trees = HashMap::new();
        trees.insert("s".to_string(), Dijkstra::run(&g, "s").expect("起点存在"));
        assert_eq!(
            MustPass::stitch(&["s", "p", "t"], &trees).map(|r| r.cost()),
            Err(("p", "t"))
        );

        trees.insert("p".to_string(), Dijkstra::run(&g, "p").expect("顶点存在"));
        let route = MustPass::stitch(&["s", "p", "t"], &trees).expect("两段都可达");
        assert_eq!(route.vertices(), ["s", "p", "q", "t"]);
        assert_eq!(route.cost(), 6);
    }

    #[test]
    fn test_duplicates_collapsed() {
        let g = graph();
        let result = MustPass::new(&g)
            .shortest_path("s", "t", &["p", "p"])
            .expect("查询应当成功");
        assert_eq!(result.order, vec!["p"]);
        assert_eq!(result.orderings_evaluated, 1);
    }

    #[test]
    fn test_all_orderings_unreachable() {
        let g = Graph::build(&[Edge::new("s", "t", 1), Edge::new("x", "t", 1)]);
        let result = MustPass::new(&g)
            .shortest_path("s", "t", &["x"])
            .expect("不可达不是错误");
        assert_eq!(result.outcome, RouteOutcome::unreachable("t"));
        assert_eq!(result.order, vec!["x"]);
    }

    #[test]
    fn test_required_contains_endpoint() {
        let g = graph();
        let result = MustPass::new(&g).shortest_path("s", "t", &["p", "t"]);
        assert!(matches!(result, Err(RouteError::InvalidArgument(_))));
    }

    #[test]
    fn test_unknown_waypoint() {
        let g = graph();
        let result = MustPass::new(&g).shortest_path("s", "t", &["ghost"]);
        assert!(matches!(result, Err(RouteError::NotFound(name)) if name == "ghost"));
    }

    #[test]
    fn test_waypoint_limit() {
        let g = graph();
        let result = MustPass::new(&g)
            .with_max_waypoints(1)
            .shortest_path("s", "t", &["p", "q"]);
        assert!(matches!(
            result,
            Err(RouteError::TooManyWaypoints { count: 2, limit: 1 })
        ));
    }
}
