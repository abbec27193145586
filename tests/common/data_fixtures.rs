//! 测试数据生成模块
//!
//! 提供示例图、随机图以及用于对照的暴力最短路径

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use waypath::{Edge, Graph};

/// 顶点名 `v0`, `v1`, ...
pub fn vertex_name(i: usize) -> String {
    format!("v{}", i)
}

/// 可复现的随机有向图
///
/// 每个有序顶点对以概率 `density` 连边，边权取 `0..=max_weight`。
/// 每个顶点都带一条零权自环，保证没有出入边的顶点也出现在图中。
pub fn random_graph(seed: u64, vertices: usize, density: f64, max_weight: u32) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::new();
    for i in 0..vertices {
        edges.push(Edge::new(vertex_name(i), vertex_name(i), 0));
        for j in 0..vertices {
            if i != j && rng.gen_bool(density) {
                edges.push(Edge::new(
                    vertex_name(i),
                    vertex_name(j),
                    rng.gen_range(0..=max_weight),
                ));
            }
        }
    }
    Graph::build(&edges)
}

/// 枚举所有不经过 `forbidden` 的简单路径，返回最小总权重
pub fn brute_force_distance(
    graph: &Graph,
    source: &str,
    destination: &str,
    forbidden: &HashSet<String>,
) -> Option<u64> {
    fn dfs(
        graph: &Graph,
        current: &str,
        destination: &str,
        forbidden: &HashSet<String>,
        visited: &mut HashSet<String>,
        travelled: u64,
        best: &mut Option<u64>,
    ) {
        if current == destination {
            *best = Some(best.map_or(travelled, |b| b.min(travelled)));
            return;
        }
        let Some(vertex) = graph.vertex(current) else {
            return;
        };
        for (neighbour, weight) in vertex.neighbours() {
            if visited.contains(neighbour) || forbidden.contains(neighbour) {
                continue;
            }
            visited.insert(neighbour.clone());
            dfs(
                graph,
                neighbour,
                destination,
                forbidden,
                visited,
                travelled + u64::from(*weight),
                best,
            );
            visited.remove(neighbour);
        }
    }

    if forbidden.contains(source) || !graph.contains(source) {
        return None;
    }
    let mut visited = HashSet::from([source.to_string()]);
    let mut best = None;
    dfs(
        graph,
        source,
        destination,
        forbidden,
        &mut visited,
        0,
        &mut best,
    );
    best
}
