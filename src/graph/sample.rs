//! 内置示例图，供 `demo` 子命令、测试和基准使用

use super::{Edge, Graph};

pub const SAMPLE_SOURCE: &str = "a";
pub const SAMPLE_DESTINATION: &str = "e";

/// 六个顶点、九条边的有向图
///
/// 图中没有反向边，例如不存在 `b -> a`
pub fn sample_edges() -> Vec<Edge> {
    vec![
        Edge::new("a", "b", 7),
        Edge::new("a", "c", 9),
        Edge::new("a", "f", 14),
        Edge::new("b", "c", 10),
        Edge::new("b", "d", 15),
        Edge::new("c", "d", 11),
        Edge::new("c", "f", 2),
        Edge::new("d", "e", 6),
        Edge::new("e", "f", 9),
    ]
}

pub fn sample_graph() -> Graph {
    Graph::build(&sample_edges())
}
