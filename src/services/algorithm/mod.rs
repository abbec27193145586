//! 算法模块
//!
//! 单源最短路径以及建立在其上的两种约束策略

pub mod dijkstra;
pub mod must_not_pass;
pub mod must_pass;
pub mod permutation;

// 重新导出常用算法结构体
pub use dijkstra::{AlgorithmStats, Dijkstra, ShortestPathTree, VertexRecord, VertexState};
pub use must_not_pass::MustNotPass;
pub use must_pass::{MustPass, MustPassResult};
pub use permutation::Permutations;
