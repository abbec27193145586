//! waypath - 带权有向图上的最短路径，支持“必不经过”与“必经”两类约束
//!
//! - [`graph`]：图模型与图文件加载
//! - [`services::algorithm`]：Dijkstra 引擎、排除策略与必经策略
//! - [`services::RoutePlanner`]：绑定图与配置的查询入口

pub mod config;
pub mod core;
pub mod graph;
pub mod services;
pub mod utils;

pub use crate::core::{Cost, RenderPayload, Route, RouteError, RouteOutcome, RouteResult};
pub use crate::graph::{Edge, Graph};
pub use crate::services::RoutePlanner;
