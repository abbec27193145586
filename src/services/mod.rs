//! 服务层模块
//!
//! 包含路径算法以及面向调用方的查询入口

pub mod algorithm;
pub mod planner;

// 重新导出常用服务
pub use algorithm::*;
pub use planner::RoutePlanner;
