//! 自定义断言辅助模块
//!
//! 提供测试中的常用断言函数

use waypath::{Graph, Route, RouteError, RouteResult};

/// 断言结果成功，返回内部值
pub fn assert_ok<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
    result.expect("操作应该成功")
}

/// 断言结果为 NotFound 且指向给定顶点
pub fn assert_not_found<T: std::fmt::Debug>(result: RouteResult<T>, vertex: &str) {
    match result {
        Err(RouteError::NotFound(name)) => assert_eq!(name, vertex),
        other => panic!("期望 NotFound({}), 实际是 {:?}", vertex, other),
    }
}

/// 断言结果为 InvalidArgument
pub fn assert_invalid_argument<T: std::fmt::Debug>(result: RouteResult<T>) {
    assert!(
        matches!(result, Err(RouteError::InvalidArgument(_))),
        "期望 InvalidArgument, 实际是 {:?}",
        result
    );
}

/// 断言路径的每一段都是图中的边，且总代价等于各段边权之和
pub fn assert_route_consistent(graph: &Graph, route: &Route) {
    let mut total = 0u64;
    for pair in route.vertices().windows(2) {
        let weight = graph
            .edge_weight(&pair[0], &pair[1])
            .unwrap_or_else(|| panic!("边 {} -> {} 不存在于图中", pair[0], pair[1]));
        total += u64::from(weight);
    }
    assert_eq!(total, route.cost(), "路径 {} 的代价不一致", route);
    assert_eq!(route.legs().len() + 1, route.vertices().len());
}
