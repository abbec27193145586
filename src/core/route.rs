//! 查询结果：路径、不可达结果与渲染载荷

use std::fmt;

use serde::{Deserialize, Serialize};

use super::cost::{Cost, Distance, Weight};
use crate::graph::Graph;

/// 路径上的一段边
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Leg {
    pub from: String,
    pub to: String,
    pub weight: Weight,
}

/// 从起点到终点的一条完整路径
///
/// `vertices` 的相邻两项恰好对应 `legs` 中的一段，`cost` 为各段权重之和；
/// 只能由 `single`/`from_legs`/`concat` 构造，`vertices` 至少包含起点
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    vertices: Vec<String>,
    legs: Vec<Leg>,
    cost: Distance,
}

impl Route {
    /// 只包含起点的零长度路径
    pub fn single(vertex: impl Into<String>) -> Self {
        Self {
            vertices: vec![vertex.into()],
            legs: Vec::new(),
            cost: 0,
        }
    }

    /// 由起点和首尾相接的若干段边构成路径
    pub fn from_legs(source: impl Into<String>, legs: Vec<Leg>) -> Self {
        let mut vertices = Vec::with_capacity(legs.len() + 1);
        vertices.push(source.into());
        let mut cost: Distance = 0;
        for leg in &legs {
            debug_assert_eq!(vertices.last(), Some(&leg.from));
            vertices.push(leg.to.clone());
            cost += Distance::from(leg.weight);
        }
        Self {
            vertices,
            legs,
            cost,
        }
    }

    /// 拼接一条从本路径终点出发的路径，连接点只保留一次
    pub fn concat(mut self, next: Route) -> Route {
        debug_assert_eq!(self.vertices.last(), next.vertices.first());
        self.vertices.extend(next.vertices.into_iter().skip(1));
        self.legs.extend(next.legs);
        self.cost += next.cost;
        self
    }

    pub fn vertices(&self) -> &[String] {
        &self.vertices
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn cost(&self) -> Distance {
        self.cost
    }

    pub fn source(&self) -> &str {
        &self.vertices[0]
    }

    pub fn destination(&self) -> &str {
        &self.vertices[self.vertices.len() - 1]
    }

    pub fn visits(&self, vertex: &str) -> bool {
        self.vertices.iter().any(|v| v == vertex)
    }

    /// 顶点在路径中出现的次数
    pub fn visit_count(&self, vertex: &str) -> usize {
        self.vertices.iter().filter(|v| *v == vertex).count()
    }

    pub fn render_payload(&self, title: impl Into<String>) -> RenderPayload {
        RenderPayload {
            title: title.into(),
            vertices: self.vertices.clone(),
            edges: self
                .legs
                .iter()
                .map(|leg| (leg.from.clone(), leg.to.clone(), leg.weight.to_string()))
                .collect(),
        }
    }
}

/// 形如 `a -> c(9) -> d(20) -> e(26)`，括号内为累计距离
impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source())?;
        let mut travelled: Distance = 0;
        for leg in &self.legs {
            travelled += Distance::from(leg.weight);
            write!(f, " -> {}({})", leg.to, travelled)?;
        }
        Ok(())
    }
}

/// 一次查询的正常结果
///
/// 不可达不是错误：计算已完整执行，只是不存在路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    Found(Route),
    Unreachable { destination: String },
}

impl RouteOutcome {
    pub fn unreachable(destination: impl Into<String>) -> Self {
        RouteOutcome::Unreachable {
            destination: destination.into(),
        }
    }

    pub fn cost(&self) -> Cost {
        match self {
            RouteOutcome::Found(route) => Cost::Finite(route.cost()),
            RouteOutcome::Unreachable { .. } => Cost::Unreachable,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            RouteOutcome::Unreachable { .. } => None,
        }
    }

    pub fn into_route(self) -> Option<Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            RouteOutcome::Unreachable { .. } => None,
        }
    }

    /// 不可达时载荷只包含终点，没有边
    pub fn render_payload(&self, title: impl Into<String>) -> RenderPayload {
        match self {
            RouteOutcome::Found(route) => route.render_payload(title),
            RouteOutcome::Unreachable { destination } => RenderPayload {
                title: title.into(),
                vertices: vec![destination.clone()],
                edges: Vec::new(),
            },
        }
    }
}

impl fmt::Display for RouteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteOutcome::Found(route) => write!(f, "{}", route),
            RouteOutcome::Unreachable { destination } => write!(f, "{}(unreached)", destination),
        }
    }
}

/// 交给外部渲染器的扁平化数据：顶点列表、`(from, to, weight)` 三元组和标题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderPayload {
    pub title: String,
    pub vertices: Vec<String>,
    pub edges: Vec<(String, String, String)>,
}

impl RenderPayload {
    /// 整张图的渲染载荷，顶点和边均按名字排序
    pub fn from_graph(graph: &Graph, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            vertices: graph
                .vertex_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            edges: graph
                .edges()
                .into_iter()
                .map(|e| (e.from, e.to, e.weight.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(from: &str, to: &str, weight: Weight) -> Leg {
        Leg {
            from: from.to_string(),
            to: to.to_string(),
            weight,
        }
    }

    #[test]
    fn test_route_from_legs() {
        let route = Route::from_legs("a", vec![leg("a", "c", 9), leg("c", "d", 11)]);
        assert_eq!(route.vertices(), ["a", "c", "d"]);
        assert_eq!(route.cost(), 20);
        assert_eq!(route.source(), "a");
        assert_eq!(route.destination(), "d");
        assert_eq!(route.to_string(), "a -> c(9) -> d(20)");
    }

    #[test]
    fn test_single_route() {
        let route = Route::single("a");
        assert_eq!(route.cost(), 0);
        assert_eq!(route.to_string(), "a");
        assert_eq!(route.destination(), "a");
    }

    #[test]
    fn test_concat_does_not_repeat_junction() {
        let first = Route::from_legs("a", vec![leg("a", "b", 7)]);
        let second = Route::from_legs("b", vec![leg("b", "c", 10), leg("c", "d", 11)]);
        let route = first.concat(second);
        assert_eq!(route.vertices(), ["a", "b", "c", "d"]);
        assert_eq!(route.legs().len(), 3);
        assert_eq!(route.cost(), 28);
        assert_eq!(route.visit_count("b"), 1);
    }

    #[test]
    fn test_outcome_display() {
        let found = RouteOutcome::Found(Route::from_legs("a", vec![leg("a", "b", 7)]));
        assert_eq!(found.to_string(), "a -> b(7)");
        assert_eq!(found.cost(), Cost::Finite(7));

        let missing = RouteOutcome::unreachable("e");
        assert_eq!(missing.to_string(), "e(unreached)");
        assert_eq!(missing.cost(), Cost::Unreachable);
        assert!(missing.route().is_none());
    }

    #[test]
    fn test_render_payload() {
        let route = Route::from_legs("a", vec![leg("a", "b", 7), leg("b", "d", 15)]);
        let payload = route.render_payload("Simple Dijkstra");
        assert_eq!(payload.title, "Simple Dijkstra");
        assert_eq!(payload.vertices, vec!["a", "b", "d"]);
        assert_eq!(
            payload.edges,
            vec![
                ("a".to_string(), "b".to_string(), "7".to_string()),
                ("b".to_string(), "d".to_string(), "15".to_string()),
            ]
        );
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(RouteOutcome::unreachable("e"))
            .expect("序列化应当成功");
        assert_eq!(json["status"], "unreachable");
        assert_eq!(json["destination"], "e");
    }

    #[test]
    fn test_found_outcome_serializes_route_fields() {
        let outcome = RouteOutcome::Found(Route::from_legs("a", vec![leg("a", "b", 7)]));
        let json = serde_json::to_value(&outcome).expect("序列化应当成功");
        assert_eq!(json["status"], "found");
        assert_eq!(json["vertices"], serde_json::json!(["a", "b"]));
        assert_eq!(json["cost"], 7);

        // 任何构造方式得到的路径都至少包含起点
        let empty = Route::from_legs("a", Vec::new());
        assert_eq!(empty.source(), "a");
        assert_eq!(empty.destination(), "a");
        assert_eq!(empty.to_string(), "a");
    }
}
