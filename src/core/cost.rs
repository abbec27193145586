//! 权重与代价类型

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// 边权重，非负整数
pub type Weight = u32;

/// 路径总长度
///
/// 使用比边权更宽的整数，`u32` 权重沿任意简单路径累加不会溢出
pub type Distance = u64;

/// 路径代价
///
/// `Finite < Unreachable`，因此可以直接用 `min` 比较两条候选路径
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Cost {
    Finite(Distance),
    Unreachable,
}

impl Cost {
    pub fn is_finite(&self) -> bool {
        matches!(self, Cost::Finite(_))
    }
}

impl From<Option<Distance>> for Cost {
    fn from(distance: Option<Distance>) -> Self {
        distance.map_or(Cost::Unreachable, Cost::Finite)
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        match (self, rhs) {
            (Cost::Finite(a), Cost::Finite(b)) => Cost::Finite(a + b),
            _ => Cost::Unreachable,
        }
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Finite(d) => write!(f, "{}", d),
            Cost::Unreachable => write!(f, "unreachable"),
        }
    }
}
