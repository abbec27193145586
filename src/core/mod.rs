pub mod cost;
pub mod error;
pub mod route;

// 错误和结果类型
pub use error::{ErrorCode, RouteError, RouteResult};

// 核心数据类型
pub use cost::{Cost, Distance, Weight};
pub use route::{Leg, RenderPayload, Route, RouteOutcome};
