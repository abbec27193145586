//! 统一错误处理
//!
//! ## 错误分类
//!
//! 1. **NotFound**：引用的顶点名不存在于图中（起点、终点、途经点或悬空邻接）
//! 2. **InvalidArgument**：排除集合或必经集合包含起点/终点，在任何引擎运行之前检查
//! 3. **不可达** 不是错误，而是 [`RouteOutcome::Unreachable`](crate::core::RouteOutcome)
//!
//! 库内部统一返回 `RouteResult<T>`，二进制入口再转换为 `anyhow::Result`

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 统一的路径查询错误类型
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("顶点未找到: \"{0}\"")]
    NotFound(String),

    #[error("无效参数: {0}")]
    InvalidArgument(String),

    #[error("必经顶点过多: {count} 个，上限为 {limit} 个")]
    TooManyWaypoints { count: usize, limit: usize },

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("解析错误: {0}")]
    Parse(String),
}

/// 统一的结果类型
pub type RouteResult<T> = Result<T, RouteError>;

impl RouteError {
    pub fn not_found(name: impl Into<String>) -> Self {
        RouteError::NotFound(name.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        RouteError::InvalidArgument(message.into())
    }

    /// 对外错误码
    pub fn code(&self) -> ErrorCode {
        match self {
            RouteError::NotFound(_) => ErrorCode::VertexNotFound,
            RouteError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            RouteError::TooManyWaypoints { .. } => ErrorCode::ResourceExhausted,
            RouteError::Io(_) => ErrorCode::IoError,
            RouteError::Config(_) => ErrorCode::ConfigError,
            RouteError::Parse(_) => ErrorCode::ParseError,
        }
    }
}

impl From<serde_json::Error> for RouteError {
    fn from(e: serde_json::Error) -> Self {
        RouteError::Parse(e.to_string())
    }
}

impl From<toml::de::Error> for RouteError {
    fn from(e: toml::de::Error) -> Self {
        RouteError::Parse(e.to_string())
    }
}

impl From<toml::ser::Error> for RouteError {
    fn from(e: toml::ser::Error) -> Self {
        RouteError::Config(e.to_string())
    }
}

/// 对外错误码
///
/// 错误码格式: XXYY
/// - XX: 错误类别 (00=成功, 01=输入, 03=验证, 05=资源, 09=系统)
/// - YY: 具体错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    Success = 0,

    /// 图文件或配置文件解析失败
    ParseError = 101,

    /// 参数违反前置条件
    InvalidArgument = 302,

    /// 顶点不存在
    VertexNotFound = 500,
    /// 排列数量超出上限
    ResourceExhausted = 502,

    IoError = 900,
    ConfigError = 901,
}

impl ErrorCode {
    /// 获取错误码的 i32 值
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// 进程退出码，非零且落在 u8 范围内
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::Success => 0,
            ErrorCode::ParseError => 2,
            ErrorCode::InvalidArgument => 3,
            ErrorCode::VertexNotFound => 4,
            ErrorCode::ResourceExhausted => 5,
            ErrorCode::IoError => 6,
            ErrorCode::ConfigError => 7,
        }
    }

    /// 获取默认的错误消息
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "成功",
            ErrorCode::ParseError => "解析错误",
            ErrorCode::InvalidArgument => "无效参数",
            ErrorCode::VertexNotFound => "顶点未找到",
            ErrorCode::ResourceExhausted => "资源不足",
            ErrorCode::IoError => "IO错误",
            ErrorCode::ConfigError => "配置错误",
        }
    }
}

impl Default for ErrorCode {
    fn default() -> Self {
        ErrorCode::Success
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_i32(), self.default_message())
    }
}
