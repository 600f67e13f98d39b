//! # Error 模块
//!
//! 定义 ds-core 中使用的错误类型。

use thiserror::Error;

use crate::structure::StructureKind;

/// 操作脚本解析错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// 无效的行格式
    #[error("第 {line} 行：无效的格式 - {message}")]
    InvalidLine { line: usize, message: String },

    /// 未知指令
    #[error("第 {line} 行：未知指令 '{command}'")]
    UnknownCommand { line: usize, command: String },

    /// 缺少必需参数
    #[error("第 {line} 行：指令 '{command}' 缺少参数 '{param}'")]
    MissingParameter {
        line: usize,
        command: String,
        param: String,
    },

    /// 无效的参数值
    #[error("第 {line} 行：参数 '{param}' 的值无效 - {message}")]
    InvalidParameter {
        line: usize,
        param: String,
        message: String,
    },

    /// `structure` 指令出现在操作之后
    #[error("第 {line} 行：structure 指令必须位于所有操作之前")]
    LateStructure { line: usize },
}

/// 数值输入错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// 输入为空
    #[error("输入为空")]
    Empty,

    /// 不是合法的整数
    #[error("'{text}' 不是合法的整数")]
    Invalid { text: String },

    /// 未知操作名
    #[error("未知操作 '{name}'")]
    UnknownAction { name: String },

    /// 操作需要整数参数但没有提供
    #[error("操作 '{action}' 需要一个整数参数")]
    MissingValue { action: &'static str },

    /// 操作不接受参数
    #[error("操作 '{action}' 不接受参数")]
    UnexpectedValue { action: &'static str },
}

/// 数据结构操作错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// 当前数据结构不支持该操作
    #[error("{kind} 不支持操作 '{action}'")]
    Unsupported {
        kind: StructureKind,
        action: &'static str,
    },
}

/// ds-core 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),

    /// 输入错误
    #[error("输入错误: {0}")]
    Input(#[from] InputError),

    /// 操作错误
    #[error("操作错误: {0}")]
    Structure(#[from] StructureError),
}

/// Result 类型别名
pub type CoreResult<T> = Result<T, CoreError>;
