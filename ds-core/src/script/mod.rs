//! # Script 模块
//!
//! 操作脚本（`.ops`）的定义与解析，用于无界面地驱动演示。
//!
//! ## 模块结构
//!
//! - [`ast`]：脚本结构定义
//! - [`parser`]：逐行解析器

pub mod ast;
pub mod parser;

pub use ast::*;
pub use parser::{MAX_WAIT_SECONDS, Parser};
