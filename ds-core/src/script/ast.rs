//! # AST 模块
//!
//! 操作脚本解析后的结构化表示。
//!
//! ## 语法
//!
//! ```text
//! # 注释
//! structure avl        # 只能出现在所有操作之前
//! speed 1.5
//! insert 10
//! pop
//! wait 0.5
//! export tree.json
//! ```

use serde::{Deserialize, Serialize};

use crate::input::Action;
use crate::structure::StructureKind;

/// 脚本指令
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScriptCommand {
    /// 对数据结构执行操作
    Action(Action),

    /// 调整动画速度
    Speed(f32),

    /// 在动画结束后额外等待（秒）
    Wait(f32),

    /// 导出当前场景快照，未指定文件名时使用默认名
    Export(Option<String>),
}

/// 带行号的指令
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptLine {
    /// 行号（从 1 开始）
    pub line: usize,
    pub command: ScriptCommand,
}

/// 解析后的脚本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// 脚本标识（通常是文件路径）
    pub id: String,
    /// 脚本声明的数据结构
    pub structure: Option<StructureKind>,
    /// 指令序列
    pub commands: Vec<ScriptLine>,
}

impl Script {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            structure: None,
            commands: Vec::new(),
        }
    }

    /// 全部数据结构操作
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.commands.iter().filter_map(|line| match &line.command {
            ScriptCommand::Action(action) => Some(action),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
