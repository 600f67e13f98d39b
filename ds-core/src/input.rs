//! # Input 模块
//!
//! 定义用户对数据结构发出的操作，以及数值输入的解析。
//!
//! ## 设计说明
//!
//! - `Action` 是语义化的操作，数据结构只处理 `Action`，不关心输入来自按钮还是脚本
//! - `ActionKind` 是不带参数的操作名，用于从文本（按钮名、脚本关键字）构造 `Action`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InputError;

/// 解析数值输入
///
/// 去掉首尾空白后必须是完整的 `i32`（可带正负号），不接受 `12abc` 这类前缀匹配。
pub fn parse_value(text: &str) -> Result<i32, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    trimmed.parse::<i32>().map_err(|_| InputError::Invalid {
        text: trimmed.to_string(),
    })
}

/// 不带参数的操作名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Insert,
    InsertHead,
    InsertTail,
    Delete,
    Search,
    Push,
    Pop,
    Peek,
    PeekRear,
    Enqueue,
    Dequeue,
    ExtractMin,
    Clear,
}

impl ActionKind {
    pub const ALL: [ActionKind; 13] = [
        ActionKind::Insert,
        ActionKind::InsertHead,
        ActionKind::InsertTail,
        ActionKind::Delete,
        ActionKind::Search,
        ActionKind::Push,
        ActionKind::Pop,
        ActionKind::Peek,
        ActionKind::PeekRear,
        ActionKind::Enqueue,
        ActionKind::Dequeue,
        ActionKind::ExtractMin,
        ActionKind::Clear,
    ];

    /// 脚本关键字
    pub fn keyword(&self) -> &'static str {
        match self {
            ActionKind::Insert => "insert",
            ActionKind::InsertHead => "insert-head",
            ActionKind::InsertTail => "insert-tail",
            ActionKind::Delete => "delete",
            ActionKind::Search => "search",
            ActionKind::Push => "push",
            ActionKind::Pop => "pop",
            ActionKind::Peek => "peek",
            ActionKind::PeekRear => "peek-rear",
            ActionKind::Enqueue => "enqueue",
            ActionKind::Dequeue => "dequeue",
            ActionKind::ExtractMin => "extract-min",
            ActionKind::Clear => "clear",
        }
    }

    /// 是否需要整数参数
    pub fn needs_value(&self) -> bool {
        matches!(
            self,
            ActionKind::Insert
                | ActionKind::InsertHead
                | ActionKind::InsertTail
                | ActionKind::Delete
                | ActionKind::Search
                | ActionKind::Push
                | ActionKind::Enqueue
        )
    }

    /// 带上参数构造 `Action`
    pub fn with_value(self, value: Option<i32>) -> Result<Action, InputError> {
        let action = match (self, value) {
            (ActionKind::Insert, Some(v)) => Action::Insert(v),
            (ActionKind::InsertHead, Some(v)) => Action::InsertHead(v),
            (ActionKind::InsertTail, Some(v)) => Action::InsertTail(v),
            (ActionKind::Delete, Some(v)) => Action::Delete(v),
            (ActionKind::Search, Some(v)) => Action::Search(v),
            (ActionKind::Push, Some(v)) => Action::Push(v),
            (ActionKind::Enqueue, Some(v)) => Action::Enqueue(v),
            (ActionKind::Pop, None) => Action::Pop,
            (ActionKind::Peek, None) => Action::Peek,
            (ActionKind::PeekRear, None) => Action::PeekRear,
            (ActionKind::Dequeue, None) => Action::Dequeue,
            (ActionKind::ExtractMin, None) => Action::ExtractMin,
            (ActionKind::Clear, None) => Action::Clear,
            (kind, None) => {
                return Err(InputError::MissingValue {
                    action: kind.keyword(),
                });
            }
            (kind, Some(_)) => {
                return Err(InputError::UnexpectedValue {
                    action: kind.keyword(),
                });
            }
        };
        Ok(action)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for ActionKind {
    type Err = InputError;

    /// 大小写不敏感，`_` 与 `-` 等价
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.keyword() == normalized)
            .ok_or_else(|| InputError::UnknownAction {
                name: s.trim().to_string(),
            })
    }
}

/// 对数据结构的一次操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// 插入（树、堆）
    Insert(i32),
    /// 头插（链表）
    InsertHead(i32),
    /// 尾插（链表）
    InsertTail(i32),
    /// 删除指定值
    Delete(i32),
    /// 查找
    Search(i32),
    /// 入栈
    Push(i32),
    /// 出栈
    Pop,
    /// 查看栈顶 / 队首 / 堆顶
    Peek,
    /// 查看队尾
    PeekRear,
    /// 入队
    Enqueue(i32),
    /// 出队
    Dequeue,
    /// 取出堆顶
    ExtractMin,
    /// 清空
    Clear,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Insert(_) => ActionKind::Insert,
            Action::InsertHead(_) => ActionKind::InsertHead,
            Action::InsertTail(_) => ActionKind::InsertTail,
            Action::Delete(_) => ActionKind::Delete,
            Action::Search(_) => ActionKind::Search,
            Action::Push(_) => ActionKind::Push,
            Action::Pop => ActionKind::Pop,
            Action::Peek => ActionKind::Peek,
            Action::PeekRear => ActionKind::PeekRear,
            Action::Enqueue(_) => ActionKind::Enqueue,
            Action::Dequeue => ActionKind::Dequeue,
            Action::ExtractMin => ActionKind::ExtractMin,
            Action::Clear => ActionKind::Clear,
        }
    }

    /// 操作名（同脚本关键字）
    pub fn name(&self) -> &'static str {
        self.kind().keyword()
    }

    /// 操作携带的值
    pub fn value(&self) -> Option<i32> {
        match *self {
            Action::Insert(v)
            | Action::InsertHead(v)
            | Action::InsertTail(v)
            | Action::Delete(v)
            | Action::Search(v)
            | Action::Push(v)
            | Action::Enqueue(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => write!(f, "{} {}", self.name(), v),
            None => f.write_str(self.name()),
        }
    }
}
