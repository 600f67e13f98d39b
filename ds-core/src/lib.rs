//! # DS Core
//!
//! 数据结构可视化的核心库。
//!
//! ## 架构概述
//!
//! `ds-core` 是纯逻辑核心，不依赖任何 IO、时间流逝或渲染。
//! 每个操作都返回一个 [`Outcome`]，描述"发生了什么"以及访问路径：
//!
//! ```text
//! Session                       Structure
//!   │                              │
//!   │──── Action ────────────────►│
//!   │                              │ apply()
//!   │◄─── Outcome (path, nodes) ──│
//!   │                              │
//! ```
//!
//! 动画层根据 `Outcome` 生成动画步骤，数据结构本身在 `apply` 返回时已是最终状态。
//!
//! ## 使用示例
//!
//! ```ignore
//! use ds_core::{Action, Structure, StructureKind};
//!
//! let mut structure = Structure::new(StructureKind::Avl);
//! for v in [30, 20, 10] {
//!     let outcome = structure.apply(&Action::Insert(v))?;
//!     println!("{} -> {:?}", v, outcome.rotations());
//! }
//! println!("{}", structure.contents());
//! ```
//!
//! ## 模块结构
//!
//! - [`node`]：节点 ID、路径与树形视图
//! - [`outcome`]：操作结果
//! - [`bst`] / [`avl`] / [`heap`] / [`linked_list`] / [`stack`] / [`queue`]：六种数据结构
//! - [`structure`]：统一分发
//! - [`input`]：操作与数值输入
//! - [`script`]：操作脚本解析
//! - [`history`]：操作历史
//! - [`error`]：错误类型定义

pub mod avl;
pub mod bst;
pub mod error;
pub mod heap;
pub mod history;
pub mod input;
pub mod linked_list;
pub mod node;
pub mod outcome;
pub mod queue;
pub mod script;
pub mod stack;
pub mod structure;

// 重导出核心类型
pub use avl::AvlTree;
pub use bst::Bst;
pub use error::{CoreError, CoreResult, InputError, ParseError, StructureError};
pub use heap::{HeapSlot, MinHeap};
pub use history::{History, OperationRecord};
pub use input::{Action, ActionKind, parse_value};
pub use linked_list::LinkedList;
pub use node::{IdAllocator, NodeId, NodeRef, Path, TreeView};
pub use outcome::{Outcome, Rotation};
pub use queue::Queue;
pub use script::{Parser, Script, ScriptCommand, ScriptLine};
pub use stack::Stack;
pub use structure::{Structure, StructureKind};
