//! # Outcome 模块
//!
//! 定义所有数据结构操作的结果。
//! Outcome 是数据结构与动画层之间的**唯一通信方式**。
//!
//! ## 设计原则
//!
//! - **声明式**：Outcome 描述"发生了什么"，不描述"怎么画"
//! - **快照**：路径里的节点是操作当时的值，之后结构再变化也不影响
//! - **引擎无关**：不包含任何渲染相关的类型

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::node::{NodeRef, Path};

/// AVL 旋转类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    /// 单左旋
    Left,
    /// 单右旋
    Right,
    /// 先左后右
    LeftRight,
    /// 先右后左
    RightLeft,
}

impl Rotation {
    /// 旋转的展示名称
    pub fn name(&self) -> &'static str {
        match self {
            Rotation::Left => "Left Rotation",
            Rotation::Right => "Right Rotation",
            Rotation::LeftRight => "Left-Right Rotation",
            Rotation::RightLeft => "Right-Left Rotation",
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 操作结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// 插入成功，路径最后一个节点是新节点
    Inserted {
        path: Path,
        node: NodeRef,
        /// 按发生顺序（自底向上）记录的旋转
        rotations: Vec<Rotation>,
    },

    /// 值已存在，路径最后一个节点是与之相等的节点
    Duplicate { path: Path },

    /// 删除成功
    Removed {
        path: Path,
        /// 被删除值所在的节点
        removed: NodeRef,
        /// 双孩子删除时接替的中序后继
        successor: Option<NodeRef>,
        rotations: Vec<Rotation>,
    },

    /// 未找到
    NotFound { path: Path },

    /// 查找成功
    Found { path: Path, node: NodeRef },

    /// 查看端点元素（栈顶、队首、队尾、堆顶）
    Peeked { node: NodeRef },

    /// 堆插入，`sift` 是上浮经过的槽位
    HeapInserted { sift: Vec<usize>, node: NodeRef },

    /// 堆删除，`sift` 是下沉/上浮经过的槽位
    HeapRemoved { sift: Vec<usize>, removed: NodeRef },

    /// 结构为空，操作无法进行
    Empty,

    /// 清空，`removed` 是被移除的全部节点
    Cleared { removed: Vec<NodeRef> },
}

impl Outcome {
    /// 访问路径（没有路径的结果返回空切片）
    pub fn path(&self) -> &[NodeRef] {
        match self {
            Outcome::Inserted { path, .. }
            | Outcome::Duplicate { path }
            | Outcome::Removed { path, .. }
            | Outcome::NotFound { path }
            | Outcome::Found { path, .. } => path,
            _ => &[],
        }
    }

    /// 被物理摘除的节点
    ///
    /// 双孩子删除时节点保留自身 ID、改为后继的值，真正离开结构的是后继节点。
    pub fn detached(&self) -> Option<NodeRef> {
        match self {
            Outcome::Removed {
                removed, successor, ..
            } => Some(successor.unwrap_or(*removed)),
            Outcome::HeapRemoved { removed, .. } => Some(*removed),
            _ => None,
        }
    }

    /// 本次操作发生的旋转
    pub fn rotations(&self) -> &[Rotation] {
        match self {
            Outcome::Inserted { rotations, .. } | Outcome::Removed { rotations, .. } => rotations,
            _ => &[],
        }
    }

    /// 操作是否改变了结构
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Outcome::Inserted { .. }
                | Outcome::Removed { .. }
                | Outcome::HeapInserted { .. }
                | Outcome::HeapRemoved { .. }
                | Outcome::Cleared { .. }
        )
    }

    /// 简短摘要（用于历史记录）
    pub fn summary(&self) -> String {
        match self {
            Outcome::Inserted { node, rotations, .. } if rotations.is_empty() => {
                format!("inserted {}", node.value)
            }
            Outcome::Inserted { node, rotations, .. } => {
                let names: Vec<&str> = rotations.iter().map(Rotation::name).collect();
                format!("inserted {} ({})", node.value, names.join(", "))
            }
            Outcome::Duplicate { path } => match path.last() {
                Some(node) => format!("duplicate {}", node.value),
                None => "duplicate".to_string(),
            },
            Outcome::Removed { removed, .. } => format!("removed {}", removed.value),
            Outcome::NotFound { .. } => "not found".to_string(),
            Outcome::Found { node, .. } => format!("found {}", node.value),
            Outcome::Peeked { node } => format!("peeked {}", node.value),
            Outcome::HeapInserted { node, .. } => format!("inserted {}", node.value),
            Outcome::HeapRemoved { removed, .. } => format!("removed {}", removed.value),
            Outcome::Empty => "empty".to_string(),
            Outcome::Cleared { removed } => format!("cleared {} nodes", removed.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;

    fn node(id: u32, value: i32) -> NodeRef {
        NodeRef::new(NodeId(id), value)
    }

    #[test]
    fn test_detached_prefers_successor() {
        let outcome = Outcome::Removed {
            path: vec![node(0, 50), node(2, 70), node(5, 60)],
            removed: node(0, 50),
            successor: Some(node(5, 60)),
            rotations: Vec::new(),
        };
        assert_eq!(outcome.detached(), Some(node(5, 60)));

        let leaf = Outcome::Removed {
            path: vec![node(0, 50), node(1, 30)],
            removed: node(1, 30),
            successor: None,
            rotations: Vec::new(),
        };
        assert_eq!(leaf.detached(), Some(node(1, 30)));
    }

    #[test]
    fn test_rotation_names() {
        assert_eq!(Rotation::LeftRight.to_string(), "Left-Right Rotation");
        assert_eq!(Rotation::Left.name(), "Left Rotation");
    }

    #[test]
    fn test_summary_with_rotation() {
        let outcome = Outcome::Inserted {
            path: vec![node(0, 1)],
            node: node(2, 3),
            rotations: vec![Rotation::Left],
        };
        assert_eq!(outcome.summary(), "inserted 3 (Left Rotation)");
        assert!(outcome.is_mutation());
        assert!(!Outcome::Empty.is_mutation());
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = Outcome::Found {
            path: vec![node(0, 8), node(1, 4)],
            node: node(1, 4),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, back);
    }
}
