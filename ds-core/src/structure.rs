//! # Structure 模块
//!
//! 把六种数据结构统一到一个枚举上，按 [`Action`] 分发。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::avl::AvlTree;
use crate::bst::Bst;
use crate::error::StructureError;
use crate::heap::MinHeap;
use crate::input::Action;
use crate::linked_list::LinkedList;
use crate::node::NodeRef;
use crate::outcome::Outcome;
use crate::queue::Queue;
use crate::stack::Stack;

/// 数据结构种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    #[serde(rename = "bst")]
    Bst,
    #[serde(rename = "avl")]
    Avl,
    #[serde(rename = "heap")]
    MinHeap,
    #[serde(rename = "list")]
    LinkedList,
    #[serde(rename = "stack")]
    Stack,
    #[serde(rename = "queue")]
    Queue,
}

impl StructureKind {
    pub const ALL: [StructureKind; 6] = [
        StructureKind::Bst,
        StructureKind::Avl,
        StructureKind::MinHeap,
        StructureKind::LinkedList,
        StructureKind::Stack,
        StructureKind::Queue,
    ];

    /// 短名称（配置、命令行、脚本中使用）
    pub fn name(&self) -> &'static str {
        match self {
            StructureKind::Bst => "bst",
            StructureKind::Avl => "avl",
            StructureKind::MinHeap => "heap",
            StructureKind::LinkedList => "list",
            StructureKind::Stack => "stack",
            StructureKind::Queue => "queue",
        }
    }

    /// 展示标题
    pub fn title(&self) -> &'static str {
        match self {
            StructureKind::Bst => "Binary Search Tree",
            StructureKind::Avl => "AVL Tree",
            StructureKind::MinHeap => "Min Heap",
            StructureKind::LinkedList => "Linked List",
            StructureKind::Stack => "Stack (LIFO)",
            StructureKind::Queue => "Queue (FIFO)",
        }
    }

    /// 反馈消息中使用的名词
    pub fn noun(&self) -> &'static str {
        match self {
            StructureKind::Bst | StructureKind::Avl => "tree",
            StructureKind::MinHeap => "heap",
            StructureKind::LinkedList => "list",
            StructureKind::Stack => "stack",
            StructureKind::Queue => "queue",
        }
    }

    /// 是否以树的形式展示
    pub fn is_tree(&self) -> bool {
        matches!(
            self,
            StructureKind::Bst | StructureKind::Avl | StructureKind::MinHeap
        )
    }

    /// 导出文件的默认前缀
    pub fn export_stem(&self) -> &'static str {
        match self {
            StructureKind::LinkedList => "linkedlist",
            other => other.name(),
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for StructureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bst" => Ok(StructureKind::Bst),
            "avl" => Ok(StructureKind::Avl),
            "heap" | "min-heap" | "minheap" => Ok(StructureKind::MinHeap),
            "list" | "linked-list" | "linkedlist" => Ok(StructureKind::LinkedList),
            "stack" => Ok(StructureKind::Stack),
            "queue" => Ok(StructureKind::Queue),
            other => Err(format!("未知的数据结构 '{}'", other)),
        }
    }
}

/// 当前正在演示的数据结构
#[derive(Debug)]
pub enum Structure {
    Bst(Bst),
    Avl(AvlTree),
    MinHeap(MinHeap),
    LinkedList(LinkedList),
    Stack(Stack),
    Queue(Queue),
}

impl Structure {
    /// 创建指定种类的空结构
    pub fn new(kind: StructureKind) -> Self {
        match kind {
            StructureKind::Bst => Structure::Bst(Bst::new()),
            StructureKind::Avl => Structure::Avl(AvlTree::new()),
            StructureKind::MinHeap => Structure::MinHeap(MinHeap::new()),
            StructureKind::LinkedList => Structure::LinkedList(LinkedList::new()),
            StructureKind::Stack => Structure::Stack(Stack::new()),
            StructureKind::Queue => Structure::Queue(Queue::new()),
        }
    }

    pub fn kind(&self) -> StructureKind {
        match self {
            Structure::Bst(_) => StructureKind::Bst,
            Structure::Avl(_) => StructureKind::Avl,
            Structure::MinHeap(_) => StructureKind::MinHeap,
            Structure::LinkedList(_) => StructureKind::LinkedList,
            Structure::Stack(_) => StructureKind::Stack,
            Structure::Queue(_) => StructureKind::Queue,
        }
    }

    /// 执行操作
    ///
    /// 当前结构不支持的操作返回 [`StructureError::Unsupported`]，结构保持不变。
    pub fn apply(&mut self, action: &Action) -> Result<Outcome, StructureError> {
        let kind = self.kind();
        let outcome = match (self, *action) {
            (Structure::Bst(tree), Action::Insert(v)) => tree.insert(v),
            (Structure::Bst(tree), Action::Delete(v)) => tree.remove(v),
            (Structure::Bst(tree), Action::Search(v)) => tree.search(v),
            (Structure::Bst(tree), Action::Clear) => tree.clear(),

            (Structure::Avl(tree), Action::Insert(v)) => tree.insert(v),
            (Structure::Avl(tree), Action::Delete(v)) => tree.remove(v),
            (Structure::Avl(tree), Action::Search(v)) => tree.search(v),
            (Structure::Avl(tree), Action::Clear) => tree.clear(),

            (Structure::MinHeap(heap), Action::Insert(v)) => heap.insert(v),
            (Structure::MinHeap(heap), Action::Delete(v)) => heap.remove(v),
            (Structure::MinHeap(heap), Action::Search(v)) => heap.search(v),
            (Structure::MinHeap(heap), Action::ExtractMin) => heap.extract_min(),
            (Structure::MinHeap(heap), Action::Peek) => heap.peek_min(),
            (Structure::MinHeap(heap), Action::Clear) => heap.clear(),

            (Structure::LinkedList(list), Action::InsertHead(v)) => list.insert_head(v),
            (Structure::LinkedList(list), Action::InsertTail(v)) => list.insert_tail(v),
            (Structure::LinkedList(list), Action::Delete(v)) => list.remove(v),
            (Structure::LinkedList(list), Action::Search(v)) => list.search(v),
            (Structure::LinkedList(list), Action::Clear) => list.clear(),

            (Structure::Stack(stack), Action::Push(v)) => stack.push(v),
            (Structure::Stack(stack), Action::Pop) => stack.pop(),
            (Structure::Stack(stack), Action::Peek) => stack.peek(),
            (Structure::Stack(stack), Action::Search(v)) => stack.search(v),
            (Structure::Stack(stack), Action::Clear) => stack.clear(),

            (Structure::Queue(queue), Action::Enqueue(v)) => queue.enqueue(v),
            (Structure::Queue(queue), Action::Dequeue) => queue.dequeue(),
            (Structure::Queue(queue), Action::Peek) => queue.peek_front(),
            (Structure::Queue(queue), Action::PeekRear) => queue.peek_rear(),
            (Structure::Queue(queue), Action::Search(v)) => queue.search(v),
            (Structure::Queue(queue), Action::Clear) => queue.clear(),

            _ => {
                return Err(StructureError::Unsupported {
                    kind,
                    action: action.name(),
                });
            }
        };
        Ok(outcome)
    }

    /// 是否支持某个操作
    pub fn supports(&self, action: &Action) -> bool {
        use crate::input::ActionKind as K;

        let kind = action.kind();
        match self.kind() {
            StructureKind::Bst | StructureKind::Avl => {
                matches!(kind, K::Insert | K::Delete | K::Search | K::Clear)
            }
            StructureKind::MinHeap => matches!(
                kind,
                K::Insert | K::Delete | K::Search | K::ExtractMin | K::Peek | K::Clear
            ),
            StructureKind::LinkedList => matches!(
                kind,
                K::InsertHead | K::InsertTail | K::Delete | K::Search | K::Clear
            ),
            StructureKind::Stack => {
                matches!(kind, K::Push | K::Pop | K::Peek | K::Search | K::Clear)
            }
            StructureKind::Queue => matches!(
                kind,
                K::Enqueue | K::Dequeue | K::Peek | K::PeekRear | K::Search | K::Clear
            ),
        }
    }

    /// 内容字符串（树为中序遍历）
    pub fn contents(&self) -> String {
        match self {
            Structure::Bst(tree) => tree.to_string(),
            Structure::Avl(tree) => tree.to_string(),
            Structure::MinHeap(heap) => heap.to_string(),
            Structure::LinkedList(list) => list.to_string(),
            Structure::Stack(stack) => stack.to_string(),
            Structure::Queue(queue) => queue.to_string(),
        }
    }

    /// 全部节点（树为前序，其余按存储顺序）
    pub fn nodes(&self) -> Vec<NodeRef> {
        match self {
            Structure::Bst(tree) => tree.nodes(),
            Structure::Avl(tree) => tree.nodes(),
            Structure::MinHeap(heap) => heap.nodes().to_vec(),
            Structure::LinkedList(list) => list.nodes(),
            Structure::Stack(stack) => stack.nodes().to_vec(),
            Structure::Queue(queue) => queue.nodes(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Structure::Bst(tree) => tree.len(),
            Structure::Avl(tree) => tree.len(),
            Structure::MinHeap(heap) => heap.len(),
            Structure::LinkedList(list) => list.len(),
            Structure::Stack(stack) => stack.len(),
            Structure::Queue(queue) => queue.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StructureError;

    #[test]
    fn test_kind_names_roundtrip() {
        for kind in StructureKind::ALL {
            assert_eq!(kind.name().parse::<StructureKind>(), Ok(kind));
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
        assert_eq!("Linked-List".parse::<StructureKind>(), Ok(StructureKind::LinkedList));
        assert!("graph".parse::<StructureKind>().is_err());
    }

    #[test]
    fn test_apply_dispatch() {
        let mut structure = Structure::new(StructureKind::Bst);
        structure.apply(&Action::Insert(5)).unwrap();
        structure.apply(&Action::Insert(3)).unwrap();
        assert_eq!(structure.contents(), "[ 3, 5 ]");
        assert_eq!(structure.len(), 2);
    }

    #[test]
    fn test_unsupported_action() {
        let mut structure = Structure::new(StructureKind::Stack);
        let err = structure.apply(&Action::Insert(1)).unwrap_err();
        assert_eq!(
            err,
            StructureError::Unsupported {
                kind: StructureKind::Stack,
                action: "insert",
            }
        );
        assert!(structure.is_empty());
    }

    #[test]
    fn test_supports_matches_apply() {
        use crate::input::ActionKind;

        for kind in StructureKind::ALL {
            for action_kind in ActionKind::ALL {
                let action = action_kind
                    .with_value(action_kind.needs_value().then_some(1))
                    .unwrap();
                let mut structure = Structure::new(kind);
                let supported = structure.supports(&action);
                assert_eq!(
                    structure.apply(&action).is_ok(),
                    supported,
                    "{} / {}",
                    kind.name(),
                    action
                );
            }
        }
    }

    #[test]
    fn test_contents_formats() {
        let mut queue = Structure::new(StructureKind::Queue);
        assert_eq!(queue.contents(), "[ Empty ]");
        queue.apply(&Action::Enqueue(1)).unwrap();
        queue.apply(&Action::Enqueue(2)).unwrap();
        assert_eq!(queue.contents(), "Front -> [ 1, 2 ] <- Rear");
        assert_eq!(StructureKind::Queue.to_string(), "Queue (FIFO)");
    }
}
