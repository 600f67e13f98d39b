//! # Stack 模块
//!
//! 后进先出栈，栈顶位于存储末尾。

use std::fmt;

use crate::node::{IdAllocator, NodeId, NodeRef, Path, format_values};
use crate::outcome::Outcome;

/// 栈
#[derive(Debug, Clone, Default)]
pub struct Stack {
    elements: Vec<NodeRef>,
    ids: IdAllocator,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: i32) -> Outcome {
        let node = NodeRef::new(self.ids.allocate(), value);
        self.elements.push(node);
        Outcome::Inserted {
            path: vec![node],
            node,
            rotations: Vec::new(),
        }
    }

    pub fn pop(&mut self) -> Outcome {
        match self.elements.pop() {
            Some(removed) => Outcome::Removed {
                path: vec![removed],
                removed,
                successor: None,
                rotations: Vec::new(),
            },
            None => Outcome::Empty,
        }
    }

    pub fn peek(&self) -> Outcome {
        match self.elements.last() {
            Some(node) => Outcome::Peeked { node: *node },
            None => Outcome::Empty,
        }
    }

    /// 从栈顶向栈底查找
    pub fn search(&self, value: i32) -> Outcome {
        let mut path = Path::new();
        for node in self.elements.iter().rev() {
            path.push(*node);
            if node.value == value {
                return Outcome::Found { path, node: *node };
            }
        }
        Outcome::NotFound { path }
    }

    pub fn contains(&self, value: i32) -> bool {
        self.elements.iter().any(|n| n.value == value)
    }

    /// 节点距栈顶的位置（栈顶为 1）
    pub fn position_from_top(&self, id: NodeId) -> Option<usize> {
        self.elements
            .iter()
            .rev()
            .position(|n| n.id == id)
            .map(|i| i + 1)
    }

    pub fn clear(&mut self) -> Outcome {
        let removed = std::mem::take(&mut self.elements);
        Outcome::Cleared { removed }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// 自底向上的节点
    pub fn nodes(&self) -> &[NodeRef] {
        &self.elements
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = format_values(self.elements.iter().rev().map(|n| n.value), ", ");
        if self.is_empty() {
            f.write_str(&values)
        } else {
            write!(f, "Top -> {} <- Bottom", values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_lifo() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);

        assert_eq!(stack.to_string(), "Top -> [ 3, 2, 1 ] <- Bottom");
        assert!(matches!(stack.pop(), Outcome::Removed { removed, .. } if removed.value == 3));
        assert!(matches!(stack.peek(), Outcome::Peeked { node } if node.value == 2));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_empty_stack() {
        let mut stack = Stack::new();
        assert!(matches!(stack.pop(), Outcome::Empty));
        assert!(matches!(stack.peek(), Outcome::Empty));
        assert_eq!(stack.to_string(), "[ Empty ]");
    }

    #[test]
    fn test_search_from_top() {
        let mut stack = Stack::new();
        for v in [10, 20, 30] {
            stack.push(v);
        }

        let outcome = stack.search(20);
        let Outcome::Found { path, node } = outcome else {
            panic!("20 应当能找到");
        };
        assert_eq!(path.iter().map(|n| n.value).collect::<Vec<_>>(), vec![30, 20]);
        assert_eq!(stack.position_from_top(node.id), Some(2));

        assert!(matches!(stack.search(5), Outcome::NotFound { ref path } if path.len() == 3));
    }

    #[test]
    fn test_clear_keeps_id_counter() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        assert!(matches!(stack.clear(), Outcome::Cleared { ref removed } if removed.len() == 2));

        let Outcome::Inserted { node, .. } = stack.push(3) else {
            panic!("push 总是成功");
        };
        assert_eq!(node.id, NodeId(2));
    }
}
