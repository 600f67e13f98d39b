//! # Queue 模块
//!
//! 先进先出队列，基于 `VecDeque`，两端操作均为 O(1)。

use std::collections::VecDeque;
use std::fmt;

use crate::node::{IdAllocator, NodeId, NodeRef, Path, format_values};
use crate::outcome::Outcome;

/// 队列
#[derive(Debug, Clone, Default)]
pub struct Queue {
    elements: VecDeque<NodeRef>,
    ids: IdAllocator,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, value: i32) -> Outcome {
        let node = NodeRef::new(self.ids.allocate(), value);
        self.elements.push_back(node);
        Outcome::Inserted {
            path: vec![node],
            node,
            rotations: Vec::new(),
        }
    }

    pub fn dequeue(&mut self) -> Outcome {
        match self.elements.pop_front() {
            Some(removed) => Outcome::Removed {
                path: vec![removed],
                removed,
                successor: None,
                rotations: Vec::new(),
            },
            None => Outcome::Empty,
        }
    }

    pub fn peek_front(&self) -> Outcome {
        self.elements
            .front()
            .map_or(Outcome::Empty, |node| Outcome::Peeked { node: *node })
    }

    pub fn peek_rear(&self) -> Outcome {
        self.elements
            .back()
            .map_or(Outcome::Empty, |node| Outcome::Peeked { node: *node })
    }

    /// 从队首向队尾查找
    pub fn search(&self, value: i32) -> Outcome {
        let mut path = Path::new();
        for node in &self.elements {
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

    /// 节点距队首的位置（队首为 1）
    pub fn position_from_front(&self, id: NodeId) -> Option<usize> {
        self.elements.iter().position(|n| n.id == id).map(|i| i + 1)
    }

    pub fn clear(&mut self) -> Outcome {
        let removed = self.elements.drain(..).collect();
        Outcome::Cleared { removed }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// 从队首到队尾的节点
    pub fn nodes(&self) -> Vec<NodeRef> {
        self.elements.iter().copied().collect()
    }
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = format_values(self.elements.iter().map(|n| n.value), ", ");
        if self.is_empty() {
            f.write_str(&values)
        } else {
            write!(f, "Front -> {} <- Rear", values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(values: &[i32]) -> Queue {
        let mut queue = Queue::new();
        for &v in values {
            queue.enqueue(v);
        }
        queue
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = build(&[1, 2, 3]);
        assert_eq!(queue.to_string(), "Front -> [ 1, 2, 3 ] <- Rear");

        assert!(matches!(queue.dequeue(), Outcome::Removed { removed, .. } if removed.value == 1));
        assert!(matches!(queue.peek_front(), Outcome::Peeked { node } if node.value == 2));
        assert!(matches!(queue.peek_rear(), Outcome::Peeked { node } if node.value == 3));
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = Queue::new();
        assert!(matches!(queue.dequeue(), Outcome::Empty));
        assert!(matches!(queue.peek_front(), Outcome::Empty));
        assert!(matches!(queue.peek_rear(), Outcome::Empty));
        assert_eq!(queue.to_string(), "[ Empty ]");
    }

    #[test]
    fn test_search_position() {
        let queue = build(&[5, 6, 7]);
        let Outcome::Found { path, node } = queue.search(7) else {
            panic!("7 应当能找到");
        };
        assert_eq!(path.len(), 3);
        assert_eq!(queue.position_from_front(node.id), Some(3));
        assert_eq!(queue.position_from_front(NodeId(99)), None);
    }

    #[test]
    fn test_clear() {
        let mut queue = build(&[1, 2]);
        let Outcome::Cleared { removed } = queue.clear() else {
            panic!("clear 总是返回 Cleared");
        };
        assert_eq!(removed.iter().map(|n| n.value).collect::<Vec<_>>(), vec![1, 2]);
        assert!(queue.is_empty());
    }
}
