//! # LinkedList 模块
//!
//! 单向链表，允许重复值。

use std::fmt;

use crate::node::{IdAllocator, NodeId, NodeRef, Path, format_values};
use crate::outcome::Outcome;

#[derive(Debug)]
struct ListNode {
    node: NodeRef,
    next: Option<Box<ListNode>>,
}

/// 单向链表
#[derive(Debug, Default)]
pub struct LinkedList {
    head: Option<Box<ListNode>>,
    ids: IdAllocator,
    len: usize,
}

impl LinkedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 头插，路径只有新节点
    pub fn insert_head(&mut self, value: i32) -> Outcome {
        let node = NodeRef::new(self.ids.allocate(), value);
        let next = self.head.take();
        self.head = Some(Box::new(ListNode { node, next }));
        self.len += 1;

        Outcome::Inserted {
            path: vec![node],
            node,
            rotations: Vec::new(),
        }
    }

    /// 尾插，路径为现有全部节点加上新节点
    pub fn insert_tail(&mut self, value: i32) -> Outcome {
        let node = NodeRef::new(self.ids.allocate(), value);
        let mut path = Path::with_capacity(self.len + 1);

        let mut slot = &mut self.head;
        while let Some(current) = slot {
            path.push(current.node);
            slot = &mut current.next;
        }
        *slot = Some(Box::new(ListNode { node, next: None }));
        self.len += 1;
        path.push(node);

        Outcome::Inserted {
            path,
            node,
            rotations: Vec::new(),
        }
    }

    /// 删除第一个等于 `value` 的节点
    pub fn remove(&mut self, value: i32) -> Outcome {
        let mut path = Path::new();
        match remove_from(&mut self.head, value, &mut path) {
            Some(removed) => {
                self.len -= 1;
                Outcome::Removed {
                    path,
                    removed,
                    successor: None,
                    rotations: Vec::new(),
                }
            }
            None => Outcome::NotFound { path },
        }
    }

    /// 从头查找
    pub fn search(&self, value: i32) -> Outcome {
        let mut path = Path::new();
        for node in self.iter() {
            path.push(node);
            if node.value == value {
                return Outcome::Found { path, node };
            }
        }
        Outcome::NotFound { path }
    }

    pub fn contains(&self, value: i32) -> bool {
        self.iter().any(|n| n.value == value)
    }

    pub fn clear(&mut self) -> Outcome {
        let removed = self.nodes();
        self.drop_nodes();
        self.len = 0;
        Outcome::Cleared { removed }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn head(&self) -> Option<NodeRef> {
        self.head.as_ref().map(|n| n.node)
    }

    /// 从头到尾的节点
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    pub fn nodes(&self) -> Vec<NodeRef> {
        self.iter().collect()
    }

    /// 相邻节点之间的边
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let nodes = self.nodes();
        nodes.windows(2).map(|w| (w[0].id, w[1].id)).collect()
    }

    /// 逐个释放节点，避免长链表递归析构
    fn drop_nodes(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

impl Drop for LinkedList {
    fn drop(&mut self) {
        self.drop_nodes();
    }
}

impl fmt::Display for LinkedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_values(self.iter().map(|n| n.value), " -> "))
    }
}

/// 链表迭代器
pub struct Iter<'a> {
    next: Option<&'a ListNode>,
}

impl Iterator for Iter<'_> {
    type Item = NodeRef;

    fn next(&mut self) -> Option<NodeRef> {
        let current = self.next?;
        self.next = current.next.as_deref();
        Some(current.node)
    }
}

/// 摘下第一个值为 `value` 的节点，沿途经过的节点记入 `path`
fn remove_from(head: &mut Option<Box<ListNode>>, value: i32, path: &mut Path) -> Option<NodeRef> {
    let mut slot = head;
    while slot.as_ref().is_some_and(|current| current.node.value != value) {
        if let Some(current) = slot {
            path.push(current.node);
            slot = &mut current.next;
        }
    }

    let removed = slot.take()?;
    let node = removed.node;
    path.push(node);
    *slot = removed.next;
    Some(node)
}
