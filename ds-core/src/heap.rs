//! # Heap 模块
//!
//! 数组存储的最小堆。父节点 `(i - 1) / 2`，孩子 `2i + 1`、`2i + 2`。
//!
//! 上浮/下沉记录的是**槽位下标**序列：起始槽位，以及值依次移动到的槽位。
//! 允许重复值。

use std::fmt;

use crate::node::{IdAllocator, NodeRef, Path, TreeView, format_values};
use crate::outcome::Outcome;

/// 最小堆
#[derive(Debug, Clone, Default)]
pub struct MinHeap {
    slots: Vec<NodeRef>,
    ids: IdAllocator,
}

impl MinHeap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入值并上浮
    pub fn insert(&mut self, value: i32) -> Outcome {
        let node = NodeRef::new(self.ids.allocate(), value);
        self.slots.push(node);

        let start = self.slots.len() - 1;
        let mut sift = vec![start];
        self.sift_up(start, &mut sift);

        Outcome::HeapInserted { sift, node }
    }

    /// 取出最小值
    ///
    /// 末尾元素移到根再下沉。
    pub fn extract_min(&mut self) -> Outcome {
        if self.slots.is_empty() {
            return Outcome::Empty;
        }
        self.remove_slot(0)
    }

    /// 删除第一个（按数组顺序）等于 `value` 的元素
    pub fn remove(&mut self, value: i32) -> Outcome {
        match self.slots.iter().position(|n| n.value == value) {
            Some(index) => self.remove_slot(index),
            None => Outcome::NotFound { path: Path::new() },
        }
    }

    /// 按数组顺序线性查找
    pub fn search(&self, value: i32) -> Outcome {
        let mut path = Path::new();
        for node in &self.slots {
            path.push(*node);
            if node.value == value {
                return Outcome::Found { path, node: *node };
            }
        }
        Outcome::NotFound { path }
    }

    pub fn contains(&self, value: i32) -> bool {
        self.slots.iter().any(|n| n.value == value)
    }

    /// 查看堆顶
    pub fn peek_min(&self) -> Outcome {
        match self.slots.first() {
            Some(node) => Outcome::Peeked { node: *node },
            None => Outcome::Empty,
        }
    }

    pub fn clear(&mut self) -> Outcome {
        let removed = std::mem::take(&mut self.slots);
        Outcome::Cleared { removed }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// 按存储顺序的全部节点
    pub fn nodes(&self) -> &[NodeRef] {
        &self.slots
    }

    /// 指定槽位上的节点
    pub fn node_at(&self, slot: usize) -> Option<NodeRef> {
        self.slots.get(slot).copied()
    }

    /// 以树的形式查看（根为槽位 0）
    pub fn tree(&self) -> Option<HeapSlot<'_>> {
        (!self.slots.is_empty()).then_some(HeapSlot {
            heap: self,
            index: 0,
        })
    }

    fn remove_slot(&mut self, index: usize) -> Outcome {
        let removed = self.slots[index];
        let mut sift = vec![index];

        let Some(last) = self.slots.pop() else {
            return Outcome::Empty;
        };
        if index < self.slots.len() {
            self.slots[index] = last;
            let settled = self.sift_down(index, &mut sift);
            self.sift_up(settled, &mut sift);
        }

        Outcome::HeapRemoved { sift, removed }
    }

    fn sift_up(&mut self, mut index: usize, sift: &mut Vec<usize>) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.slots[parent].value <= self.slots[index].value {
                break;
            }
            self.slots.swap(parent, index);
            index = parent;
            sift.push(index);
        }
    }

    /// 下沉，返回最终停留的槽位
    fn sift_down(&mut self, mut index: usize, sift: &mut Vec<usize>) -> usize {
        let len = self.slots.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.slots[left].value < self.slots[smallest].value {
                smallest = left;
            }
            if right < len && self.slots[right].value < self.slots[smallest].value {
                smallest = right;
            }
            if smallest == index {
                return index;
            }

            self.slots.swap(index, smallest);
            index = smallest;
            sift.push(index);
        }
    }
}

impl fmt::Display for MinHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_values(self.slots.iter().map(|n| n.value), ", "))
    }
}

/// 堆的树形视图
#[derive(Debug, Clone, Copy)]
pub struct HeapSlot<'a> {
    heap: &'a MinHeap,
    index: usize,
}

impl HeapSlot<'_> {
    pub fn index(&self) -> usize {
        self.index
    }

    fn child(&self, index: usize) -> Option<Self> {
        (index < self.heap.slots.len()).then_some(HeapSlot {
            heap: self.heap,
            index,
        })
    }
}

impl TreeView for HeapSlot<'_> {
    fn node(&self) -> NodeRef {
        self.heap.slots[self.index]
    }

    fn left(&self) -> Option<Self> {
        self.child(2 * self.index + 1)
    }

    fn right(&self) -> Option<Self> {
        self.child(2 * self.index + 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(values: &[i32]) -> MinHeap {
        let mut heap = MinHeap::new();
        for &v in values {
            heap.insert(v);
        }
        heap
    }

    fn values(heap: &MinHeap) -> Vec<i32> {
        heap.nodes().iter().map(|n| n.value).collect()
    }

    fn assert_heap_order(heap: &MinHeap) {
        let slots = heap.nodes();
        for i in 1..slots.len() {
            assert!(slots[(i - 1) / 2].value <= slots[i].value, "槽位 {} 违反堆序", i);
        }
    }

    #[test]
    fn test_insert_sift_up() {
        let mut heap = build(&[5, 8, 9]);
        let outcome = heap.insert(1);

        // 从槽位 3 上浮到 1，再到 0
        assert!(matches!(
            outcome,
            Outcome::HeapInserted { ref sift, node } if sift == &vec![3, 1, 0] && node.value == 1
        ));
        assert_eq!(values(&heap), vec![1, 5, 9, 8]);
    }

    #[test]
    fn test_insert_without_move() {
        let mut heap = build(&[1]);
        let outcome = heap.insert(4);
        assert!(matches!(outcome, Outcome::HeapInserted { ref sift, .. } if sift == &vec![1]));
    }

    #[test]
    fn test_extract_min() {
        let mut heap = build(&[3, 1, 6, 5, 2, 4]);
        assert_eq!(values(&heap), vec![1, 2, 4, 5, 3, 6]);

        let outcome = heap.extract_min();
        assert!(matches!(
            outcome,
            Outcome::HeapRemoved { ref sift, removed } if sift == &vec![0, 1, 4] && removed.value == 1
        ));
        assert_eq!(values(&heap), vec![2, 3, 4, 5, 6]);

        let mut drained = Vec::new();
        while let Outcome::HeapRemoved { removed, .. } = heap.extract_min() {
            drained.push(removed.value);
        }
        assert_eq!(drained, vec![2, 3, 4, 5, 6]);
        assert!(matches!(heap.extract_min(), Outcome::Empty));
    }

    #[test]
    fn test_remove_arbitrary() {
        let mut heap = build(&[1, 10, 2, 11, 12, 3]);
        let outcome = heap.remove(12);
        assert!(matches!(outcome, Outcome::HeapRemoved { removed, .. } if removed.value == 12));
        assert_heap_order(&heap);
        assert_eq!(heap.len(), 5);

        // 末尾元素移入后需要上浮
        let mut heap = build(&[1, 10, 2, 11, 12, 3, 4]);
        heap.remove(11);
        assert_heap_order(&heap);
        assert!(heap.contains(4));

        assert!(matches!(heap.remove(99), Outcome::NotFound { ref path } if path.is_empty()));
    }

    #[test]
    fn test_remove_last_slot() {
        let mut heap = build(&[1, 2]);
        let outcome = heap.remove(2);
        assert!(matches!(outcome, Outcome::HeapRemoved { ref sift, .. } if sift == &vec![1]));
        assert_eq!(values(&heap), vec![1]);
    }

    #[test]
    fn test_duplicates_allowed() {
        let heap = build(&[2, 2, 2]);
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.to_string(), "[ 2, 2, 2 ]");
    }

    #[test]
    fn test_search_is_linear() {
        let heap = build(&[1, 3, 2]);
        let outcome = heap.search(2);
        let path: Vec<i32> = outcome.path().iter().map(|n| n.value).collect();
        assert_eq!(path, vec![1, 3, 2]);
        assert!(matches!(heap.search(7), Outcome::NotFound { ref path } if path.len() == 3));
    }

    #[test]
    fn test_peek_and_tree_view() {
        let heap = build(&[4, 2, 7]);
        assert!(matches!(heap.peek_min(), Outcome::Peeked { node } if node.value == 2));
        assert!(matches!(MinHeap::new().peek_min(), Outcome::Empty));

        let root = heap.tree().unwrap();
        assert_eq!(root.index(), 0);
        assert_eq!(root.left().map(|s| s.node().value), Some(4));
        assert_eq!(root.right().map(|s| s.node().value), Some(7));
        assert!(root.left().unwrap().left().is_none());
        assert_eq!(root.edges().len(), 2);
        assert!(MinHeap::new().tree().is_none());
    }
}
