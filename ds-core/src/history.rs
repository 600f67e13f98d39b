//! # History 模块
//!
//! 操作历史，记录每次对数据结构执行的操作及其结果摘要。
//!
//! ## 设计原则
//!
//! - 只记录真正执行了的操作（被拒绝的操作不记录）
//! - 所有数据可序列化
//! - 有上限，超出时丢弃最早的记录

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::input::Action;
use crate::outcome::Outcome;

/// 默认最多记录的条数
pub const DEFAULT_MAX_RECORDS: usize = 1000;

/// 一条操作记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    /// 执行的操作
    pub action: Action,
    /// 结果摘要
    pub summary: String,
    /// 操作是否改变了结构
    pub mutated: bool,
    /// 时间戳（Unix 秒）
    pub timestamp: u64,
}

impl OperationRecord {
    pub fn new(action: Action, outcome: &Outcome) -> Self {
        Self {
            action,
            summary: outcome.summary(),
            mutated: outcome.is_mutation(),
            timestamp: current_timestamp(),
        }
    }
}

/// 历史记录容器
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    records: VecDeque<OperationRecord>,
    max_records: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            records: VecDeque::new(),
            max_records: DEFAULT_MAX_RECORDS,
        }
    }

    /// 设置最大记录数
    pub fn with_max_records(mut self, max: usize) -> Self {
        self.max_records = max;
        self.truncate();
        self
    }

    /// 记录一次操作
    pub fn record(&mut self, action: Action, outcome: &Outcome) {
        self.push(OperationRecord::new(action, outcome));
    }

    pub fn push(&mut self, record: OperationRecord) {
        self.records.push_back(record);
        self.truncate();
    }

    pub fn records(&self) -> impl Iterator<Item = &OperationRecord> {
        self.records.iter()
    }

    /// 改变过结构的操作数量
    pub fn mutation_count(&self) -> usize {
        self.records.iter().filter(|r| r.mutated).count()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn truncate(&mut self) {
        while self.records.len() > self.max_records {
            self.records.pop_front();
        }
    }
}

/// 获取当前时间戳（Unix 秒）
fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bst::Bst;

    #[test]
    fn test_history_basic() {
        let mut tree = Bst::new();
        let mut history = History::new();
        assert!(history.is_empty());

        history.record(Action::Insert(5), &tree.insert(5));
        history.record(Action::Insert(5), &tree.insert(5));
        history.record(Action::Search(5), &tree.search(5));

        assert_eq!(history.len(), 3);
        assert_eq!(history.mutation_count(), 1);
        let summaries: Vec<&str> = history.records().map(|r| r.summary.as_str()).collect();
        assert_eq!(summaries, vec!["inserted 5", "duplicate 5", "found 5"]);
    }

    #[test]
    fn test_history_max_records() {
        let mut history = History::new().with_max_records(5);
        for i in 0..10 {
            history.record(Action::Push(i), &Outcome::Empty);
        }

        assert_eq!(history.len(), 5);
        // 保留最后 5 条
        assert_eq!(history.records().next().map(|r| r.action), Some(Action::Push(5)));
    }

    #[test]
    fn test_history_serialization() {
        let mut history = History::new();
        history.record(Action::Clear, &Outcome::Cleared { removed: Vec::new() });

        let json = serde_json::to_string(&history).unwrap();
        let loaded: History = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.records().next().map(|r| r.mutated), Some(true));
    }
}
