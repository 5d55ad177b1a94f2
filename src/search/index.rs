//! 搜索索引
//!
//! 把当前视图中的试卷展开为 (标签, 试卷 id) 列表，供搜索框模糊查找。
//! 不去重：同名试卷在不同教师/学科下各自对应一条记录。

use serde::{Deserialize, Serialize};

use crate::models::TestId;

/// 搜索条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub label: String,
    pub id: TestId,
}

/// 搜索索引
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
}

impl SearchIndex {
    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 模糊查找：忽略大小写，查询中每个词都要出现在标签里
    ///
    /// 空查询返回全部条目。
    pub fn search(&self, query: &str) -> Vec<&SearchEntry> {
        let tokens: Vec<String> = query
            .split_whitespace()
            .map(|token| token.to_lowercase())
            .collect();

        self.entries
            .iter()
            .filter(|entry| {
                let label = entry.label.to_lowercase();
                tokens.iter().all(|token| label.contains(token.as_str()))
            })
            .collect()
    }
}

/// 搜索索引构建器
#[derive(Debug, Default)]
pub struct SearchIndexBuilder {
    entries: Vec<SearchEntry>,
}

impl SearchIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: String, id: TestId) {
        self.entries.push(SearchEntry { label, id });
    }

    pub fn finish(self) -> SearchIndex {
        SearchIndex {
            entries: self.entries,
        }
    }
}

/// 按学科视图的标签：`学科 - 类别 - 试卷 - (教师)`
pub fn discipline_label(discipline: &str, category: &str, test: &str, teacher: &str) -> String {
    format!("{} - {} - {} - ({})", discipline, category, test, teacher)
}

/// 按教师视图的标签：`教师 - 类别 - 试卷`
pub fn teacher_label(teacher: &str, category: &str, test: &str) -> String {
    format!("{} - {} - {}", teacher, category, test)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> SearchIndex {
        let mut builder = SearchIndexBuilder::new();
        builder.push(discipline_label("Calculus", "P1", "Midterm", "Ana"), 10);
        builder.push(discipline_label("Calculus", "P2", "Midterm", "Bruno"), 11);
        builder.push(teacher_label("Carla", "P1", "Final"), 12);
        builder.finish()
    }

    #[test]
    fn labels_follow_view_formats() {
        assert_eq!(
            discipline_label("Calculus", "P1", "Midterm", "Ana"),
            "Calculus - P1 - Midterm - (Ana)"
        );
        assert_eq!(teacher_label("Ana", "P1", "Midterm"), "Ana - P1 - Midterm");
    }

    #[test]
    fn same_name_tests_keep_separate_entries() {
        let index = index();
        let ids: Vec<i64> = index.search("midterm").iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![10, 11]);
    }

    #[test]
    fn every_token_must_match() {
        let index = index();
        let hits = index.search("calc  BRUNO");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 11);
        assert!(index.search("calculus carla").is_empty());
    }

    #[test]
    fn blank_query_returns_everything() {
        assert_eq!(index().search("   ").len(), 3);
    }
}
