//! 类别过滤
//!
//! 判断某个类别在给定范围（一门学科 / 一位教师）内是否需要展示。
//! 纯函数，按渲染上下文重新计算，不做缓存。

use crate::models::{Category, Test};
use crate::views::Scope;

/// 范围内至少有一份试卷属于该类别时返回 true
pub fn include_category(category: &Category, scope: &Scope<'_>) -> bool {
    scope.tests().any(|test: &Test| test.category_id == category.id)
}

/// 过滤出需要展示的类别，保持全局类别顺序；没有试卷的类别整体省略
pub fn visible_categories<'c>(categories: &'c [Category], scope: &Scope<'_>) -> Vec<&'c Category> {
    categories
        .iter()
        .filter(|category| include_category(category, scope))
        .collect()
}
