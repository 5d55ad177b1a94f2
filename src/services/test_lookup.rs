//! 试卷查找服务
//!
//! 搜索框选中条目后，按 id 查询单份试卷，拿到 pdfUrl 后整页跳转离开应用。

use tracing::info;

use crate::clients::ExamApi;
use crate::error::AppResult;
use crate::models::Session;
use crate::search::SearchEntry;
use crate::workflow::Notice;

/// 跳转目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// 离开应用，打开外部地址（当前页面状态就此结束）
    External(String),
}

/// 试卷查找服务
pub struct TestLookup<'a, A: ExamApi + ?Sized> {
    api: &'a A,
    session: &'a Session,
}

impl<'a, A: ExamApi + ?Sized> TestLookup<'a, A> {
    pub fn new(api: &'a A, session: &'a Session) -> Self {
        Self { api, session }
    }

    /// 解析条目对应的跳转地址
    pub async fn resolve(&self, entry: &SearchEntry) -> AppResult<Navigation> {
        let test = self.api.get_test(self.session, entry.id).await?;
        info!("🔗 {} → {}", entry.label, test.pdf_url);
        Ok(Navigation::External(test.pdf_url))
    }

    /// 选中条目：失败时转换为提示
    pub async fn open(&self, entry: &SearchEntry) -> Result<Navigation, Notice> {
        self.resolve(entry)
            .await
            .map_err(|e| Notice::from_error(&e))
    }
}
