/// 试卷库 HTTP 客户端
///
/// 封装所有与试卷库 API 相关的调用逻辑
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::clients::ExamApi;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::wire::{
    CategoriesEnvelope, DisciplinesEnvelope, SignInResponse, TeachersEnvelope, TestsEnvelope,
};
use crate::models::{
    Category, DisciplineId, DisciplineListItem, NewTest, RawTeacherDiscipline, RawTest, Session,
    TeacherLink, TermTests, TestId, UserData,
};

/// 试卷库 API 客户端
pub struct ExamClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExamClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::transport("client-builder", e))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// 构建请求，带会话时附加 Bearer 头
    fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header(reqwest::header::ACCEPT, "application/json, text/plain, */*");

        match session {
            Some(session) => builder.header(reqwest::header::AUTHORIZATION, session.bearer()),
            None => builder,
        }
    }

    /// 发送请求并返回原始响应体
    ///
    /// 非 2xx 状态转换为 `AppError::Api`，响应体原样作为消息。
    async fn send_raw(&self, endpoint: &str, request: RequestBuilder) -> AppResult<String> {
        debug!("请求 {}", endpoint);

        let response = request.send().await.map_err(|e| {
            warn!("请求未得到响应 ({}): {}", endpoint, e);
            AppError::transport(endpoint, e)
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::transport(endpoint, e))?;

        if !status.is_success() {
            warn!("接口返回错误 ({}): status={}", endpoint, status);
            return Err(AppError::api(
                endpoint,
                status.as_u16(),
                Some(extract_message(&body)),
            ));
        }

        debug!("响应 {} ({} 字节)", endpoint, body.len());
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> AppResult<T> {
        let body = self.send_raw(endpoint, request).await?;
        decode(endpoint, &body)
    }
}

#[async_trait]
impl ExamApi for ExamClient {
    async fn sign_up(&self, user: &UserData) -> AppResult<()> {
        let request = self.request(Method::POST, "sign-up", None).json(user);
        self.send_raw("POST /sign-up", request).await?;
        Ok(())
    }

    async fn sign_in(&self, user: &UserData) -> AppResult<Session> {
        let request = self.request(Method::POST, "sign-in", None).json(user);
        let response: SignInResponse = self.send_json("POST /sign-in", request).await?;
        Ok(Session::new(response.token))
    }

    async fn get_tests_by_discipline(&self, session: &Session) -> AppResult<Vec<TermTests>> {
        let request = self
            .request(Method::GET, "tests", Some(session))
            .query(&[("groupBy", "disciplines")]);
        let envelope: TestsEnvelope<TermTests> = self
            .send_json("GET /tests?groupBy=disciplines", request)
            .await?;
        Ok(envelope.tests)
    }

    async fn get_tests_by_teacher(
        &self,
        session: &Session,
    ) -> AppResult<Vec<RawTeacherDiscipline>> {
        let request = self
            .request(Method::GET, "tests", Some(session))
            .query(&[("groupBy", "teachers")]);
        let envelope: TestsEnvelope<RawTeacherDiscipline> = self
            .send_json("GET /tests?groupBy=teachers", request)
            .await?;
        Ok(envelope.tests)
    }

    async fn get_categories(&self, session: &Session) -> AppResult<Vec<Category>> {
        let request = self.request(Method::GET, "categories", Some(session));
        let envelope: CategoriesEnvelope = self.send_json("GET /categories", request).await?;
        Ok(envelope.categories)
    }

    async fn get_disciplines(&self, session: &Session) -> AppResult<Vec<DisciplineListItem>> {
        let request = self.request(Method::GET, "disciplines", Some(session));
        let envelope: DisciplinesEnvelope = self.send_json("GET /disciplines", request).await?;
        Ok(envelope.disciplines)
    }

    async fn get_teachers_by_discipline(
        &self,
        session: &Session,
        discipline_id: DisciplineId,
    ) -> AppResult<Vec<TeacherLink>> {
        let path = format!("teachers/{}", discipline_id);
        let request = self.request(Method::GET, &path, Some(session));
        let envelope: TeachersEnvelope = self
            .send_json(&format!("GET /{}", path), request)
            .await?;
        Ok(envelope.teachers)
    }

    async fn add_test(&self, session: &Session, test: &NewTest) -> AppResult<RawTest> {
        let request = self.request(Method::POST, "tests", Some(session)).json(test);
        self.send_json("POST /tests", request).await
    }

    async fn get_test(&self, session: &Session, test_id: TestId) -> AppResult<RawTest> {
        let path = format!("tests/{}", test_id);
        let request = self.request(Method::GET, &path, Some(session));
        self.send_json(&format!("GET /{}", path), request).await
    }
}

// ========== 辅助函数 ==========

/// 解析响应体
fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> AppResult<T> {
    serde_json::from_str(body).map_err(|source| AppError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// 提取错误消息：JSON 字符串去掉引号，其余原样返回
fn extract_message(body: &str) -> String {
    match serde_json::from_str::<String>(body) {
        Ok(message) => message,
        Err(_) => body.trim().to_string(),
    }
}
