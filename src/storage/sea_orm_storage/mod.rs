//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod grading;
mod issues;
mod marks;
mod offerings;
mod users;

#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tests;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{GradelyError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 按指定数据库配置连接并执行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| GradelyError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| GradelyError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| GradelyError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| GradelyError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(GradelyError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::grading::GradeBand;
use crate::models::{
    issues::{entities::Issue, requests::IssueListQuery, responses::IssueListResponse},
    marks::entities::{Mark, UpsertMark},
    offerings::{
        entities::{Assessment, Offering, RosterStudent},
        requests::OfferingListQuery,
        responses::OfferingListResponse,
    },
    users::{entities::User, requests::CreateUserRequest},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 成绩模块
    async fn upsert_mark(&self, mark: UpsertMark) -> Result<Mark> {
        self.upsert_mark_impl(mark).await
    }

    async fn get_mark(&self, assessment_id: i64, student_id: i64) -> Result<Option<Mark>> {
        self.get_mark_impl(assessment_id, student_id).await
    }

    async fn list_marks_by_offering(&self, offering_id: i64) -> Result<Vec<Mark>> {
        self.list_marks_by_offering_impl(offering_id).await
    }

    async fn list_grade_bands(&self) -> Result<Vec<GradeBand>> {
        self.list_grade_bands_impl().await
    }

    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 开课模块
    async fn list_offerings_with_pagination(
        &self,
        query: OfferingListQuery,
    ) -> Result<OfferingListResponse> {
        self.list_offerings_with_pagination_impl(query).await
    }

    async fn get_offering_by_id(&self, offering_id: i64) -> Result<Option<Offering>> {
        self.get_offering_by_id_impl(offering_id).await
    }

    async fn list_offering_students(&self, offering_id: i64) -> Result<Vec<RosterStudent>> {
        self.list_offering_students_impl(offering_id).await
    }

    async fn is_student_enrolled(&self, offering_id: i64, student_id: i64) -> Result<bool> {
        self.is_student_enrolled_impl(offering_id, student_id).await
    }

    async fn list_assessments_by_offering(&self, offering_id: i64) -> Result<Vec<Assessment>> {
        self.list_assessments_by_offering_impl(offering_id).await
    }

    // 问题反馈模块
    async fn list_issues_with_pagination(
        &self,
        offering_id: i64,
        query: IssueListQuery,
    ) -> Result<IssueListResponse> {
        self.list_issues_with_pagination_impl(offering_id, query)
            .await
    }

    async fn get_issue_by_id(&self, issue_id: i64) -> Result<Option<Issue>> {
        self.get_issue_by_id_impl(issue_id).await
    }

    async fn resolve_issue(
        &self,
        issue_id: i64,
        resolver_id: i64,
        response: &str,
    ) -> Result<Option<Issue>> {
        self.resolve_issue_impl(issue_id, resolver_id, response)
            .await
    }
}
