use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::models::UserCreate;
use crate::db::repository::UserRepository;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是后端的核心数据结构，作为 axum 的应用状态在所有
/// 处理器之间共享。使用 Arc / 连接池实现浅拷贝，克隆成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库服务
    pub db: DbService,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 创建工作目录、打开数据库 (执行迁移)、构建 JWT 服务，
    /// 并按需创建初始超级用户。
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let db = DbService::new(&config.db_path()).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let state = Self {
            config: config.clone(),
            db,
            jwt_service,
        };

        state.ensure_first_superuser().await?;

        Ok(state)
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 幂等创建初始超级用户 (FIRST_SUPERUSER / FIRST_SUPERUSER_PASSWORD)
    async fn ensure_first_superuser(&self) -> anyhow::Result<()> {
        let (Some(email), Some(password)) = (
            self.config.first_superuser.clone(),
            self.config.first_superuser_password.clone(),
        ) else {
            return Ok(());
        };

        let repo = UserRepository::new(self.db.pool.clone());
        if repo
            .find_by_email(&email)
            .await
            .map_err(|e| anyhow::anyhow!("superuser lookup failed: {e}"))?
            .is_some()
        {
            return Ok(());
        }

        let user = repo
            .create(UserCreate {
                email,
                password,
                full_name: None,
                is_active: true,
                is_superuser: true,
            })
            .await
            .map_err(|e| anyhow::anyhow!("superuser creation failed: {e}"))?;

        tracing::info!(user_id = %user.id, email = %user.email, "First superuser created");
        Ok(())
    }
}
