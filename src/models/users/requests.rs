use super::entities::{UserRole, UserStatus};

// 创建用户（内部使用，password 为已哈希的密码）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub display_name: Option<String>,
}
