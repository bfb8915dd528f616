use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum AbbrError {
    Validation(String),
    Unauthorized(String),
    NotFound(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Serialization(String),
    FileOperation(String),
}

impl AbbrError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            AbbrError::Validation(_) => "E001",
            AbbrError::Unauthorized(_) => "E002",
            AbbrError::NotFound(_) => "E003",
            AbbrError::DatabaseConfig(_) => "E004",
            AbbrError::DatabaseConnection(_) => "E005",
            AbbrError::DatabaseOperation(_) => "E006",
            AbbrError::Serialization(_) => "E007",
            AbbrError::FileOperation(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            AbbrError::Validation(_) => "Validation Error",
            AbbrError::Unauthorized(_) => "Unauthorized",
            AbbrError::NotFound(_) => "Resource Not Found",
            AbbrError::DatabaseConfig(_) => "Database Configuration Error",
            AbbrError::DatabaseConnection(_) => "Database Connection Error",
            AbbrError::DatabaseOperation(_) => "Database Operation Error",
            AbbrError::Serialization(_) => "Serialization Error",
            AbbrError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            AbbrError::Validation(msg)
            | AbbrError::Unauthorized(msg)
            | AbbrError::NotFound(msg)
            | AbbrError::DatabaseConfig(msg)
            | AbbrError::DatabaseConnection(msg)
            | AbbrError::DatabaseOperation(msg)
            | AbbrError::Serialization(msg)
            | AbbrError::FileOperation(msg) => msg,
        }
    }

    /// 存储层故障（连接失败、执行失败、配置错误）
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            AbbrError::DatabaseConfig(_)
                | AbbrError::DatabaseConnection(_)
                | AbbrError::DatabaseOperation(_)
        )
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            AbbrError::Validation(_) => StatusCode::BAD_REQUEST,
            AbbrError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AbbrError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对外暴露的错误信息
    ///
    /// 存储层和内部错误只返回笼统的描述，细节留在日志里。
    pub fn public_message(&self) -> &str {
        if self.is_store_error() {
            "Database error"
        } else {
            match self {
                AbbrError::Serialization(_) | AbbrError::FileOperation(_) => {
                    "Internal server error"
                }
                _ => self.message(),
            }
        }
    }

    /// 格式化为彩色输出（用于 Server 启动失败）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AbbrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AbbrError {}

// 便捷的构造函数
impl AbbrError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        AbbrError::Validation(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        AbbrError::Unauthorized(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        AbbrError::NotFound(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        AbbrError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        AbbrError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        AbbrError::DatabaseOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        AbbrError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        AbbrError::FileOperation(msg.into())
    }
}

impl From<sea_orm::DbErr> for AbbrError {
    fn from(err: sea_orm::DbErr) -> Self {
        AbbrError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for AbbrError {
    fn from(err: std::io::Error) -> Self {
        AbbrError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AbbrError {
    fn from(err: serde_json::Error) -> Self {
        AbbrError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AbbrError>;
