use std::path::PathBuf;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | . | 工作目录（数据、图片、前端页面） |
/// | PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | 无 | 日志文件目录（省略则只输出到终端） |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/pharmacy PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录：`data/` 存放集合快照，`Images/` 存放上传图片，
    /// 前端页面直接放在根下
    pub work_dir: PathBuf,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,
    /// 日志目录 (可选)
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            http_port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Collection snapshot directory
    pub fn data_dir(&self) -> PathBuf {
        self.work_dir.join("data")
    }

    /// Uploaded medicine image directory
    pub fn images_dir(&self) -> PathBuf {
        self.work_dir.join("Images")
    }

    /// Front-end page directory
    pub fn pages_dir(&self) -> PathBuf {
        self.work_dir.clone()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            http_port: 3000,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}
