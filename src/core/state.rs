use std::sync::Arc;

use crate::core::Config;
use crate::db::{DataStore, GatewayError};

/// 服务器状态 - 持有配置和数据存储的共享引用
///
/// 使用 Arc 实现浅拷贝，每个请求处理器克隆一份。
/// 所有集合都在 [`DataStore`] 的同一把锁后面，
/// 读-改-写序列因此天然串行。
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 内存集合 + JSON 快照持久化
    pub store: Arc<DataStore>,
}

impl ServerState {
    /// 加载三个集合并完成管理员种子账号检查
    pub fn initialize(config: &Config) -> Result<Self, GatewayError> {
        let store = DataStore::open(config)?;
        Ok(Self {
            config: config.clone(),
            store,
        })
    }
}
