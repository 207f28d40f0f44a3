//! API 路由模块
//!
//! # 结构
//!
//! - [`auth`] - 注册、登录、批量清除账号
//! - [`medicines`] - 药品目录管理接口
//! - [`orders`] - 订单与配送协商接口
//! - [`notifications`] - 通知确认接口
//! - [`images`] - 上传图片访问
//! - [`health`] - 健康检查
//! - [`pages`] - 前端页面兜底路由

pub mod auth;
pub mod health;
pub mod images;
pub mod medicines;
pub mod notifications;
pub mod orders;
pub mod pages;

use axum::Router;

use crate::core::ServerState;

/// Build the API router; the page fallback catches everything unmatched
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(auth::router())
        .merge(health::router())
        .merge(medicines::router())
        .merge(orders::router())
        .merge(notifications::router())
        .merge(images::router())
        .fallback(pages::fallback)
}
