//! 跨域中间件
//!
//! 允许的来源和请求头来自配置，浏览器客户端依赖预检放行
//! authorization / x-client-info / apikey / content-type 四个头。

use actix_cors::Cors;

use crate::config::CorsConfig;

pub fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allow_any_method()
        .allowed_headers(config.allowed_headers.iter().map(|h| h.as_str()))
        .max_age(config.max_age);

    // "*" 表示放开全部来源，否则逐个白名单
    if config.allowed_origins.iter().any(|origin| origin == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
