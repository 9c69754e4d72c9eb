//! 运行时配置
//!
//! 后端地址不再硬编码在各个组件中，而是按以下优先级解析：
//! 1. `index.html` 中的 `<meta name="tenant-manager-api-base" content="...">`
//! 2. 构建时环境变量 `TENANT_MANAGER_API_BASE`
//! 3. 默认值 `http://localhost:8080`

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";
pub const API_BASE_META_NAME: &str = "tenant-manager-api-base";

/// 构建时注入的后端地址
const BUILD_API_BASE: Option<&str> = option_env!("TENANT_MANAGER_API_BASE");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl AppConfig {
    /// 从页面与构建环境加载配置
    pub fn load() -> Self {
        Self::resolve(read_meta(API_BASE_META_NAME).as_deref(), BUILD_API_BASE)
    }

    /// 纯函数形式的解析逻辑：空白值视为未设置，去掉末尾的 `/`
    pub fn resolve(meta: Option<&str>, build: Option<&str>) -> Self {
        let api_base_url = [meta, build]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();
        Self { api_base_url }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

/// 读取 `<meta name=...>` 的 content
fn read_meta(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let selector = format!("meta[name=\"{}\"]", name);
    document
        .query_selector(&selector)
        .ok()??
        .get_attribute("content")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_overrides_build_time_value() {
        let cfg = AppConfig::resolve(Some("https://api.example.com/"), Some("http://build:9000"));
        assert_eq!(cfg.api_base_url, "https://api.example.com");
    }

    #[test]
    fn blank_values_are_skipped() {
        let cfg = AppConfig::resolve(Some("   "), Some("http://build:9000"));
        assert_eq!(cfg.api_base_url, "http://build:9000");
        assert_eq!(AppConfig::resolve(None, Some("")).api_base_url, DEFAULT_API_BASE);
    }

    /// 取出页面模板中指定 meta 标签的 content
    fn shipped_meta(html: &str, name: &str) -> Option<String> {
        let tag_start = html.find(&format!("name=\"{}\"", name))?;
        let tag = &html[tag_start..];
        let tag = &tag[..tag.find('>')?];
        let content = &tag[tag.find("content=\"")? + "content=\"".len()..];
        Some(content[..content.find('"')?].to_string())
    }

    #[test]
    fn shipped_page_defers_to_build_time_value() {
        let html = include_str!("../index.html");
        let meta = shipped_meta(html, API_BASE_META_NAME).expect("index.html carries the api base meta tag");

        let cfg = AppConfig::resolve(Some(&meta), Some("https://prod.example.com"));
        assert_eq!(cfg.api_base_url, "https://prod.example.com");
    }
}
