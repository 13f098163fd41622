#![allow(dead_code)]

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wuxia_news::models::Config;

pub const LIST_PREFIX: &str = "/webplat/info/news_version3/5012/5013/5014/m3485/list_";

/// Config pointing the provider at a mock server.
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.provider.base_url = server.uri();
    config.crawler.timeout_secs = 5;
    config
}

pub struct Row<'a> {
    pub href: &'a str,
    pub title: &'a str,
    pub tag: &'a str,
    pub time: Option<&'a str>,
}

pub fn row<'a>(href: &'a str, title: &'a str, tag: &'a str, time: &'a str) -> Row<'a> {
    Row {
        href,
        title,
        tag,
        time: Some(time),
    }
}

pub fn listing_html(rows: &[Row]) -> String {
    let items: String = rows
        .iter()
        .map(|r| {
            let time = r
                .time
                .map(|t| format!(r#"<span class="cltime">{t}</span>"#))
                .unwrap_or_default();
            format!(
                r#"<li><a class="cltag">{}</a><a class="cltit" href="{}">{}</a>{}</li>"#,
                r.tag, r.href, r.title, time
            )
        })
        .collect();
    format!(r#"<html><body><ul class="newslists">{items}</ul></body></html>"#)
}

pub fn detail_html(header: &str, body: &str) -> String {
    format!(
        r#"<html><body><div class="newsconcent details"><div class="ahd"><h3>{header}</h3></div><div class="artws"><p>{body}</p></div></div></body></html>"#
    )
}

pub fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

pub async fn mount_listing(server: &MockServer, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("{LIST_PREFIX}{page}.shtml")))
        .respond_with(html(body))
        .mount(server)
        .await;
}

pub async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}
