mod common;

use common::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wuxia_news::error::AppError;
use wuxia_news::models::PageIndex;
use wuxia_news::services::NewsService;

#[tokio::test]
async fn listing_skips_incomplete_rows() {
    let server = MockServer::start().await;
    let mut rows = vec![
        row("/news/1.shtml", "停服维护公告", "公告", "2024-05-05"),
        row("/news/2.shtml", "端午活动", "活动", "2024-05-04"),
        row("/news/3.shtml", "新门派", "新闻", "2024-05-03"),
        row("/news/4.shtml", "版本更新", "公告", "2024-05-02"),
        row("/news/5.shtml", "答疑", "新闻", "2024-05-01"),
    ];
    rows[2].time = None;
    mount_listing(&server, "1", listing_html(&rows)).await;

    let news = NewsService::new(&config_for(&server)).unwrap();
    let stubs = news.fetch_stubs(PageIndex::FIRST).await.unwrap();

    assert_eq!(stubs.len(), 4);
    assert_eq!(stubs[0].title, "停服维护公告");
    assert_eq!(stubs[0].url, format!("{}/news/1.shtml", server.uri()));
    assert_eq!(stubs[2].title, "版本更新");
}

#[tokio::test]
async fn missing_listing_container_is_parse_error() {
    let server = MockServer::start().await;
    mount_listing(&server, "1", "<html><body>maintenance</body></html>".to_string()).await;

    let news = NewsService::new(&config_for(&server)).unwrap();
    let result = news.fetch_stubs(PageIndex::FIRST).await;

    assert!(matches!(result, Err(AppError::Parse { .. })));
}

#[tokio::test]
async fn http_failure_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{LIST_PREFIX}1.shtml")))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let news = NewsService::new(&config_for(&server)).unwrap();
    let result = news.fetch_stubs(PageIndex::FIRST).await;

    assert!(matches!(result, Err(AppError::Fetch { .. })));
}

#[tokio::test]
async fn discovery_reads_next_page_link() {
    let server = MockServer::start().await;
    let pager = format!(
        r#"<html><body><ul class="newslists"></ul>
           <div class="cpages">
             <a href="{LIST_PREFIX}2.shtml">&lt; 上一页</a>
             <a href="{LIST_PREFIX}n42.shtml">下一页 &gt;</a>
           </div></body></html>"#
    );
    mount_listing(&server, "3", pager).await;

    let news = NewsService::new(&config_for(&server)).unwrap();
    let catalog = news.listing().discover().await.unwrap();

    assert_eq!(catalog.total(), 45);
    assert_eq!(catalog.resolve("4").unwrap().to_string(), "n42");
}

#[tokio::test]
async fn discovery_without_pager_is_parse_error() {
    let server = MockServer::start().await;
    mount_listing(&server, "3", listing_html(&[])).await;

    let news = NewsService::new(&config_for(&server)).unwrap();
    let result = news.listing().discover().await;

    assert!(matches!(result, Err(AppError::Parse { .. })));
}

#[tokio::test]
async fn historical_pages_use_prefixed_urls() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        "n7",
        listing_html(&[row("/news/old.shtml", "旧公告", "公告", "2019-01-01")]),
    )
    .await;

    let news = NewsService::new(&config_for(&server)).unwrap();
    let catalog = wuxia_news::models::PageCatalog::with_total(10).unwrap();
    let stubs = news.fetch_stubs(catalog.page(4).unwrap()).await.unwrap();

    assert_eq!(stubs.len(), 1);
    assert_eq!(stubs[0].title, "旧公告");
}

#[tokio::test]
async fn list_recent_walks_current_pages() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        "1",
        listing_html(&[
            row("/news/1.shtml", "一", "公告", "2024-05-05"),
            row("/news/2.shtml", "二", "公告", "2024-05-04"),
        ]),
    )
    .await;
    mount_listing(
        &server,
        "2",
        listing_html(&[
            row("/news/3.shtml", "三", "公告", "2024-05-03"),
            row("/news/4.shtml", "四", "公告", "2024-05-02"),
        ]),
    )
    .await;

    let news = NewsService::new(&config_for(&server)).unwrap();
    let recent = news.list_recent(3).await.unwrap();

    let titles: Vec<_> = recent.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["一", "二", "三"]);
}

#[tokio::test]
async fn fetch_page_tolerates_broken_details() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        "1",
        listing_html(&[
            row("/news/1.shtml", "正常", "公告", "2024-05-05"),
            row("/news/2.shtml", "损坏", "公告", "2024-05-04"),
            row("/news/3.shtml", "失败", "公告", "2024-05-03"),
        ]),
    )
    .await;
    mount_page(&server, "/news/1.shtml", detail_html("正常", "正文内容")).await;
    mount_page(
        &server,
        "/news/2.shtml",
        "<html><body><div class='error'>404</div></body></html>".to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/news/3.shtml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let news = NewsService::new(&config_for(&server)).unwrap();
    let notices = news.fetch_page(PageIndex::FIRST).await.unwrap();

    assert_eq!(notices.len(), 3);
    assert_eq!(notices[0].title, "正常");
    assert!(notices[0].content.contains("正文内容"));
    assert!(notices[1].content.is_empty());
    assert!(notices[2].content.is_empty());
}
