//! Integration tests against a local fake of the search API

#![cfg(feature = "http")]

use pixgallery::{
    ControllerState, Error, GallerySession, HttpSource, NoticeLevel, Outcome, RecordingNotifier,
    SearchConfig,
};
use scraper::{Html, Selector};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tiny_http::{Header, Response, Server};

const API_KEY: &str = "test-key";

fn hit_json(i: u64) -> serde_json::Value {
    serde_json::json!({
        "id": i,
        "webformatURL": format!("http://img.test/{}_640.jpg", i),
        "largeImageURL": format!("http://img.test/{}_1280.jpg", i),
        "tags": format!("tag{}", i),
        "likes": i,
        "views": i * 100,
        "comments": 1,
        "downloads": i * 2
    })
}

/// Serves `cats` with 45 hits and everything else with none. Returns the
/// address and a counter of requests received.
fn start_fake_api() -> (SocketAddr, Arc<AtomicUsize>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let requests = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&requests);

    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            counter.fetch_add(1, Ordering::SeqCst);
            let url = url::Url::parse(&format!("http://localhost{}", request.url())).unwrap();
            let param = |name: &str| {
                url.query_pairs()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| v.into_owned())
                    .unwrap_or_default()
            };

            if param("key") != API_KEY {
                let _ = request.respond(
                    Response::from_string("[ERROR 400] Invalid or missing API key").with_status_code(400),
                );
                continue;
            }

            let total: u64 = if param("q") == "cats" { 45 } else { 0 };
            let page: u64 = param("page").parse().unwrap_or(1);
            let per_page: u64 = param("per_page").parse().unwrap_or(20);
            let start = (page - 1) * per_page;
            let hits: Vec<_> = (start + 1..=total.min(start + per_page)).map(hit_json).collect();

            let body = serde_json::json!({ "total": total, "totalHits": total, "hits": hits });
            let response = Response::from_string(body.to_string())
                .with_header("Content-Type: application/json".parse::<Header>().unwrap());
            let _ = request.respond(response);
        }
    });

    (addr, requests)
}

fn session_for(
    addr: SocketAddr,
    api_key: &str,
) -> (GallerySession<HttpSource, Arc<RecordingNotifier>>, Arc<RecordingNotifier>) {
    let config = SearchConfig {
        endpoint: format!("http://{}/api/", addr),
        api_key: api_key.to_string(),
        timeout_ms: 5000,
        ..Default::default()
    };
    let source = pixgallery::new_source(&config).expect("Failed to create source");
    let notifier = Arc::new(RecordingNotifier::new());
    (
        GallerySession::new(source, Arc::clone(&notifier), &config),
        notifier,
    )
}

fn count_cards(html: &str) -> usize {
    let doc = Html::parse_document(html);
    let sel = Selector::parse(".gallery .photo-card").unwrap();
    doc.select(&sel).count()
}

fn load_more_hidden(html: &str) -> bool {
    let doc = Html::parse_document(html);
    let sel = Selector::parse("button.load-more.visually-hidden").unwrap();
    doc.select(&sel).next().is_some()
}

#[tokio::test]
async fn test_cats_pages_through_to_the_end() {
    let (addr, requests) = start_fake_api();
    let (session, notifier) = session_for(addr, API_KEY);

    let outcome = session.submit("cats").await.expect("submit");
    assert_eq!(
        outcome,
        Outcome::Rendered {
            added: 40,
            total_rendered: 40,
            more: true
        }
    );
    let html = session.render_page().await;
    assert_eq!(count_cards(&html), 40);
    assert!(!load_more_hidden(&html));

    let outcome = session.load_more().await.expect("load more");
    assert_eq!(
        outcome,
        Outcome::Rendered {
            added: 5,
            total_rendered: 45,
            more: false
        }
    );
    let html = session.render_page().await;
    assert_eq!(count_cards(&html), 45);
    assert!(load_more_hidden(&html));

    let messages: Vec<String> = notifier.notices().into_iter().map(|n| n.message).collect();
    assert_eq!(
        messages,
        vec![
            "Hooray! We found 45 images.".to_string(),
            "We're sorry, but you've reached the end of search results.".to_string(),
        ]
    );

    // Exhausted: no further request goes out
    assert_eq!(session.load_more().await.unwrap(), Outcome::Ignored);
    assert_eq!(requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_no_results_shows_failure() {
    let (addr, _) = start_fake_api();
    let (session, notifier) = session_for(addr, API_KEY);

    assert_eq!(session.submit("zzzqqq").await.unwrap(), Outcome::NoResults);

    let snap = session.snapshot().await;
    assert_eq!(snap.state, ControllerState::IdleEmpty);
    assert_eq!(snap.cards, 0);
    assert!(!snap.load_more_visible);

    let last = notifier.last().unwrap();
    assert_eq!(last.level, NoticeLevel::Failure);
    assert!(load_more_hidden(&session.render_page().await));
}

#[tokio::test]
async fn test_blank_query_sends_no_request() {
    let (addr, requests) = start_fake_api();
    let (session, notifier) = session_for(addr, API_KEY);

    session.submit("cats").await.unwrap();
    assert_eq!(session.submit("    ").await.unwrap(), Outcome::Rejected);

    assert_eq!(requests.load(Ordering::SeqCst), 1);
    assert_eq!(session.snapshot().await.cards, 40);
    assert_eq!(notifier.last().unwrap().message, "Search input is empty");
}

#[tokio::test]
async fn test_rejected_key_surfaces_http_error() {
    let (addr, _) = start_fake_api();
    let (session, _) = session_for(addr, "wrong-key");

    match session.submit("cats").await {
        Err(Error::Http { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("API key"));
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
    assert_eq!(session.snapshot().await.state, ControllerState::IdleEmpty);
}

#[tokio::test]
async fn test_cards_link_large_images() {
    let (addr, _) = start_fake_api();
    let (session, _) = session_for(addr, API_KEY);
    session.submit("cats").await.unwrap();

    let html = session.render_page().await;
    let doc = Html::parse_document(&html);
    let link = Selector::parse(".photo-card a.gallery__link").unwrap();
    let img = Selector::parse(".photo-card img.gallery__image").unwrap();

    let first_link = doc.select(&link).next().unwrap();
    assert_eq!(first_link.value().attr("href"), Some("http://img.test/1_1280.jpg"));
    let first_img = doc.select(&img).next().unwrap();
    assert_eq!(first_img.value().attr("src"), Some("http://img.test/1_640.jpg"));
    assert_eq!(first_img.value().attr("alt"), Some("tag1"));
    assert_eq!(first_img.value().attr("loading"), Some("lazy"));

    let stats = Selector::parse(".photo-card .info-item b").unwrap();
    let labels: Vec<String> = doc
        .select(&stats)
        .take(4)
        .map(|b| b.text().collect::<String>())
        .collect();
    assert_eq!(labels, vec!["Likes: 1", "Views: 100", "Comments: 1", "Downloads: 2"]);
}
