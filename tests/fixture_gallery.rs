//! Offline gallery runs from a saved API response

use pixgallery::{GallerySession, Outcome, RecordingNotifier, SearchConfig, StaticSource};
use std::path::PathBuf;

fn write_fixture(name: &str, hits: usize) -> PathBuf {
    let hits: Vec<_> = (1..=hits)
        .map(|i| {
            serde_json::json!({
                "webformatURL": format!("https://cdn.test/{}_640.jpg", i),
                "largeImageURL": format!("https://cdn.test/{}_1280.jpg", i),
                "tags": "mountain, lake",
                "likes": i,
                "views": 10,
                "comments": 0,
                "downloads": 3
            })
        })
        .collect();
    let body = serde_json::json!({ "total": hits.len(), "totalHits": hits.len(), "hits": hits });

    let mut path = std::env::temp_dir();
    path.push(format!("pixgallery-{}-{}.json", name, std::process::id()));
    std::fs::write(&path, body.to_string()).expect("write fixture");
    path
}

#[tokio::test]
async fn fixture_pages_like_the_api() {
    let path = write_fixture("pages", 25);
    let source = StaticSource::from_json_file(&path).expect("load fixture");
    let config = SearchConfig {
        per_page: 10,
        ..Default::default()
    };
    let session = GallerySession::new(source, RecordingNotifier::new(), &config);

    let mut pages = 1;
    let mut outcome = session.submit("lakes").await.unwrap();
    while let Outcome::Rendered { more: true, .. } = outcome {
        outcome = session.load_more().await.unwrap();
        pages += 1;
    }

    assert_eq!(pages, 3);
    assert_eq!(
        outcome,
        Outcome::Rendered {
            added: 5,
            total_rendered: 25,
            more: false
        }
    );
    let snap = session.snapshot().await;
    assert_eq!(snap.hits_seen, 25);
    assert!(!snap.load_more_visible);

    let _ = std::fs::remove_file(path);
}

#[test]
fn missing_fixture_is_io_error() {
    let err = StaticSource::from_json_file("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, pixgallery::Error::Io(_)));
}

#[test]
fn malformed_fixture_is_decode_error() {
    let mut path = std::env::temp_dir();
    path.push(format!("pixgallery-bad-{}.json", std::process::id()));
    std::fs::write(&path, "{\"hits\": 12}").unwrap();

    let err = StaticSource::from_json_file(&path).unwrap_err();
    assert!(matches!(err, pixgallery::Error::Decode(_)));
    let _ = std::fs::remove_file(path);
}
