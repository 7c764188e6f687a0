//! End-to-end runs of the pipeline against an in-memory fetcher.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use reddit_media_grabber::{
    discovery::read_candidates, CandidateLink, Error, Fetcher, OutputRoots, Pipeline,
    PipelineOptions, Result,
};

/// Serves fixed bodies by URL and counts requests.
struct StubFetcher {
    bodies: HashMap<String, Vec<u8>>,
    requests: AtomicUsize,
}

impl StubFetcher {
    fn new(bodies: &[(&str, &str)]) -> Self {
        Self {
            bodies: bodies
                .iter()
                .map(|(url, body)| (url.to_string(), body.as_bytes().to_vec()))
                .collect(),
            requests: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.bodies.get(url).cloned().ok_or_else(|| Error::Network {
            url: url.to_string(),
            attempts: 5,
        })
    }
}

fn roots(dir: &Path) -> OutputRoots {
    OutputRoots::new(dir.join("pics/img"), dir.join("pics/video"))
}

fn options(concurrency: usize) -> PipelineOptions {
    PipelineOptions {
        concurrency,
        ..PipelineOptions::default()
    }
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

#[tokio::test]
async fn identical_content_is_written_once() {
    let tmp = tempfile::tempdir().unwrap();
    let roots = roots(tmp.path());
    roots.ensure().unwrap();

    let fetcher = Arc::new(StubFetcher::new(&[
        ("https://i.redd.it/aaa.jpg", "same bytes"),
        ("https://i.redd.it/bbb.jpg", "same bytes"),
    ]));

    let mut pipeline = Pipeline::new(roots, fetcher.clone(), options(2));
    pipeline
        .discover_all(vec![
            CandidateLink::direct("https://i.redd.it/aaa.jpg", "first", "u/one"),
            CandidateLink::direct("https://i.redd.it/bbb.jpg", "second", "u/two"),
        ])
        .await;
    let stats = pipeline.download(None).await;

    assert_eq!(stats.registered, 2);
    assert_eq!(stats.downloaded, 1);
    assert_eq!(stats.skipped_duplicate, 1);
    assert_eq!(stats.failed, 0);
    assert_eq!(fetcher.requests.load(Ordering::SeqCst), 2);

    let written = files_in(&tmp.path().join("pics/img"));
    assert_eq!(written.len(), 1);
    assert!(
        written[0] == "one__aaa__first.jpg" || written[0] == "two__bbb__second.jpg",
        "unexpected file {}",
        written[0]
    );
}

#[tokio::test]
async fn second_run_skips_files_already_on_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let links = vec![
        CandidateLink::direct("https://i.redd.it/aaa.png", "a", "one"),
        CandidateLink::direct("https://i.redd.it/bbb.gif", "b", "one"),
    ];
    let bodies = [
        ("https://i.redd.it/aaa.png", "png bytes"),
        ("https://i.redd.it/bbb.gif", "gif bytes"),
    ];

    let first_roots = roots(tmp.path());
    first_roots.ensure().unwrap();
    let mut first = Pipeline::new(first_roots, Arc::new(StubFetcher::new(&bodies)), options(8));
    first.discover_all(links.clone()).await;
    let stats = first.download(None).await;
    assert_eq!(stats.downloaded, 2);

    let fetcher = Arc::new(StubFetcher::new(&bodies));
    let mut second = Pipeline::new(roots(tmp.path()), fetcher.clone(), options(8));
    second.discover_all(links).await;
    let stats = second.download(None).await;

    assert_eq!(stats.skipped_existing, 2);
    assert_eq!(stats.downloaded, 0);
    assert_eq!(fetcher.requests.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failures_do_not_stop_other_downloads() {
    let tmp = tempfile::tempdir().unwrap();
    let roots = roots(tmp.path());
    roots.ensure().unwrap();

    let fetcher = Arc::new(StubFetcher::new(&[
        ("https://i.redd.it/ok1.jpg", "one"),
        ("https://i.redd.it/ok2.jpg", "two"),
    ]));

    let mut pipeline = Pipeline::new(roots, fetcher, options(3));
    pipeline
        .discover_all(vec![
            CandidateLink::direct("https://i.redd.it/ok1.jpg", "t", "u"),
            CandidateLink::direct("https://i.redd.it/missing.jpg", "t", "u"),
            CandidateLink::direct("https://i.redd.it/ok2.jpg", "t", "u"),
        ])
        .await;
    let stats = pipeline.download(None).await;

    assert_eq!(stats.downloaded, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(files_in(&tmp.path().join("pics/img")).len(), 2);
}

#[tokio::test]
async fn candidates_from_json_lines() {
    let tmp = tempfile::tempdir().unwrap();
    let roots = roots(tmp.path());
    roots.ensure().unwrap();

    let input = r#"{"url": "https://i.redd.it/still.jpg", "title": "Still", "user": "one"}
{"url": "https://i.redd.it/notes.txt", "title": "Notes", "user": "one"}
{"url": "https://i.redd.it/moving.gif", "title": "Moving", "user": "one"}
"#;
    let candidates = read_candidates(std::io::Cursor::new(input), None).unwrap();

    let fetcher = Arc::new(StubFetcher::new(&[
        ("https://i.redd.it/still.jpg", "still"),
        ("https://i.redd.it/moving.gif", "moving"),
    ]));
    let mut pipeline = Pipeline::new(
        roots,
        fetcher,
        PipelineOptions {
            only_videos: true,
            ..options(2)
        },
    );
    pipeline.discover_all(candidates).await;
    let stats = pipeline.download(None).await;

    assert_eq!(stats.discovered, 3);
    assert_eq!(stats.rejected, 2);
    assert_eq!(stats.downloaded, 1);
    assert_eq!(
        files_in(&tmp.path().join("pics/img")),
        vec!["one__moving__Moving.gif".to_string()]
    );
}
