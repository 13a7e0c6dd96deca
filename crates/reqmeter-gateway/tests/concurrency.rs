#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]


use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{routing::get, Router};
use futures_util::future::join_all;
use tower::ServiceExt;

use reqmeter_core::{GroupingRules, RequestInfo};
use reqmeter_gateway::config::CancelPolicy;
use reqmeter_gateway::instrument::RequestTimingLayer;

const N: usize = 500;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_requests_are_each_recorded_once() {
    let rules = GroupingRules::compile([("items", "items/[0-9]+")]).unwrap();
    let (registry, inst) = common_util::instrumenter(rules, CancelPolicy::Count);
    let app = Router::new()
        .route("/items/:id", get(|| async { StatusCode::OK }))
        .route(
            "/fail/:id",
            get(|| async {
                tokio::task::yield_now().await;
                StatusCode::BAD_GATEWAY
            }),
        )
        .layer(RequestTimingLayer::new(inst));

    let tasks = (0..N).map(|i| {
        let app = app.clone();
        tokio::spawn(async move {
            let uri = if i % 2 == 0 {
                format!("/items/{i}")
            } else {
                format!("/fail/{i}")
            };
            let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
            app.oneshot(req).await.unwrap().status()
        })
    });
    let statuses: Vec<StatusCode> = join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(statuses.len(), N);

    let snap = registry.snapshot();
    assert_eq!(snap.timer("items.get-requests").unwrap().count, (N / 2) as u64);
    assert_eq!(snap.timer_samples(), N as u64);
    assert_eq!(snap.counter("2xx-responses"), (N / 2) as u64);
    assert_eq!(snap.counter("5xx-responses"), (N / 2) as u64);
    assert_eq!(snap.counter_total(), N as u64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn completion_on_another_thread_is_recorded() {
    let (registry, inst) = common_util::instrumenter(GroupingRules::empty(), CancelPolicy::Count);

    let guards: Vec<_> = (0..N)
        .map(|_| inst.begin(RequestInfo::new("jobs", "POST")))
        .collect();
    let handles = guards.into_iter().map(|guard| {
        tokio::task::spawn_blocking(move || {
            std::thread::sleep(Duration::from_micros(50));
            guard.complete(202);
        })
    });
    for h in join_all(handles).await {
        h.unwrap();
    }

    let snap = registry.snapshot();
    assert_eq!(snap.timer("jobs.post-requests").unwrap().count, N as u64);
    assert_eq!(snap.counter("2xx-responses"), N as u64);
    assert_eq!(snap.counter("cancelled-requests"), 0);
}
