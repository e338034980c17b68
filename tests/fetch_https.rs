use xdraft::conf;
use xdraft::http::HTTPClientFactory;
use xdraft::x::{Lookup, PostFetcher};

// Live tests against public endpoints. Posts can disappear and endpoints
// change without notice, so these only check that something sensible comes
// back. Run them with `cargo test -- --ignored`.

// The first post on the platform.
const POST_ID: &str = "20";

#[tokio::test]
#[ignore]
async fn it_fetches_a_post_by_url() {
    let fetcher = PostFetcher::new(&HTTPClientFactory::new(conf::request_timeout()));
    let post = fetcher
        .fetch_by_url("https://x.com/jack/status/20")
        .await
        .expect("could not fetch post by URL");
    assert_eq!(post.id(), POST_ID);
    assert_ne!(post.text(), "");
}

#[tokio::test]
#[ignore]
async fn it_fetches_a_post_by_id() {
    let fetcher = PostFetcher::new(&HTTPClientFactory::new(conf::request_timeout()));
    let post = fetcher
        .fetch(&Lookup::Id(String::from(POST_ID)))
        .await
        .expect("could not fetch post by ID");
    assert_eq!(post.author().map(|a| a.screen_name()), Some("jack"));
}
