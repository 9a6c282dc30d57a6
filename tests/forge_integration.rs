//! Integration tests for tag resolution.
//!
//! These tests exercise the public resolver API against `MockForge` and a
//! fake GitHub API served by wiremock. Live GitHub API tests are behind the
//! `live_github_tests` feature flag.

use serde_json::json;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ecobalyse_release::core::tags::{resolve_tag, resolve_tag_with, ResolveOptions};
use ecobalyse_release::core::types::{CommitSha, RepoSlug, TagName};
use ecobalyse_release::forge::mock::{FailOn, MockForge};
use ecobalyse_release::forge::{ForgeError, TagRecord};

fn listing() -> Vec<TagRecord> {
    vec![TagRecord::new("v1", "abc"), TagRecord::new("v2", "def")]
}

// =============================================================================
// MockForge
// =============================================================================

mod mock_forge_tests {
    use super::*;

    #[tokio::test]
    async fn unknown_commit_has_no_tag() {
        let forge = MockForge::with_tags(listing());
        let tag = resolve_tag_with(&forge, &RepoSlug::ecobalyse(), &CommitSha::from("zzz"))
            .await
            .unwrap();
        assert_eq!(tag, None);
    }

    #[tokio::test]
    async fn tagged_commit_resolves() {
        let forge = MockForge::with_tags(listing());
        let tag = resolve_tag_with(&forge, &RepoSlug::ecobalyse(), &CommitSha::from("def"))
            .await
            .unwrap();
        assert_eq!(tag, Some(TagName::from("v2")));
    }

    #[tokio::test]
    async fn rate_limit_reaches_caller() {
        let forge = MockForge::with_tags(listing()).fail_on(FailOn::GetRepository(
            ForgeError::RateLimited { reset: None },
        ));

        let result =
            resolve_tag_with(&forge, &RepoSlug::ecobalyse(), &CommitSha::from("abc")).await;
        assert_eq!(result, Err(ForgeError::RateLimited { reset: None }));
    }
}

// =============================================================================
// Fake GitHub API
// =============================================================================

mod github_api_tests {
    use super::*;

    async fn fake_github() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/MTES-MCT/ecobalyse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "ecobalyse",
                "owner": { "login": "MTES-MCT" },
                "default_branch": "master"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/MTES-MCT/ecobalyse/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "name": "v1", "commit": { "sha": "abc" } },
                { "name": "v2", "commit": { "sha": "def" } }
            ])))
            .mount(&server)
            .await;
        server
    }

    fn options(server: &MockServer) -> ResolveOptions {
        ResolveOptions {
            repository: RepoSlug::ecobalyse(),
            api_base: Some(server.uri()),
        }
    }

    #[tokio::test]
    async fn resolve_tag_anonymous() {
        let server = fake_github().await;

        let found = resolve_tag(&CommitSha::from("def"), None, &options(&server))
            .await
            .unwrap();
        let missing = resolve_tag(&CommitSha::from("zzz"), None, &options(&server))
            .await
            .unwrap();

        assert_eq!(found, Some(TagName::from("v2")));
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn resolve_tag_authenticated_sends_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/MTES-MCT/ecobalyse"))
            .and(header_exists("Authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "ecobalyse",
                "owner": { "login": "MTES-MCT" }
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/MTES-MCT/ecobalyse/tags"))
            .and(header_exists("Authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "name": "v1", "commit": { "sha": "abc" } }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let found = resolve_tag(&CommitSha::from("abc"), Some("ghp_test"), &options(&server))
            .await
            .unwrap();
        assert_eq!(found, Some(TagName::from("v1")));
    }

    #[tokio::test]
    async fn rate_limited_lookup_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/MTES-MCT/ecobalyse"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("X-RateLimit-Remaining", "0")
                    .set_body_json(json!({ "message": "API rate limit exceeded" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = resolve_tag(&CommitSha::from("abc"), None, &options(&server))
            .await
            .unwrap_err();
        assert!(err.is_rate_limited());
    }
}

// =============================================================================
// Live GitHub API Tests (behind feature flag)
// =============================================================================

#[cfg(feature = "live_github_tests")]
mod live_tests {
    use super::*;

    #[tokio::test]
    async fn live_unknown_commit_has_no_tag() {
        let token = std::env::var("GITHUB_TOKEN").ok();
        let result = resolve_tag(
            &CommitSha::from("0000000000000000000000000000000000000000"),
            token.as_deref(),
            &ResolveOptions::default(),
        )
        .await;

        match result {
            Ok(tag) => assert_eq!(tag, None),
            Err(e) if e.is_rate_limited() => eprintln!("Skipping: rate limited"),
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
}
