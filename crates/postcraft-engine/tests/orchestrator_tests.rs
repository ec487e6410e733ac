// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orchestrator pipelines against a scripted backend and an in-memory store.

use std::sync::Arc;

use postcraft_core::types::{ContentRequest, Length, PostStatus, Tone, UserId};
use postcraft_engine::{ContentPipeline, Orchestrator, RefineRequest};
use postcraft_test_utils::{InMemoryStore, MockProvider, MockReply};
use tracing_test::traced_test;

const DRAFT_JSON: &str = r##"{
    "content": "We hired our first engineer.",
    "hashtags": ["hiring", "#startup"],
    "suggested_time": "Monday 8 AM",
    "linkedin_tips": ["Tag the new hire"]
}"##;

const OPTIMIZED_JSON: &str = r##"```json
{
    "content": "Big news: we hired our first engineer!",
    "hashtags": "#hiring #startup #growth",
    "suggested_time": "Tuesday 9 AM",
    "linkedin_tips": ["Open with the hook", "Add a question"]
}
```"##;

const ADVICE: &str = "Reply to every comment\n\nAsk followers about their first hire\nShare a photo";

fn setup(replies: Vec<MockReply>) -> (MockProvider, InMemoryStore, Orchestrator) {
    let provider = MockProvider::with_replies(replies);
    let store = InMemoryStore::new();
    let orchestrator = Orchestrator::new(Arc::new(provider.clone()), Arc::new(store.clone()), 0.7);
    (provider, store, orchestrator)
}

fn text(s: &str) -> MockReply {
    MockReply::Text(s.to_string())
}

fn request() -> ContentRequest {
    ContentRequest::builder(UserId(7), "first hire")
        .industry("startup")
        .tone(Tone::Enthusiastic)
        .length(Length::Short)
        .build()
}

#[tokio::test]
async fn create_runs_three_stages_and_persists_once() {
    let (provider, store, orchestrator) =
        setup(vec![text(DRAFT_JSON), text(OPTIMIZED_JSON), text(ADVICE)]);

    let response = orchestrator.create(&request()).await.unwrap();

    assert_eq!(provider.call_count().await, 3);
    assert_eq!(
        response.generated.content,
        "Big news: we hired our first engineer!"
    );
    assert_eq!(response.generated.hashtags, ["hiring", "startup", "growth"]);
    assert_eq!(response.engagement_tips.len(), 3);

    let posts = store.posts().await;
    assert_eq!(posts.len(), 1);
    let post = &posts[0];
    assert_eq!(post.id, response.post_id);
    assert_eq!(post.status, PostStatus::Draft);
    assert!(post.ai_generated);
    assert_eq!(post.topic, "first hire");
    assert_eq!(post.industry, "startup");
    assert_eq!(post.tone, "enthusiastic");
    assert_eq!(post.hashtags, ["hiring", "startup", "growth"]);
    assert_eq!(post.engagement_tips[0], "Reply to every comment");
    assert_eq!(post.linkedin_tips, ["Open with the hook", "Add a question"]);
}

#[tokio::test]
async fn each_stage_consumes_the_previous_output() {
    let (provider, _store, orchestrator) =
        setup(vec![text(DRAFT_JSON), text(OPTIMIZED_JSON), text(ADVICE)]);
    orchestrator.create(&request()).await.unwrap();

    let requests = provider.requests().await;
    assert!(requests[0].system_prompt.contains("100-200 words"));
    assert!(requests[1].user_prompt.contains("We hired our first engineer."));
    assert!(requests[1].user_prompt.contains("#hiring #startup"));
    assert!(
        requests[2]
            .user_prompt
            .contains("Big news: we hired our first engineer!")
    );
    assert!(requests.iter().all(|r| (r.temperature - 0.7).abs() < f32::EPSILON));
}

#[tokio::test]
async fn no_post_when_drafting_fails() {
    let (provider, store, orchestrator) = setup(vec![MockReply::Fail("503".into())]);
    let err = orchestrator.create(&request()).await.unwrap_err();
    assert!(err.is_backend_failure());
    assert_eq!(provider.call_count().await, 1);
    assert_eq!(store.post_count().await, 0);
}

#[tokio::test]
async fn no_post_when_optimization_fails() {
    let (_provider, store, orchestrator) = setup(vec![text(DRAFT_JSON), MockReply::Timeout]);
    let err = orchestrator.create(&request()).await.unwrap_err();
    assert!(err.is_backend_failure());
    assert_eq!(store.post_count().await, 0);
}

#[tokio::test]
async fn no_post_when_advisory_fails() {
    let (_provider, store, orchestrator) = setup(vec![
        text(DRAFT_JSON),
        text(OPTIMIZED_JSON),
        MockReply::Fail("quota exceeded".into()),
    ]);
    assert!(orchestrator.create(&request()).await.is_err());
    assert_eq!(store.post_count().await, 0);
}

#[tokio::test]
async fn storage_failure_propagates() {
    let (_provider, store, orchestrator) =
        setup(vec![text(DRAFT_JSON), text(OPTIMIZED_JSON), text(ADVICE)]);
    store.set_failing(true);
    let err = orchestrator.create(&request()).await.unwrap_err();
    assert!(err.is_backend_failure());
}

#[tokio::test]
async fn unparseable_answers_degrade_instead_of_failing() {
    let (_provider, store, orchestrator) = setup(vec![
        text("Here is a post about hiring."),
        text("Sorry, I cannot format that."),
        text(ADVICE),
    ]);

    let response = orchestrator.create(&request()).await.unwrap();

    // Drafting fell back to raw text; optimization kept the draft as-is.
    assert_eq!(response.generated.content, "Here is a post about hiring.");
    assert!(response.generated.hashtags.is_empty());
    assert_eq!(response.generated.suggested_time, "Tuesday 9 AM");
    assert_eq!(
        response.generated.linkedin_tips,
        ["Post during business hours", "Engage with comments"]
    );
    assert_eq!(store.post_count().await, 1);
}

#[tokio::test]
#[traced_test]
async fn degraded_stages_are_logged() {
    let (_provider, _store, orchestrator) = setup(vec![
        text("Here is a post about hiring."),
        text("Sorry, I cannot format that."),
        text(ADVICE),
    ]);

    orchestrator.create(&request()).await.unwrap();

    assert!(logs_contain("draft fell back to raw text"));
    assert!(logs_contain("keeping unoptimized draft"));
    assert!(logs_contain("content created"));
}

#[tokio::test]
async fn refine_runs_one_stage_and_does_not_persist() {
    let (provider, store, orchestrator) = setup(vec![text(
        r#"{"content": "Shorter version.", "hashtags": ["hiring"], "suggested_time": "Friday 11 AM", "linkedin_tips": []}"#,
    )]);

    let refined = orchestrator
        .refine(&RefineRequest {
            previous_content: "We hired our first engineer.".into(),
            instruction: "make it shorter".into(),
            industry: "startup".into(),
            tone: Tone::Casual,
            length: Length::Short,
        })
        .await
        .unwrap();

    assert_eq!(refined.content, "Shorter version.");
    assert_eq!(provider.call_count().await, 1);
    let requests = provider.requests().await;
    assert!(requests[0].user_prompt.contains("make it shorter"));
    assert!(requests[0].user_prompt.contains("about 150 words"));
    assert_eq!(store.post_count().await, 0);
}

#[tokio::test]
async fn refine_failure_propagates() {
    let (_provider, _store, orchestrator) = setup(vec![MockReply::Timeout]);
    let result = orchestrator
        .refine(&RefineRequest {
            previous_content: "Draft".into(),
            instruction: "rewrite".into(),
            industry: "general".into(),
            tone: Tone::Professional,
            length: Length::Medium,
        })
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn topic_suggestions_use_list_or_templates() {
    let (_provider, _store, orchestrator) = setup(vec![
        text(r#"["AI in hiring", "Remote onboarding", "Culture at scale", "Equity basics", "First 90 days", "extra"]"#),
        text("I would suggest writing about leadership."),
    ]);

    let topics = orchestrator.suggest_topics("startup").await.unwrap();
    assert_eq!(topics.len(), 5);
    assert_eq!(topics[0], "AI in hiring");

    let fallback = orchestrator.suggest_topics("finance").await.unwrap();
    assert_eq!(fallback.len(), 5);
    assert_eq!(fallback[4], "Building relationships in finance");
}
