// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::sync::Arc;

use constella::config::{ConfigStore, LiveSettings, ProviderId, ProviderSettings, SettingsUpdate};
use constella::generation::postprocess::{discovery_postprocess, journal_postprocess};
use constella::generation::{
    Character, Comment, GenerationService, InMemoryDirectory, Journal,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn proposal(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "introduction": format!("{} runs the bakery.", name),
        "backstory": "Grew up by the harbour.",
        "relationship_to_subject": "Childhood friend",
        "relationship_from_subject": "Trusted confidant",
    })
}

/// Live settings pointing Ollama at `server`, persisted under `dir`.
fn live_for(server: &MockServer, dir: &TempDir) -> Arc<LiveSettings> {
    let mut settings = ProviderSettings::default();
    settings.provider = ProviderId::Ollama;
    settings.config_mut(ProviderId::Ollama).endpoint_url = Some(server.uri());
    Arc::new(LiveSettings::new(
        ConfigStore::new(dir.path().join(".env")),
        settings,
    ))
}

async fn mount_ollama(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": text })))
        .mount(server)
        .await;
}

#[test]
fn test_journal_without_opening_gets_prefix() {
    assert_eq!(journal_postprocess("Lorem ipsum"), "Dear Diary,\n\nLorem ipsum");
}

#[test]
fn test_journal_with_opening_is_unchanged() {
    let text = "Dear Diary, today was odd.";
    assert_eq!(journal_postprocess(text), text);
}

#[test]
fn test_discovery_extracts_embedded_object() {
    let body = json!({ "characters": [proposal("Mira"), proposal("Tomas"), proposal("Ines")] });
    let raw = format!("Sure! Here you go:\n```json\n{}\n```\nEnjoy.", body);

    let proposals = discovery_postprocess(&raw, "Ada").into_proposals();
    let names: Vec<&str> = proposals.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Mira", "Tomas", "Ines"]);
    assert_eq!(proposals[0].relationship_to_subject, "Childhood friend");
}

#[test]
fn test_discovery_without_json_falls_back_to_seed() {
    let outcome = discovery_postprocess("I cannot think of anyone right now.", "Ada");
    assert!(outcome.is_fallback());

    let proposals = outcome.into_proposals();
    assert_eq!(proposals.len(), 1);
    assert!(proposals[0].relationship_from_subject.contains("Ada"));
    assert!(proposals[0].relationship_to_subject.contains("Ada"));
}

#[tokio::test]
async fn test_journal_flow_through_ollama() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_string_contains("Ada"))
        .and(body_string_contains("Bob: Old rival"))
        .and(body_string_contains("first snow"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "response": "The snow fell." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut directory = InMemoryDirectory::new();
    directory.insert("bob-1", "Bob");
    let service = GenerationService::new(live_for(&server, &dir), Arc::new(directory));

    let ada = Character::new("Ada")
        .with_attribute("personality", "Curious")
        .with_relationship(Some("bob-1"), "Old rival");
    let entry = service.generate_journal(ada, "first snow").await.unwrap();

    assert_eq!(entry, "Dear Diary,\n\nThe snow fell.");
    server.verify().await;
}

#[tokio::test]
async fn test_comment_flow_trims_output() {
    let server = MockServer::start().await;
    mount_ollama(&server, "  What a lovely day!\n").await;

    let dir = TempDir::new().unwrap();
    let service = GenerationService::new(live_for(&server, &dir), Arc::new(InMemoryDirectory::new()));

    let journal = Journal {
        content: "Dear Diary, the bakery burned down.".to_string(),
        ..Default::default()
    };
    let thread = vec![Comment {
        id: Some("c1".to_string()),
        content: "Oh no!".to_string(),
        ..Default::default()
    }];
    let comment = service
        .generate_comment(Character::new("Bob"), &journal, thread, Some("c1".to_string()))
        .await
        .unwrap();

    assert_eq!(comment, "What a lovely day!");
    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    assert!(body.contains("the bakery burned down"));
    assert!(body.contains("Oh no!"));
}

#[tokio::test]
async fn test_discovery_flow_through_ollama() {
    let server = MockServer::start().await;
    let payload = json!({ "characters": [proposal("Mira"), proposal("Tomas"), proposal("Ines")] });
    mount_ollama(&server, &format!("Here they are: {}", payload)).await;

    let dir = TempDir::new().unwrap();
    let service = GenerationService::new(live_for(&server, &dir), Arc::new(InMemoryDirectory::new()));

    let outcome = service
        .discover_characters(Character::new("Ada"), "neighbours")
        .await
        .unwrap();
    assert!(!outcome.is_fallback());
    assert_eq!(outcome.into_proposals().len(), 3);
}

#[tokio::test]
async fn test_settings_update_redirects_next_generation() {
    let first = MockServer::start().await;
    mount_ollama(&first, "from first").await;
    let second = MockServer::start().await;
    mount_ollama(&second, "from second").await;

    let dir = TempDir::new().unwrap();
    let live = live_for(&first, &dir);
    let service = GenerationService::new(Arc::clone(&live), Arc::new(InMemoryDirectory::new()));

    let before = service.generate_journal(Character::new("Ada"), "rain").await.unwrap();
    assert!(before.ends_with("from first"));

    let update = SettingsUpdate::for_provider(ProviderId::Ollama, Some(second.uri()), None, None);
    live.update(&update).await.unwrap();

    let after = service.generate_journal(Character::new("Ada"), "rain").await.unwrap();
    assert!(after.ends_with("from second"));
    assert_eq!(first.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_upstream_failure_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let service = GenerationService::new(live_for(&server, &dir), Arc::new(InMemoryDirectory::new()));

    let err = service
        .generate_journal(Character::new("Ada"), "rain")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "UpstreamTransportError");
}
