mod common;

use std::sync::{Arc, Mutex};

use luis_sdk::{
    build_reply, converse, follow_dialog, parse, Dialog, DialogState, Handlers, InputError,
    LuisError, PredictionResult, Reply,
};
use serde_json::json;

const BOOK_A_FLIGHT: &str = r#"{"query":"book a flight","topScoringIntent":{"intent":"BookFlight","score":0.9},"entities":[],"dialog":{"prompt":"Which city?","contextId":"ctx-1","status":"Inprogress"}}"#;

#[test]
fn test_reply_carries_context_id() {
    let res = parse(BOOK_A_FLIGHT).unwrap();
    let dialog = res.dialog().unwrap();
    assert!(!dialog.is_finished());
    assert_eq!(dialog.prompt(), Some("Which city?"));
    assert_eq!(res.dialog_state(), DialogState::InProgress);

    let req = build_reply("app-1", "key-1", true, "Paris", &res, None).unwrap();
    assert_eq!(req.context_id.as_deref(), Some("ctx-1"));
    assert_eq!(req.query, "Paris");
    assert_eq!(req.app_id, "app-1");
    assert_eq!(req.app_key, "key-1");
    assert!(req.verbose);
    assert_eq!(req.force_set, None);
    assert!(req.is_reply());
}

#[test]
fn test_reply_force_set() {
    let res = parse(BOOK_A_FLIGHT).unwrap();
    let req = build_reply("app-1", "key-1", false, "London", &res, Some("origin")).unwrap();
    assert_eq!(req.force_set.as_deref(), Some("origin"));
}

#[test]
fn test_reply_without_dialog_fails() {
    let res = parse(common::minimal("hello", "Greeting", 0.8)).unwrap();
    assert_eq!(res.dialog_state(), DialogState::NoDialog);

    let err = build_reply("app-1", "key-1", true, "Paris", &res, None).unwrap_err();
    assert!(matches!(err, LuisError::MissingDialogContext));
}

#[tokio::test]
async fn test_client_reply_without_dialog_sends_nothing() {
    let client = common::client(vec![]);
    let res = parse(common::minimal("hello", "Greeting", 0.8)).unwrap();

    let err = client.reply("Paris", &res, None).await.unwrap_err();
    assert!(matches!(err, LuisError::MissingDialogContext));
    assert!(client.transport().sent().is_empty());
}

#[tokio::test]
async fn test_predict_validates_text() {
    let client = common::client(vec![]);
    let err = client.predict("   ").await.unwrap_err();
    assert!(matches!(err, LuisError::InvalidInput { kind: InputError::Empty, .. }));
    assert!(client.transport().sent().is_empty());
}

#[tokio::test]
async fn test_predict_then_reply_round_trip() {
    let client = common::client(vec![
        common::with_dialog("book a flight", Some("Which city?"), "ctx-1", "Question"),
        common::with_dialog("Paris", None, "ctx-2", "Finished"),
    ]);

    let first = client.predict("  book a flight ").await.unwrap();
    assert_eq!(first.dialog_state(), DialogState::InProgress);

    let second = client.reply("Paris", &first, None).await.unwrap();
    assert_eq!(second.dialog_state(), DialogState::Finished);

    let sent = client.transport().sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].query, "book a flight");
    assert_eq!(sent[0].context_id, None);
    assert_eq!(sent[1].context_id.as_deref(), Some("ctx-1"));
    assert_ne!(sent[0].request_id, sent[1].request_id);
}

#[tokio::test]
async fn test_conversation_runs_until_finished() {
    let client = common::client(vec![
        common::with_dialog("book a flight", Some("Which city?"), "ctx-1", "Question"),
        common::with_dialog("Paris", Some("Which day?"), "ctx-2", "Question"),
        common::with_dialog("tomorrow", None, "ctx-3", "Finished"),
    ]);

    let mut answers = vec!["tomorrow", "Paris"];
    let mut prompts = Vec::new();
    let mut prompter = |dialog: &Dialog| -> luis_sdk::Result<Reply> {
        prompts.push(dialog.prompt().unwrap_or_default().to_string());
        Ok(Reply::from(answers.pop().unwrap()))
    };

    let result = converse(&client, "book a flight", &mut prompter).await.unwrap();
    assert!(result.dialog().unwrap().is_finished());
    assert_eq!(prompts, vec!["Which city?", "Which day?"]);

    let contexts: Vec<Option<String>> = client
        .transport()
        .sent()
        .into_iter()
        .map(|r| r.context_id)
        .collect();
    assert_eq!(
        contexts,
        vec![None, Some("ctx-1".to_string()), Some("ctx-2".to_string())]
    );
}

#[tokio::test]
async fn test_conversation_without_dialog_never_prompts() {
    let client = common::client(vec![common::minimal("hello", "Greeting", 0.8)]);

    let mut prompter = |_: &Dialog| -> luis_sdk::Result<Reply> {
        panic!("no dialog, no prompt");
    };

    let result = converse(&client, "hello", &mut prompter).await.unwrap();
    assert_eq!(result.top_intent().name, "Greeting");
    assert_eq!(client.transport().sent().len(), 1);
}

#[tokio::test]
async fn test_conversation_forwards_force_set() {
    let client = common::client(vec![common::with_dialog("Rome", None, "ctx-2", "Finished")]);
    let start = parse(common::with_dialog("book", Some("Which city?"), "ctx-1", "Question")).unwrap();

    let mut prompter =
        |_: &Dialog| -> luis_sdk::Result<Reply> { Ok(Reply::new("Rome").force_set("destination")) };

    follow_dialog(&client, start, &mut prompter).await.unwrap();
    let sent = client.transport().sent();
    assert_eq!(sent[0].force_set.as_deref(), Some("destination"));
}

#[tokio::test]
async fn test_conversation_surfaces_auth_failure() {
    let client = common::client(vec![
        common::with_dialog("book a flight", Some("Which city?"), "ctx-1", "Question"),
        json!({ "statusCode": 401, "message": "Access denied" }),
    ]);

    let mut prompter = |_: &Dialog| -> luis_sdk::Result<Reply> { Ok(Reply::from("Paris")) };
    let err = converse(&client, "book a flight", &mut prompter).await.unwrap_err();
    assert!(matches!(err, LuisError::AuthenticationError(_)));
}

#[tokio::test]
async fn test_conversation_stops_on_prompter_io_error() {
    let client = common::client(vec![common::with_dialog(
        "book a flight",
        Some("Which city?"),
        "ctx-1",
        "Question",
    )]);

    let mut prompter = |_: &Dialog| -> luis_sdk::Result<Reply> {
        Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed").into())
    };
    let err = converse(&client, "book a flight", &mut prompter).await.unwrap_err();
    assert!(matches!(err, LuisError::Io(_)));
    assert_eq!(client.transport().sent().len(), 1);
}

#[tokio::test]
async fn test_background_predict() {
    let client = common::client(vec![common::minimal("hello", "Greeting", 0.8)]);

    let handle = client.predict_in_background("hello").unwrap();
    let res = handle.await.unwrap().unwrap();
    assert_eq!(res.query(), "hello");
}

#[tokio::test]
async fn test_background_reply_validates_before_spawning() {
    let client = common::client(vec![]);
    let res = parse(common::minimal("hello", "Greeting", 0.8)).unwrap();

    let err = client.reply_in_background("Paris", &res, None).unwrap_err();
    assert!(matches!(err, LuisError::MissingDialogContext));
}

#[tokio::test]
async fn test_handlers_receive_outcome() {
    let client = common::client(vec![
        common::minimal("hello", "Greeting", 0.8),
        json!({ "statusCode": 401 }),
    ]);

    let successes: Arc<Mutex<Vec<PredictionResult>>> = Arc::default();
    let failures: Arc<Mutex<Vec<String>>> = Arc::default();

    let handlers = |ok: Arc<Mutex<Vec<PredictionResult>>>, bad: Arc<Mutex<Vec<String>>>| {
        Handlers::new(
            move |res| ok.lock().unwrap().push(res),
            move |err: LuisError| bad.lock().unwrap().push(err.to_string()),
        )
    };

    client
        .predict_with_handlers("hello", handlers(successes.clone(), failures.clone()))
        .unwrap()
        .await
        .unwrap();
    client
        .predict_with_handlers("hello again", handlers(successes.clone(), failures.clone()))
        .unwrap()
        .await
        .unwrap();

    assert_eq!(successes.lock().unwrap().len(), 1);
    assert_eq!(failures.lock().unwrap().len(), 1);
    assert!(failures.lock().unwrap()[0].starts_with("Authentication failed"));
}
