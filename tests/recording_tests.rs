use chrono::NaiveDate;
use rworklog::engine::prompt::STATIC_PROMPTS;
use rworklog::engine::{
    Prompt, PromptOrigin, PromptRequest, PromptSource, RecordingMachine, RecordingState,
    SessionOptions, Session, TimeRangePolicy,
};
use rworklog::errors::AppError;
use rworklog::models::{ConversationMessage, Speaker};

mod common;
use common::{MemoryStore, USER, session};

const ANSWERS: [&str; 6] = [
    "ABC商事",
    "保守点検",
    "9:00-17:00",
    "サーバーのログを確認しました",
    "異常なし",
    "特になし",
];

fn texts(messages: &[ConversationMessage]) -> Vec<&str> {
    messages.iter().map(|m| m.text.as_str()).collect()
}

fn static_prompt(step: usize) -> Prompt {
    Prompt {
        text: STATIC_PROMPTS[step].to_string(),
        origin: PromptOrigin::Static,
    }
}

#[tokio::test]
async fn test_six_turns_produce_one_record() {
    let store = MemoryStore::new();
    let mut s = session(store.clone(), PromptSource::Static);

    let opening = s.start_recording().await.unwrap();
    assert_eq!(texts(&opening), vec![STATIC_PROMPTS[0]]);
    assert!(s.is_recording());

    for (i, answer) in ANSWERS.iter().enumerate().take(5) {
        let out = s.submit(answer).await.unwrap();
        assert_eq!(out[0], ConversationMessage::user(*answer));
        assert_eq!(out[1].text, STATIC_PROMPTS[i + 1]);
        assert_eq!(out.len(), 2);
    }

    let last = s.submit(ANSWERS[5]).await.unwrap();
    assert_eq!(
        last.last().unwrap().text,
        "記録が完了しました！ABC商事での保守点検が保存されました。"
    );
    assert!(!s.is_active());

    let saved = store.records();
    assert_eq!(saved.len(), 1);
    let r = &saved[0];
    assert_eq!(r.user_name, USER);
    assert_eq!(r.client_name, "ABC商事");
    assert_eq!(r.work_type, "保守点検");
    assert_eq!(r.start_time.as_deref(), Some("09:00"));
    assert_eq!(r.end_time.as_deref(), Some("17:00"));
    assert_eq!(r.duration, Some(480));
    assert_eq!(r.work_detail, "サーバーのログを確認しました");
    assert_eq!(r.result, "異常なし");
    assert_eq!(r.issues, "特になし");
    assert!(!r.daily_report_included);
}

#[tokio::test]
async fn test_transcript_keeps_every_message_in_order() {
    let store = MemoryStore::new();
    let mut s = session(store, PromptSource::Static);

    s.start_recording().await.unwrap();
    for answer in ANSWERS {
        s.submit(answer).await.unwrap();
    }

    let transcript = s.transcript();
    // opening prompt + 6 × (user + system)
    assert_eq!(transcript.len(), 13);
    assert_eq!(transcript.iter().filter(|m| m.is_user()).count(), 6);
    assert_eq!(transcript[0].speaker, Speaker::System);
}

#[tokio::test]
async fn test_unreadable_time_range_is_tolerated() {
    let store = MemoryStore::new();
    let mut s = session(store.clone(), PromptSource::Static);

    s.start_recording().await.unwrap();
    s.submit("ABC商事").await.unwrap();
    s.submit("保守").await.unwrap();
    let out = s.submit("午後いっぱい").await.unwrap();

    assert_eq!(out[1].text, STATIC_PROMPTS[3]);
    assert_eq!(
        s.recording().unwrap().state(),
        RecordingState::Active(3)
    );

    for answer in ["内容", "成果", "課題"] {
        s.submit(answer).await.unwrap();
    }

    let r = &store.records()[0];
    assert_eq!(r.start_time, None);
    assert_eq!(r.end_time, None);
    assert_eq!(r.duration, None);
    assert_eq!(r.minutes(), 0);
}

#[tokio::test]
async fn test_retry_policy_asks_again() {
    let store = MemoryStore::new();
    let options = SessionOptions {
        time_range_policy: TimeRangePolicy::Retry,
        ..SessionOptions::new(USER)
    };
    let mut s = Session::new(store.clone(), PromptSource::Static, options);

    s.start_recording().await.unwrap();
    s.submit("ABC商事").await.unwrap();
    s.submit("保守").await.unwrap();

    let out = s.submit("分からない").await.unwrap();
    assert_eq!(out.len(), 3);
    assert!(out[1].text.contains("9:00-17:00"));
    assert_eq!(out[2].text, STATIC_PROMPTS[2]);

    let machine = s.recording().unwrap();
    assert_eq!(machine.state(), RecordingState::Active(2));
    assert_eq!(machine.answers().len(), 2);

    let out = s.submit("10:00-11:30").await.unwrap();
    assert_eq!(out[1].text, STATIC_PROMPTS[3]);
    assert_eq!(s.recording().unwrap().record().unwrap().duration, Some(90));
}

#[test]
fn test_pending_machine_rejects_submit() {
    let mut m = RecordingMachine::default();
    let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();

    let t = m.start(USER, date).unwrap();
    assert!(t.messages.is_empty());
    assert!(matches!(
        t.request,
        Some(PromptRequest::Step { step: 0, .. })
    ));
    assert!(m.is_pending());

    let err = m.submit("ABC商事").unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    assert!(m.answers().is_empty());

    let shown = m.deliver(static_prompt(0)).unwrap();
    assert_eq!(shown, vec![ConversationMessage::system(STATIC_PROMPTS[0])]);
    assert!(!m.is_pending());

    let t = m.submit("ABC商事").unwrap();
    assert!(m.is_pending());
    match t.request {
        Some(PromptRequest::Step {
            step,
            answers,
            latest,
        }) => {
            assert_eq!(step, 1);
            assert_eq!(answers, vec!["ABC商事".to_string()]);
            assert_eq!(latest.as_deref(), Some("ABC商事"));
        }
        other => panic!("unexpected request: {other:?}"),
    }
}

#[test]
fn test_unrequested_delivery_is_rejected() {
    let mut m = RecordingMachine::default();
    assert!(matches!(
        m.deliver(static_prompt(0)),
        Err(AppError::InvalidState(_))
    ));
    assert!(matches!(m.submit("x"), Err(AppError::InvalidState(_))));
    assert_eq!(m.state(), RecordingState::Idle);
}

#[test]
fn test_machine_refuses_a_second_start() {
    let mut m = RecordingMachine::default();
    let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    m.start(USER, date).unwrap();
    assert!(matches!(m.start(USER, date), Err(AppError::InvalidState(_))));
}

#[tokio::test]
async fn test_submit_without_conversation_is_invalid() {
    let mut s = session(MemoryStore::new(), PromptSource::Static);
    assert!(matches!(
        s.submit("hello").await,
        Err(AppError::InvalidState(_))
    ));
    assert!(s.transcript().is_empty());
}

#[tokio::test]
async fn test_storage_failure_becomes_a_notice() {
    let store = MemoryStore::failing_writes(Vec::new());
    let mut s = session(store.clone(), PromptSource::Static);

    s.start_recording().await.unwrap();
    let mut last = Vec::new();
    for answer in ANSWERS {
        last = s.submit(answer).await.unwrap();
    }

    let notice = last.last().unwrap();
    assert_eq!(notice.speaker, Speaker::Notice);
    assert!(notice.text.contains("disk full"));
    assert!(!s.is_active());
    assert!(store.records().is_empty());

    // the session is usable again
    assert!(s.start_recording().await.is_ok());
}
