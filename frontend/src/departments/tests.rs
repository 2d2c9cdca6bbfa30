use super::*;
use crate::phase::{SubmitError, SubmitPhase};
use crate::request::HttpError;
use crate::request::mock::MockHttpClient;
use crate::session::{MemoryPersistence, SessionStore, sample_session};
use deptdesk_shared::DepartmentForm;
use deptdesk_shared::protocol::HttpMethod;
use std::cell::RefCell;
use std::sync::Arc;

// =========================================================
// Shared Mock Components
// =========================================================

const LIST: &str = r#"{"departments":[
    {"_id":"d1","dept_name":"Finance","description":"Handles the money","createdAt":"2024-03-05T10:20:30.000Z"},
    {"_id":"d2","dept_name":"People","description":"Hiring and payroll","createdAt":"2024-04-01T08:00:00.000Z"}
]}"#;

const AFTER_DELETE: &str = r#"[
    {"_id":"d2","dept_name":"People","description":"Hiring and payroll","createdAt":"2024-04-01T08:00:00.000Z"}
]"#;

/// Scripted answer; remembers every prompt it was shown.
struct ScriptedConfirm {
    answer: bool,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedConfirm {
    fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.answer
    }
}

fn setup() -> (DepartmentService<MockHttpClient>, MockHttpClient) {
    let store = SessionStore::load(Arc::new(MemoryPersistence::default()));
    store.set(Some(sample_session("tok")));
    let http = MockHttpClient::new();
    let api = ApiClient::new("https://api.test/emp", store, http.clone());
    (DepartmentService::new(api), http)
}

// =========================================================
// Tests
// =========================================================

#[tokio::test]
async fn list_unwraps_envelope() {
    let (service, http) = setup();
    http.respond(HttpMethod::Get, "/departments", 200, LIST);

    let list = service.list().await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].dept_name, "Finance");
    assert_eq!(http.requests()[0].header("Authorization"), Some("tok"));
}

#[tokio::test]
async fn delete_requires_confirmation_then_refetches_once() {
    let (service, http) = setup();
    http.respond(HttpMethod::Delete, "/delete-department/d1", 200, r#"{"message":"deleted"}"#);
    http.respond(HttpMethod::Get, "/departments", 200, AFTER_DELETE);
    let confirm = ScriptedConfirm::new(true);

    let outcome = service.delete("d1", &confirm).await.unwrap();

    assert_eq!(*confirm.prompts.borrow(), vec![DELETE_CONFIRMATION.to_string()]);
    let methods: Vec<_> = http.requests().iter().map(|r| r.method).collect();
    assert_eq!(methods, vec![HttpMethod::Delete, HttpMethod::Get]);
    assert_eq!(http.count(HttpMethod::Get, "/departments"), 1);
    match outcome {
        DeleteOutcome::Deleted(Refresh::Loaded(list)) => {
            assert_eq!(list.len(), 1);
            assert_eq!(list[0].id, "d2");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn declined_confirmation_sends_nothing() {
    let (service, http) = setup();
    let confirm = ScriptedConfirm::new(false);

    let outcome = service.delete("d1", &confirm).await.unwrap();

    assert!(matches!(outcome, DeleteOutcome::Cancelled));
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn failed_delete_skips_refetch() {
    let (service, http) = setup();
    http.respond(HttpMethod::Delete, "/delete-department/d1", 500, "");
    let confirm = ScriptedConfirm::new(true);

    let err = service.delete("d1", &confirm).await.unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(http.count(HttpMethod::Get, "/departments"), 0);
}

#[tokio::test]
async fn create_posts_form_then_refetches() {
    let (service, http) = setup();
    http.respond(
        HttpMethod::Post,
        "/add-department",
        201,
        r#"{"_id":"d3","dept_name":"Legal","description":"Contracts and compliance"}"#,
    );
    http.respond(HttpMethod::Get, "/departments", 200, LIST);
    let req = DepartmentForm {
        dept_name: "Legal".into(),
        description: "Contracts and compliance".into(),
    }
    .validate()
    .unwrap();

    let refresh = service.create(&req).await.unwrap();

    assert!(matches!(refresh, Refresh::Loaded(ref list) if list.len() == 2));
    let sent = http.requests();
    assert_eq!(sent.len(), 2);
    let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["dept_name"], "Legal");
    assert_eq!(body["description"], "Contracts and compliance");
}

#[tokio::test]
async fn invalid_department_form_sends_nothing() {
    let (service, http) = setup();
    let phase = RefCell::new(SubmitPhase::Idle);
    let form = DepartmentForm {
        dept_name: "L".into(),
        description: "short".into(),
    };

    let err = service.submit_create(&form, &phase).await.unwrap_err();

    assert!(matches!(err, SubmitError::Invalid(ref e) if e.has_errors()));
    assert_eq!(*phase.borrow(), SubmitPhase::Idle);
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn failed_create_keeps_form_open_with_message() {
    let (service, http) = setup();
    http.respond(
        HttpMethod::Post,
        "/add-department",
        409,
        r#"{"message":"Department already exists"}"#,
    );
    let phase = RefCell::new(SubmitPhase::Idle);
    let form = DepartmentForm {
        dept_name: "Legal".into(),
        description: "Contracts and compliance".into(),
    };

    let err = service.submit_create(&form, &phase).await.unwrap_err();

    assert!(matches!(err, SubmitError::Api(_)));
    assert_eq!(phase.borrow().error(), Some("Department already exists"));
    assert_eq!(http.count(HttpMethod::Get, "/departments"), 0);
}

#[tokio::test]
async fn refetch_failure_after_create_is_reported_separately() {
    let (service, http) = setup();
    http.respond(HttpMethod::Post, "/add-department", 201, "{}");
    http.fail(
        HttpMethod::Get,
        "/departments",
        HttpError::NetworkError("offline".into()),
    );
    let req = DepartmentForm {
        dept_name: "Legal".into(),
        description: "Contracts and compliance".into(),
    }
    .validate()
    .unwrap();

    let refresh = service.create(&req).await.unwrap();
    assert!(matches!(refresh, Refresh::Failed(ApiError::Transport(_))));
}

#[tokio::test]
async fn get_reads_single_record_in_either_shape() {
    let (service, http) = setup();
    http.respond(
        HttpMethod::Get,
        "/department/d1",
        200,
        r#"{"department":{"_id":"d1","dept_name":"Finance","description":"Handles the money","createdAt":"2024-03-05T10:20:30.000Z"}}"#,
    );
    http.respond(
        HttpMethod::Get,
        "/department/d2",
        200,
        r#"{"_id":"d2","dept_name":"People","description":"Hiring and payroll","createdAt":"2024-04-01T08:00:00.000Z"}"#,
    );

    assert_eq!(service.get("d1").await.unwrap().dept_name, "Finance");
    assert_eq!(service.get("d2").await.unwrap().dept_name, "People");
    assert_eq!(http.count(HttpMethod::Get, "/departments"), 0);
}
