use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};

use backend_application::commands::{
    event_commands, feedback_commands, interest_commands, scan_commands,
};
use backend_application::queries::attendance_queries;
use backend_application::{AppError, AppState, ScanError};
use backend_domain::{
    AttendanceState, Collection, Document, EventId, Evaluation, FeedbackSubmission, GeoPoint,
    LocationError, NextStep, RecordStore, RuntimeConfig, ScanAction, ScanOutcome, SetField,
    RATING_QUESTIONS,
};
use backend_infrastructure::{FixedClock, JsonRecordStore, ReportedLocation, SessionIdentity};

const VENUE: (f64, f64) = (14.8447, 120.8105);

fn event_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

fn document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

fn at_venue() -> ReportedLocation {
    ReportedLocation::new(Ok(GeoPoint::new(VENUE.0 + 0.0003, VENUE.1)))
}

fn five_km_north() -> ReportedLocation {
    ReportedLocation::new(Ok(GeoPoint::new(VENUE.0 + 0.045, VENUE.1)))
}

async fn seed(store: &dyn RecordStore) {
    store
        .merge(
            Collection::Meetings,
            "E1",
            document(json!({
                "name": "Orientation",
                "date": "2026-10-19",
                "latitude": VENUE.0,
                "longitude": VENUE.1,
                "location": "Main Hall",
            })),
        )
        .await
        .expect("seed meeting");
    store
        .merge(Collection::Users, "u1", document(json!({"name": "Ana"})))
        .await
        .expect("seed user");
}

async fn setup_on(store: Arc<dyn RecordStore>, today: NaiveDate) -> AppState {
    seed(store.as_ref()).await;
    AppState::new(
        RuntimeConfig::default(),
        store,
        Arc::new(FixedClock::new(today)),
    )
}

async fn setup() -> AppState {
    setup_on(Arc::new(JsonRecordStore::in_memory()), event_day()).await
}

async fn set_of(
    state: &AppState,
    collection: Collection,
    key: &str,
    field: SetField,
) -> Vec<String> {
    let doc = state
        .record_store
        .read(collection, key)
        .await
        .expect("read")
        .expect("document");
    doc.get(field.as_str())
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(|value| value.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

async fn scan_as(
    state: &AppState,
    user: &str,
    payload: &str,
    location: &ReportedLocation,
) -> Result<ScanOutcome, ScanError> {
    let identity = SessionIdentity::signed_in(user);
    scan_commands::process_scan(state, payload, location, &identity, None).await
}

async fn scan(
    state: &AppState,
    payload: &str,
    location: &ReportedLocation,
) -> Result<ScanOutcome, ScanError> {
    scan_as(state, "u1", payload, location).await
}

#[tokio::test]
async fn checkin_then_checkout_confirms_attendance() {
    let state = setup().await;

    let checked_in = scan(&state, "E1-checkin", &at_venue()).await.expect("checkin");
    assert_eq!(checked_in.action, ScanAction::CheckIn);
    assert_eq!(checked_in.state, AttendanceState::CheckedIn);
    assert_eq!(checked_in.event_name, "Orientation");
    assert_eq!(checked_in.next_step, NextStep::None);
    assert!(checked_in.distance_km < 0.1);

    let checked_out = scan(&state, "E1-checkout", &at_venue()).await.expect("checkout");
    assert_eq!(checked_out.state, AttendanceState::AttendanceConfirmed);
    assert_eq!(checked_out.next_step, NextStep::Feedback);
    assert!(!checked_out.already_recorded);

    assert_eq!(
        set_of(&state, Collection::Meetings, "E1", SetField::CheckedInUsers).await,
        vec!["u1"]
    );
    assert_eq!(
        set_of(&state, Collection::Meetings, "E1", SetField::CheckedOutUsers).await,
        vec!["u1"]
    );
    assert_eq!(
        set_of(&state, Collection::Meetings, "E1", SetField::Attendees).await,
        vec!["u1"]
    );
    assert_eq!(
        set_of(&state, Collection::Users, "u1", SetField::EventsAttended).await,
        vec!["E1"]
    );

    let rendered = state.metrics.render_prometheus();
    assert!(rendered.contains("rollcall_attendance_confirmed_total 1"));
}

#[tokio::test]
async fn repeated_checkin_changes_nothing() {
    let state = setup().await;
    scan(&state, "E1-checkin", &at_venue()).await.expect("first");
    let second = scan(&state, "E1-checkin", &at_venue()).await.expect("second");

    assert!(second.already_recorded);
    assert_eq!(second.state, AttendanceState::CheckedIn);
    assert_eq!(
        set_of(&state, Collection::Meetings, "E1", SetField::CheckedInUsers).await,
        vec!["u1"]
    );
}

#[tokio::test]
async fn checkout_without_checkin_is_not_confirmed() {
    let state = setup().await;
    let outcome = scan(&state, "E1-checkout", &at_venue()).await.expect("checkout");

    assert_eq!(outcome.state, AttendanceState::CheckedOutUnconfirmed);
    assert_eq!(outcome.next_step, NextStep::None);
    assert_eq!(
        set_of(&state, Collection::Meetings, "E1", SetField::CheckedOutUsers).await,
        vec!["u1"]
    );
    assert!(set_of(&state, Collection::Meetings, "E1", SetField::Attendees)
        .await
        .is_empty());
    assert!(set_of(&state, Collection::Users, "u1", SetField::EventsAttended)
        .await
        .is_empty());

    // Checking in afterwards and scanning checkout again completes the pair.
    scan(&state, "E1-checkin", &at_venue()).await.expect("late checkin");
    let again = scan(&state, "E1-checkout", &at_venue()).await.expect("rescan");
    assert_eq!(again.state, AttendanceState::AttendanceConfirmed);
}

#[tokio::test]
async fn wrong_day_is_rejected_without_writes() {
    let next_day = event_day().succ_opt().expect("next day");
    let state = setup_on(Arc::new(JsonRecordStore::in_memory()), next_day).await;
    let before = state
        .record_store
        .read(Collection::Meetings, "E1")
        .await
        .expect("read");

    let err = scan(&state, "E1-checkin", &at_venue()).await.expect_err("wrong day");
    match err {
        ScanError::DateIneligible { scheduled, today } => {
            assert_eq!(scheduled, event_day());
            assert_eq!(today, next_day);
        }
        other => panic!("unexpected error: {other}"),
    }

    let after = state
        .record_store
        .read(Collection::Meetings, "E1")
        .await
        .expect("read");
    assert_eq!(before, after);
}

#[tokio::test]
async fn far_away_scan_reports_distance() {
    let state = setup().await;
    let err = scan(&state, "E1-checkin", &five_km_north()).await.expect_err("too far");

    let distance = err.distance_km().expect("distance");
    assert!((distance - 5.0).abs() < 0.05, "distance was {distance}");
    assert_eq!(err.kind(), "out_of_range");
    assert!(set_of(&state, Collection::Meetings, "E1", SetField::CheckedInUsers)
        .await
        .is_empty());
}

#[tokio::test]
async fn location_failure_stops_the_scan() {
    let state = setup().await;
    let denied = ReportedLocation::new(Err(LocationError::PermissionDenied));
    let err = scan(&state, "E1-checkin", &denied).await.expect_err("denied");
    assert!(matches!(
        err,
        ScanError::LocationUnavailable(LocationError::PermissionDenied)
    ));
}

#[tokio::test]
async fn malformed_and_unknown_payloads() {
    let state = setup().await;

    let err = scan(&state, "E1", &at_venue()).await.expect_err("no separator");
    assert_eq!(err.kind(), "malformed_scan");

    let err = scan(&state, "E1-attend", &at_venue()).await.expect_err("bad action");
    assert_eq!(err.kind(), "malformed_scan");

    let err = scan(&state, "E404-checkin", &at_venue()).await.expect_err("unknown");
    match err {
        ScanError::UnknownEvent(id) => assert_eq!(id, EventId::new("E404")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn anonymous_scan_is_rejected() {
    let state = setup().await;
    let err = scan_commands::process_scan(
        &state,
        "E1-checkin",
        &at_venue(),
        &SessionIdentity::anonymous(),
        None,
    )
    .await
    .expect_err("anonymous");
    assert!(matches!(err, ScanError::Unauthenticated));
}

#[tokio::test]
async fn concurrent_scan_for_same_user_is_refused() {
    let state = setup().await;
    let user = backend_domain::UserId::new("u1");
    let permit = state.scan_gate.try_acquire(&user).expect("permit");

    let err = scan(&state, "E1-checkin", &at_venue()).await.expect_err("busy");
    assert!(matches!(err, ScanError::ScanInProgress));

    drop(permit);
    scan(&state, "E1-checkin", &at_venue()).await.expect("after release");
}

/// Fails writes to user histories while `fail_history` is set.
struct FlakyHistoryStore {
    inner: JsonRecordStore,
    fail_history: AtomicBool,
}

#[async_trait]
impl RecordStore for FlakyHistoryStore {
    async fn read(&self, collection: Collection, key: &str) -> Result<Option<Document>> {
        self.inner.read(collection, key).await
    }

    async fn merge(&self, collection: Collection, key: &str, fields: Document) -> Result<()> {
        self.inner.merge(collection, key, fields).await
    }

    async fn array_union(&self, key: &str, field: SetField, value: &str) -> Result<()> {
        if field == SetField::EventsAttended && self.fail_history.load(Ordering::SeqCst) {
            return Err(anyhow!("users/{key} unavailable"));
        }
        self.inner.array_union(key, field, value).await
    }

    async fn array_remove(&self, key: &str, field: SetField, value: &str) -> Result<()> {
        self.inner.array_remove(key, field, value).await
    }

    async fn add_evaluation(&self, event_key: &str, evaluation: &Evaluation) -> Result<()> {
        self.inner.add_evaluation(event_key, evaluation).await
    }

    async fn list_evaluations(&self, event_key: &str) -> Result<Vec<Evaluation>> {
        self.inner.list_evaluations(event_key).await
    }

    async fn ping(&self) -> Result<()> {
        self.inner.ping().await
    }
}

#[tokio::test]
async fn partial_confirmation_converges_on_rescan() {
    let store = Arc::new(FlakyHistoryStore {
        inner: JsonRecordStore::in_memory(),
        fail_history: AtomicBool::new(true),
    });
    let state = setup_on(store.clone(), event_day()).await;

    scan(&state, "E1-checkin", &at_venue()).await.expect("checkin");
    let err = scan(&state, "E1-checkout", &at_venue()).await.expect_err("history write");
    assert_eq!(err.kind(), "record_write_error");
    assert_eq!(
        set_of(&state, Collection::Meetings, "E1", SetField::Attendees).await,
        vec!["u1"]
    );
    assert!(set_of(&state, Collection::Users, "u1", SetField::EventsAttended)
        .await
        .is_empty());
    let status = attendance_queries::attendance_status(
        &state,
        &EventId::new("E1"),
        &SessionIdentity::signed_in("u1"),
    )
    .await
    .expect("status");
    assert_eq!(status.state, AttendanceState::AttendanceConfirmed);
    assert!(!status.history_recorded);

    store.fail_history.store(false, Ordering::SeqCst);
    let outcome = scan(&state, "E1-checkout", &at_venue()).await.expect("rescan");
    assert_eq!(outcome.state, AttendanceState::AttendanceConfirmed);
    assert_eq!(
        set_of(&state, Collection::Meetings, "E1", SetField::Attendees).await,
        vec!["u1"]
    );
    assert_eq!(
        set_of(&state, Collection::Users, "u1", SetField::EventsAttended).await,
        vec!["E1"]
    );
}

fn submission() -> FeedbackSubmission {
    FeedbackSubmission {
        name: " Ana Cruz ".to_string(),
        course: "BSIT".to_string(),
        ratings: vec![Some(5); RATING_QUESTIONS],
        best_features: "Hands-on demos".to_string(),
        suggestions: String::new(),
        other_comments: String::new(),
        core_values: vec!["Integrity".to_string(), " Excellence ".to_string()],
    }
}

#[tokio::test]
async fn feedback_follows_confirmed_attendance() {
    let state = setup().await;
    let event = EventId::new("E1");
    let identity = SessionIdentity::signed_in("u1");

    let err = feedback_commands::submit_feedback(&state, &event, &identity, submission())
        .await
        .expect_err("not yet attended");
    assert!(matches!(err, AppError::BadRequest(_)));

    scan(&state, "E1-checkin", &at_venue()).await.expect("checkin");
    scan(&state, "E1-checkout", &at_venue()).await.expect("checkout");

    let status = attendance_queries::attendance_status(&state, &event, &identity)
        .await
        .expect("status");
    assert_eq!(status.state, AttendanceState::AttendanceConfirmed);
    assert_eq!(status.next_step, NextStep::Feedback);
    assert!(!status.feedback_submitted);
    assert!(status.history_recorded);

    let stored = feedback_commands::submit_feedback(&state, &event, &identity, submission())
        .await
        .expect("feedback");
    assert_eq!(stored.name, "Ana Cruz");
    assert_eq!(stored.core_values, vec!["Excellence", "Integrity"]);
    assert_eq!(stored.user_id, "u1");

    let status = attendance_queries::attendance_status(&state, &event, &identity)
        .await
        .expect("status");
    assert!(status.feedback_submitted);
    assert_eq!(status.next_step, NextStep::None);

    let err = feedback_commands::submit_feedback(&state, &event, &identity, submission())
        .await
        .expect_err("duplicate");
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn upsert_event_guards_attendance_sets() {
    let state = setup().await;
    let event = EventId::new("E2");

    let err = event_commands::upsert_event(
        &state,
        &event,
        document(json!({"attendees": ["u1"]})),
    )
    .await
    .expect_err("set field");
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = event_commands::upsert_event(&state, &event, document(json!({"name": "No date"})))
        .await
        .expect_err("missing date");
    assert!(matches!(err, AppError::BadRequest(_)));

    let created = event_commands::upsert_event(
        &state,
        &event,
        document(json!({
            "name": "Fair",
            "date": "2026-10-20",
            "latitude": VENUE.0,
            "longitude": VENUE.1,
        })),
    )
    .await
    .expect("create");
    assert_eq!(created.name, "Fair");

    let updated =
        event_commands::upsert_event(&state, &event, document(json!({"location": "Field"})))
            .await
            .expect("update");
    assert_eq!(updated.location.as_deref(), Some("Field"));
    assert_eq!(updated.name, "Fair");
}

#[tokio::test]
async fn first_time_attendee_gets_a_history() {
    let state = setup().await;
    assert!(state
        .record_store
        .read(Collection::Users, "fresh-user")
        .await
        .expect("read")
        .is_none());

    scan_as(&state, "fresh-user", "E1-checkin", &at_venue())
        .await
        .expect("checkin");
    let outcome = scan_as(&state, "fresh-user", "E1-checkout", &at_venue())
        .await
        .expect("checkout");
    assert_eq!(outcome.state, AttendanceState::AttendanceConfirmed);
    assert_eq!(outcome.next_step, NextStep::Feedback);

    assert_eq!(
        set_of(&state, Collection::Users, "fresh-user", SetField::EventsAttended).await,
        vec!["E1"]
    );
    let identity = SessionIdentity::signed_in("fresh-user");
    let status = attendance_queries::attendance_status(&state, &EventId::new("E1"), &identity)
        .await
        .expect("status");
    assert!(status.history_recorded);

    feedback_commands::submit_feedback(&state, &EventId::new("E1"), &identity, submission())
        .await
        .expect("feedback");
}

#[tokio::test]
async fn interest_toggles_without_touching_attendance() {
    let state = setup().await;
    let event = EventId::new("E1");
    let u1 = SessionIdentity::signed_in("u1");
    let u2 = SessionIdentity::signed_in("u2");

    interest_commands::set_interest(&state, &event, &u1, true)
        .await
        .expect("u1 interested");
    interest_commands::set_interest(&state, &event, &u1, true)
        .await
        .expect("repeat");
    let record = interest_commands::set_interest(&state, &event, &u2, true)
        .await
        .expect("u2 interested");
    assert_eq!(record.interested_users.len(), 2);

    let record = interest_commands::set_interest(&state, &event, &u1, false)
        .await
        .expect("u1 withdraws");
    assert!(!record.interested_users.contains("u1"));
    assert!(record.interested_users.contains("u2"));
    assert!(record.checked_in_users.is_empty());
    assert_eq!(
        set_of(&state, Collection::Meetings, "E1", SetField::InterestedUsers).await,
        vec!["u2"]
    );

    let err = interest_commands::set_interest(&state, &EventId::new("E9"), &u1, true)
        .await
        .expect_err("unknown event");
    assert!(matches!(err, AppError::NotFound(_)));
    let err = interest_commands::set_interest(&state, &event, &SessionIdentity::anonymous(), true)
        .await
        .expect_err("anonymous");
    assert!(matches!(err, AppError::Unauthorized));
}
