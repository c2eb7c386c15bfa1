//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use spotter_core::{
  enrollment::{EnrollmentStatus, Rating},
  program::AssignmentStatus,
  store::{ScheduleStore, SlotStatus, TermQuery},
  term::{NewTerm, TermKind, TermStatus},
  workout::SetLog,
  Error as CoreError,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

/// Monday 2025-06-02, noon UTC.
fn now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
}

fn new_term(trainer: Uuid, kind: TermKind, capacity: u32) -> NewTerm {
  NewTerm {
    trainer_id: trainer,
    kind,
    start_at: now() + Duration::days(1),
    duration_min: 60,
    capacity,
  }
}

fn set(exercise: Uuid, number: u32, reps: u32) -> SetLog {
  SetLog {
    exercise_id:    exercise,
    set_number:     number,
    planned_reps:   Some(reps),
    actual_reps:    reps,
    planned_weight: Some(80.0),
    actual_weight:  82.5,
  }
}

fn assert_domain(err: Error, check: impl FnOnce(&CoreError) -> bool) {
  match err {
    Error::Core(ref core) if check(core) => {}
    other => panic!("unexpected error: {other:?}"),
  }
}

// ─── Term creation ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_term() {
  let s = store().await;
  let trainer = Uuid::new_v4();

  let term = s
    .create_term(new_term(trainer, TermKind::Group, 5), now())
    .await
    .unwrap();
  assert_eq!(term.status, TermStatus::Scheduled);
  assert_eq!(term.enrolled_count, 0);

  let fetched = s.get_term(term.term_id).await.unwrap().unwrap();
  assert_eq!(fetched, term);
}

#[tokio::test]
async fn get_term_missing_returns_none() {
  let s = store().await;
  assert!(s.get_term(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn create_term_rejects_past_start() {
  let s = store().await;
  let mut input = new_term(Uuid::new_v4(), TermKind::Group, 5);
  input.start_at = now() - Duration::hours(1);

  let err = s.create_term(input, now()).await.unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::StartInPast(_)));
}

#[tokio::test]
async fn create_term_rejects_individual_capacity_mismatch() {
  let s = store().await;
  let err = s
    .create_term(new_term(Uuid::new_v4(), TermKind::Individual, 3), now())
    .await
    .unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::IndividualCapacity(3)));
}

// ─── Booking ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn book_attaches_confirmed_enrollment() {
  let s = store().await;
  let term = s
    .create_term(new_term(Uuid::new_v4(), TermKind::Group, 5), now())
    .await
    .unwrap();
  let client = Uuid::new_v4();

  let enrollment = s.book(term.term_id, client, now()).await.unwrap();
  assert_eq!(enrollment.status, EnrollmentStatus::Confirmed);
  assert_eq!(enrollment.client_id, client);

  let fetched = s.get_term(term.term_id).await.unwrap().unwrap();
  assert_eq!(fetched.enrolled_count, 1);
}

#[tokio::test]
async fn book_unknown_term_errors() {
  let s = store().await;
  let err = s.book(Uuid::new_v4(), Uuid::new_v4(), now()).await.unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::TermNotFound(_)));
}

#[tokio::test]
async fn double_booking_rejected() {
  let s = store().await;
  let term = s
    .create_term(new_term(Uuid::new_v4(), TermKind::Group, 5), now())
    .await
    .unwrap();
  let client = Uuid::new_v4();

  s.book(term.term_id, client, now()).await.unwrap();
  let err = s.book(term.term_id, client, now()).await.unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::AlreadyEnrolled { .. }));

  // No capacity leak from the rejected attempt.
  let fetched = s.get_term(term.term_id).await.unwrap().unwrap();
  assert_eq!(fetched.enrolled_count, 1);
}

#[tokio::test]
async fn booking_after_start_rejected() {
  let s = store().await;
  let term = s
    .create_term(new_term(Uuid::new_v4(), TermKind::Group, 5), now())
    .await
    .unwrap();

  let err = s
    .book(term.term_id, Uuid::new_v4(), term.start_at + Duration::minutes(1))
    .await
    .unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::TermClosed(_)));
}

#[tokio::test]
async fn booking_full_term_rejected() {
  let s = store().await;
  let term = s
    .create_term(new_term(Uuid::new_v4(), TermKind::Group, 2), now())
    .await
    .unwrap();

  s.book(term.term_id, Uuid::new_v4(), now()).await.unwrap();
  s.book(term.term_id, Uuid::new_v4(), now()).await.unwrap();

  let err = s.book(term.term_id, Uuid::new_v4(), now()).await.unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::Full(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_bookings_never_overshoot_capacity() {
  let s = store().await;
  let capacity = 2u32;
  let term = s
    .create_term(new_term(Uuid::new_v4(), TermKind::Group, capacity), now())
    .await
    .unwrap();

  let mut handles = Vec::new();
  for _ in 0..6 {
    let s = s.clone();
    let term_id = term.term_id;
    handles.push(tokio::spawn(async move {
      s.book(term_id, Uuid::new_v4(), now()).await
    }));
  }

  let mut ok = 0;
  let mut full = 0;
  for handle in handles {
    match handle.await.unwrap() {
      Ok(_) => ok += 1,
      Err(Error::Core(CoreError::Full(_))) => full += 1,
      Err(other) => panic!("unexpected error: {other:?}"),
    }
  }

  assert_eq!(ok, capacity);
  assert_eq!(full, 6 - capacity);

  let fetched = s.get_term(term.term_id).await.unwrap().unwrap();
  assert_eq!(fetched.enrolled_count, capacity);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn individual_slot_race_admits_exactly_one() {
  let s = store().await;
  let term = s
    .create_term(new_term(Uuid::new_v4(), TermKind::Individual, 1), now())
    .await
    .unwrap();

  let a = {
    let s = s.clone();
    let id = term.term_id;
    tokio::spawn(async move { s.book(id, Uuid::new_v4(), now()).await })
  };
  let b = {
    let s = s.clone();
    let id = term.term_id;
    tokio::spawn(async move { s.book(id, Uuid::new_v4(), now()).await })
  };

  let results = [a.await.unwrap(), b.await.unwrap()];
  let ok = results.iter().filter(|r| r.is_ok()).count();
  let full = results
    .iter()
    .filter(|r| matches!(r, Err(Error::Core(CoreError::Full(_)))))
    .count();

  assert_eq!(ok, 1);
  assert_eq!(full, 1);
  let fetched = s.get_term(term.term_id).await.unwrap().unwrap();
  assert_eq!(fetched.enrolled_count, 1);
}

// ─── Cancellation ────────────────────────────────────────────────────────────

#[tokio::test]
async fn cancel_booking_frees_capacity_immediately() {
  let s = store().await;
  let term = s
    .create_term(new_term(Uuid::new_v4(), TermKind::Individual, 1), now())
    .await
    .unwrap();
  let first = Uuid::new_v4();
  let second = Uuid::new_v4();

  s.book(term.term_id, first, now()).await.unwrap();
  let canceled = s.cancel_booking(term.term_id, first, now()).await.unwrap();
  assert_eq!(canceled.status, EnrollmentStatus::CanceledByClient);

  // The slot reopens for another client at once.
  s.book(term.term_id, second, now()).await.unwrap();
  let fetched = s.get_term(term.term_id).await.unwrap().unwrap();
  assert_eq!(fetched.enrolled_count, 1);
}

#[tokio::test]
async fn rebooking_creates_a_fresh_enrollment() {
  let s = store().await;
  let term = s
    .create_term(new_term(Uuid::new_v4(), TermKind::Group, 5), now())
    .await
    .unwrap();
  let client = Uuid::new_v4();

  let first = s.book(term.term_id, client, now()).await.unwrap();
  s.cancel_booking(term.term_id, client, now()).await.unwrap();
  let second = s.book(term.term_id, client, now()).await.unwrap();

  // History preserved: a new row, not a resurrected one.
  assert_ne!(first.enrollment_id, second.enrollment_id);
  assert_eq!(second.status, EnrollmentStatus::Confirmed);
}

#[tokio::test]
async fn late_cancellation_blocked() {
  let s = store().await;
  let term = s
    .create_term(new_term(Uuid::new_v4(), TermKind::Group, 5), now())
    .await
    .unwrap();
  let client = Uuid::new_v4();
  s.book(term.term_id, client, now()).await.unwrap();

  // 30 minutes before start is inside the 60-minute lock-in.
  let late = term.start_at - Duration::minutes(30);
  let err = s.cancel_booking(term.term_id, client, late).await.unwrap_err();
  assert_domain(err, |e| {
    matches!(e, CoreError::CancellationWindowClosed { .. })
  });

  let fetched = s.get_term(term.term_id).await.unwrap().unwrap();
  assert_eq!(fetched.enrolled_count, 1);
}

#[tokio::test]
async fn cancellation_window_boundary() {
  let s = store().await;
  let term = s
    .create_term(new_term(Uuid::new_v4(), TermKind::Group, 5), now())
    .await
    .unwrap();
  let client = Uuid::new_v4();
  s.book(term.term_id, client, now()).await.unwrap();

  // Exactly 3600 seconds of lead time is still allowed.
  let at_window = term.start_at - Duration::seconds(3600);
  s.cancel_booking(term.term_id, client, at_window).await.unwrap();
}

#[tokio::test]
async fn cancel_booking_without_enrollment_errors() {
  let s = store().await;
  let term = s
    .create_term(new_term(Uuid::new_v4(), TermKind::Group, 5), now())
    .await
    .unwrap();

  let err = s
    .cancel_booking(term.term_id, Uuid::new_v4(), now())
    .await
    .unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::NotEnrolled { .. }));
}

#[tokio::test]
async fn trainer_cancel_cascades_confirmed_enrollments() {
  let s = store().await;
  let trainer = Uuid::new_v4();
  let term = s
    .create_term(new_term(trainer, TermKind::Group, 5), now())
    .await
    .unwrap();

  let clients = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
  for client in clients {
    s.book(term.term_id, client, now()).await.unwrap();
  }

  let affected = s.cancel_term(term.term_id, trainer).await.unwrap();
  assert_eq!(affected.len(), 3);
  for client in clients {
    assert!(affected.contains(&client));
  }

  let fetched = s.get_term(term.term_id).await.unwrap().unwrap();
  assert_eq!(fetched.status, TermStatus::Canceled);
  assert_eq!(fetched.enrolled_count, 0);

  // A canceled term accepts no further bookings.
  let err = s.book(term.term_id, Uuid::new_v4(), now()).await.unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::TermClosed(_)));
}

#[tokio::test]
async fn cancel_term_requires_owner() {
  let s = store().await;
  let term = s
    .create_term(new_term(Uuid::new_v4(), TermKind::Group, 5), now())
    .await
    .unwrap();

  let err = s.cancel_term(term.term_id, Uuid::new_v4()).await.unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::NotOwner { .. }));
}

#[tokio::test]
async fn cancel_term_twice_errors() {
  let s = store().await;
  let trainer = Uuid::new_v4();
  let term = s
    .create_term(new_term(trainer, TermKind::Group, 5), now())
    .await
    .unwrap();

  s.cancel_term(term.term_id, trainer).await.unwrap();
  let err = s.cancel_term(term.term_id, trainer).await.unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::AlreadyTerminal(_)));
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_terms_annotates_enrollment_and_fullness() {
  let s = store().await;
  let trainer = Uuid::new_v4();
  let viewer = Uuid::new_v4();

  let open = s
    .create_term(new_term(trainer, TermKind::Group, 2), now())
    .await
    .unwrap();
  let solo = s
    .create_term(new_term(trainer, TermKind::Individual, 1), now())
    .await
    .unwrap();

  s.book(open.term_id, viewer, now()).await.unwrap();
  s.book(solo.term_id, Uuid::new_v4(), now()).await.unwrap();

  let all = s.list_terms(&TermQuery::default(), viewer).await.unwrap();
  assert_eq!(all.len(), 2);

  let open_summary = all
    .iter()
    .find(|t| t.term.term_id == open.term_id)
    .unwrap();
  assert!(open_summary.is_enrolled);
  assert_eq!(open_summary.slot, SlotStatus::Free);

  let solo_summary = all
    .iter()
    .find(|t| t.term.term_id == solo.term_id)
    .unwrap();
  assert!(!solo_summary.is_enrolled);
  assert_eq!(solo_summary.slot, SlotStatus::Full);
}

#[tokio::test]
async fn list_terms_filters_by_kind_and_window() {
  let s = store().await;
  let trainer = Uuid::new_v4();

  s.create_term(new_term(trainer, TermKind::Group, 4), now())
    .await
    .unwrap();
  let mut later = new_term(trainer, TermKind::Individual, 1);
  later.start_at = now() + Duration::days(3);
  s.create_term(later, now()).await.unwrap();

  let query = TermQuery {
    kind: Some(TermKind::Individual),
    ..Default::default()
  };
  let individual = s.list_terms(&query, Uuid::new_v4()).await.unwrap();
  assert_eq!(individual.len(), 1);
  assert_eq!(individual[0].term.kind, TermKind::Individual);

  let query = TermQuery {
    from: Some(now() + Duration::days(2)),
    ..Default::default()
  };
  let windowed = s.list_terms(&query, Uuid::new_v4()).await.unwrap();
  assert_eq!(windowed.len(), 1);
  assert_eq!(windowed[0].term.kind, TermKind::Individual);
}

// ─── Workout completion ──────────────────────────────────────────────────────

#[tokio::test]
async fn finish_workout_completes_term_and_enrollment() {
  let s = store().await;
  let trainer = Uuid::new_v4();
  let client = Uuid::new_v4();
  let term = s
    .create_term(new_term(trainer, TermKind::Individual, 1), now())
    .await
    .unwrap();
  s.book(term.term_id, client, now()).await.unwrap();

  let squat = Uuid::new_v4();
  let started = term.start_at;
  let ended = started + Duration::minutes(55);
  let enrollment = s
    .finish_workout(
      term.term_id,
      client,
      started,
      ended,
      vec![set(squat, 1, 5), set(squat, 2, 5)],
    )
    .await
    .unwrap();

  assert_eq!(enrollment.status, EnrollmentStatus::Completed);
  assert_eq!(enrollment.attended_at, Some(ended));

  let fetched = s.get_term(term.term_id).await.unwrap().unwrap();
  assert_eq!(fetched.status, TermStatus::Completed);

  let logs = s.exercise_logs(term.term_id).await.unwrap();
  assert_eq!(logs.len(), 2);
  assert_eq!(logs[0].exercise_id, squat);
}

#[tokio::test]
async fn finish_twice_rejected_with_first_logs_intact() {
  let s = store().await;
  let client = Uuid::new_v4();
  let term = s
    .create_term(new_term(Uuid::new_v4(), TermKind::Individual, 1), now())
    .await
    .unwrap();
  s.book(term.term_id, client, now()).await.unwrap();

  let first = vec![set(Uuid::new_v4(), 1, 8)];
  let started = term.start_at;
  s.finish_workout(term.term_id, client, started, started + Duration::hours(1), first.clone())
    .await
    .unwrap();

  let err = s
    .finish_workout(
      term.term_id,
      client,
      started,
      started + Duration::hours(1),
      vec![set(Uuid::new_v4(), 1, 12)],
    )
    .await
    .unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::AlreadyCompleted(_)));

  let logs = s.exercise_logs(term.term_id).await.unwrap();
  assert_eq!(logs, first);
}

#[tokio::test]
async fn finish_requires_confirmed_enrollment() {
  let s = store().await;
  let term = s
    .create_term(new_term(Uuid::new_v4(), TermKind::Group, 5), now())
    .await
    .unwrap();

  let err = s
    .finish_workout(
      term.term_id,
      Uuid::new_v4(),
      term.start_at,
      term.start_at + Duration::hours(1),
      vec![],
    )
    .await
    .unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::NotEnrolled { .. }));

  // The failed call must not have completed the term.
  let fetched = s.get_term(term.term_id).await.unwrap().unwrap();
  assert_eq!(fetched.status, TermStatus::Scheduled);
}

#[tokio::test]
async fn finish_rejects_duplicate_sets_before_writing() {
  let s = store().await;
  let client = Uuid::new_v4();
  let term = s
    .create_term(new_term(Uuid::new_v4(), TermKind::Individual, 1), now())
    .await
    .unwrap();
  s.book(term.term_id, client, now()).await.unwrap();

  let bench = Uuid::new_v4();
  let err = s
    .finish_workout(
      term.term_id,
      client,
      term.start_at,
      term.start_at + Duration::hours(1),
      vec![set(bench, 1, 8), set(bench, 1, 8)],
    )
    .await
    .unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::DuplicateSet { .. }));

  assert!(s.exercise_logs(term.term_id).await.unwrap().is_empty());
  let fetched = s.get_term(term.term_id).await.unwrap().unwrap();
  assert_eq!(fetched.status, TermStatus::Scheduled);
}

// ─── Rating ──────────────────────────────────────────────────────────────────

async fn completed_session(
  s: &SqliteStore,
  trainer: Uuid,
  client: Uuid,
) -> Uuid {
  let term = s
    .create_term(new_term(trainer, TermKind::Individual, 1), now())
    .await
    .unwrap();
  s.book(term.term_id, client, now()).await.unwrap();
  s.finish_workout(
    term.term_id,
    client,
    term.start_at,
    term.start_at + Duration::hours(1),
    vec![set(Uuid::new_v4(), 1, 10)],
  )
  .await
  .unwrap();
  term.term_id
}

#[tokio::test]
async fn rate_completed_enrollment_once() {
  let s = store().await;
  let trainer = Uuid::new_v4();
  let client = Uuid::new_v4();
  let term_id = completed_session(&s, trainer, client).await;

  let pending = s.unrated(term_id).await.unwrap();
  assert_eq!(pending.len(), 1);
  assert_eq!(pending[0].client_id, client);

  let rated = s
    .rate(term_id, trainer, client, Rating::new(9).unwrap(), Some("solid".into()))
    .await
    .unwrap();
  assert_eq!(rated.rating.unwrap().value(), 9);

  assert!(s.unrated(term_id).await.unwrap().is_empty());

  let err = s
    .rate(term_id, trainer, client, Rating::new(2).unwrap(), None)
    .await
    .unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::AlreadyRated { .. }));
}

#[tokio::test]
async fn rate_requires_completed_enrollment() {
  let s = store().await;
  let trainer = Uuid::new_v4();
  let client = Uuid::new_v4();
  let term = s
    .create_term(new_term(trainer, TermKind::Group, 5), now())
    .await
    .unwrap();
  s.book(term.term_id, client, now()).await.unwrap();

  let err = s
    .rate(term.term_id, trainer, client, Rating::new(5).unwrap(), None)
    .await
    .unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::NotCompleted { .. }));
}

#[tokio::test]
async fn rate_requires_owner() {
  let s = store().await;
  let client = Uuid::new_v4();
  let term_id = completed_session(&s, Uuid::new_v4(), client).await;

  let err = s
    .rate(term_id, Uuid::new_v4(), client, Rating::new(5).unwrap(), None)
    .await
    .unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::NotOwner { .. }));
}

// ─── Weekly schedule ─────────────────────────────────────────────────────────

fn week_start_utc() -> DateTime<FixedOffset> {
  FixedOffset::east_opt(0)
    .unwrap()
    .with_ymd_and_hms(2025, 6, 2, 0, 0, 0)
    .unwrap()
}

#[tokio::test]
async fn weekly_schedule_shows_owned_and_booked_terms() {
  let s = store().await;
  let trainer = Uuid::new_v4();
  let client = Uuid::new_v4();

  let term = s
    .create_term(new_term(trainer, TermKind::Group, 5), now())
    .await
    .unwrap();
  s.book(term.term_id, client, now()).await.unwrap();

  let trainer_view = s
    .weekly_schedule(trainer, week_start_utc(), now())
    .await
    .unwrap();
  assert_eq!(trainer_view.len(), 1);
  assert_eq!(trainer_view[0].day, 1); // Tuesday

  let client_view = s
    .weekly_schedule(client, week_start_utc(), now())
    .await
    .unwrap();
  assert_eq!(client_view.len(), 1);
  assert!(client_view[0].cancelable);

  let stranger_view = s
    .weekly_schedule(Uuid::new_v4(), week_start_utc(), now())
    .await
    .unwrap();
  assert!(stranger_view.is_empty());
}

#[tokio::test]
async fn weekly_schedule_is_idempotent() {
  let s = store().await;
  let trainer = Uuid::new_v4();
  for _ in 0..3 {
    s.create_term(new_term(trainer, TermKind::Group, 5), now())
      .await
      .unwrap();
  }

  let first = s
    .weekly_schedule(trainer, week_start_utc(), now())
    .await
    .unwrap();
  let second = s
    .weekly_schedule(trainer, week_start_utc(), now())
    .await
    .unwrap();
  assert_eq!(first, second);
  assert_eq!(first.len(), 3);
}

// ─── Program assignments ─────────────────────────────────────────────────────

#[tokio::test]
async fn assignment_lifecycle() {
  let s = store().await;
  let client = Uuid::new_v4();
  let program = Uuid::new_v4();

  let assignment = s
    .assign_program_to_client(program, client, now())
    .await
    .unwrap();
  assert_eq!(assignment.status, AssignmentStatus::Active);

  let listed = s.client_assignments(client).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0], assignment);

  let paused = s
    .set_assignment_status(assignment.assignment_id, AssignmentStatus::Paused)
    .await
    .unwrap();
  assert_eq!(paused.status, AssignmentStatus::Paused);

  let err = s
    .set_assignment_status(Uuid::new_v4(), AssignmentStatus::Canceled)
    .await
    .unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::AssignmentNotFound(_)));
}

#[tokio::test]
async fn assign_program_to_term_requires_owner() {
  let s = store().await;
  let trainer = Uuid::new_v4();
  let term = s
    .create_term(new_term(trainer, TermKind::Group, 5), now())
    .await
    .unwrap();
  let program = Uuid::new_v4();

  let err = s
    .assign_program(term.term_id, Uuid::new_v4(), program)
    .await
    .unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::NotOwner { .. }));

  let updated = s
    .assign_program(term.term_id, trainer, program)
    .await
    .unwrap();
  assert_eq!(updated.program_id, Some(program));
}

#[tokio::test]
async fn assign_program_rejected_on_terminal_term() {
  let s = store().await;
  let trainer = Uuid::new_v4();
  let term = s
    .create_term(new_term(trainer, TermKind::Group, 5), now())
    .await
    .unwrap();
  s.cancel_term(term.term_id, trainer).await.unwrap();

  let err = s
    .assign_program(term.term_id, trainer, Uuid::new_v4())
    .await
    .unwrap_err();
  assert_domain(err, |e| matches!(e, CoreError::AlreadyTerminal(_)));
}
