//! Integration tests for the rotation lifecycle: open, claim, roll over,
//! persist and reload.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use proptest::prelude::*;
use rotaday_core::{
    reconcile, BacklogAccrual, ClaimEngine, ClaimOutcome, Config, JsonFileStore, MemoryStore,
    Project, RandomSource, RotationSettings, SeededRandom, Session, SessionState, SqliteStore,
    StateStore, WeekNumbering,
};

fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

fn project(name: &str, quota: u32, worked: u32) -> Project {
    let mut p = Project::new(name, quota, true);
    p.worked_this_week = worked;
    p
}

fn state_with(projects: Vec<Project>) -> SessionState {
    let mut s = SessionState::empty(at("2025-03-12T09:00:00+00:00").with_timezone(&Utc));
    s.projects = projects;
    s
}

#[test]
fn two_project_scenario() {
    let engine = ClaimEngine::new(RotationSettings::default());
    let mut state = state_with(vec![project("A", 3, 0), project("B", 2, 0)]);
    assert_eq!(engine.weighted_pool(&state.projects), vec![0, 0, 0, 1, 1]);

    let today = at("2025-03-12T09:00:00+00:00").date_naive();
    let outcome = engine
        .auto_claim(&mut state, today, &mut SeededRandom::new(99))
        .unwrap();
    let ClaimOutcome::Claimed { project: winner } = outcome else {
        panic!("expected a claim");
    };
    let stored = state.project(&winner.id).unwrap();
    assert_eq!(stored.worked_this_week, 1);
    assert_eq!(stored.total_worked, 1);
}

#[test]
fn selection_converges_to_remaining_quota_ratio() {
    let engine = ClaimEngine::new(RotationSettings::default());
    let base = state_with(vec![project("A", 3, 0), project("B", 1, 0)]);
    let today = at("2025-03-12T09:00:00+00:00").date_naive();
    let mut rng = SeededRandom::new(2024);

    let trials = 4000;
    let mut a_wins = 0;
    for _ in 0..trials {
        let mut state = base.clone();
        match engine.auto_claim(&mut state, today, &mut rng).unwrap() {
            ClaimOutcome::Claimed { project } if project.name == "A" => a_wins += 1,
            ClaimOutcome::Claimed { .. } => {}
            other => panic!("unexpected outcome {other:?}"),
        }
    }
    let share = f64::from(a_wins) / f64::from(trials);
    assert!((0.72..0.78).contains(&share), "A won {share:.3} of draws");
}

#[test]
fn never_selects_project_without_remaining_quota() {
    let engine = ClaimEngine::new(RotationSettings::default());
    let base = state_with(vec![project("Done", 2, 2), project("Over", 1, 2), project("Open", 2, 0)]);
    let today = at("2025-03-12T09:00:00+00:00").date_naive();
    let mut rng = SeededRandom::new(5);
    for _ in 0..200 {
        let mut state = base.clone();
        let outcome = engine.auto_claim(&mut state, today, &mut rng).unwrap();
        assert!(matches!(outcome, ClaimOutcome::Claimed { ref project } if project.name == "Open"));
    }
}

#[test]
fn force_claim_goes_past_quota() {
    let now = at("2025-03-12T09:00:00+00:00");
    let mut session = Session::open(MemoryStore::new(), &Config::default(), now).unwrap();
    let b = session.add_project("B", Some(2), true, now).unwrap();
    session.force_claim(&b, now).unwrap();
    session.force_claim(&b, now).unwrap();
    let p = session.force_claim(&b, now).unwrap();
    assert_eq!(p.worked_this_week, 3);
    assert_eq!(p.total_worked, 3);
}

#[test]
fn week_boundary_accrues_quota_regardless_of_work() {
    let mut state = state_with(vec![project("A", 4, 4), project("B", 4, 0)]);
    let report = reconcile(
        &mut state,
        at("2025-03-17T08:00:00+00:00"),
        &WeekNumbering::Iso,
        BacklogAccrual::FullQuota,
    );
    assert!(report.rolled_over);
    for p in &state.projects {
        assert_eq!(p.backlog, 4);
        assert_eq!(p.worked_this_week, 0);
    }
}

#[test]
fn multi_week_gap_accrues_once() {
    let mut state = state_with(vec![project("A", 2, 0)]);
    reconcile(
        &mut state,
        at("2025-04-20T08:00:00+00:00"),
        &WeekNumbering::Iso,
        BacklogAccrual::FullQuota,
    );
    assert_eq!(state.projects[0].backlog, 2);
}

#[test]
fn json_store_round_trip_through_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let now = at("2025-03-12T09:00:00+00:00");

    let mut session = Session::open(JsonFileStore::new(&path), &Config::default(), now).unwrap();
    session.add_project("Novel", Some(3), true, now).unwrap();
    session.add_project("Garden", Some(2), false, now).unwrap();
    session.auto_claim(now, &mut SeededRandom::new(3)).unwrap();
    let (saved, _) = session.into_parts();

    let loaded = JsonFileStore::new(&path).load().unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert!(loaded.last_claimed_project.is_some());
}

#[test]
fn sqlite_store_round_trip() {
    let mut store = SqliteStore::open_memory().unwrap();
    let mut state = state_with(vec![project("A", 3, 1)]);
    state.last_claimed_project = Some(state.projects[0].clone());
    store.save(&state).unwrap();
    assert_eq!(store.load().unwrap(), Some(state));
}

#[test]
fn legacy_savefile_imports_and_reconciles() {
    let dir = tempfile::tempdir().unwrap();
    let legacy = dir.path().join("savefile.json");
    std::fs::write(
        &legacy,
        r#"{"Projects":[{"Name":"Game","DaysPerWeek":3,"Active":true,"DaysWorkedThisWeek":2,"DaysBehind":1,"TotalDaysWorked":9}],
            "LastUsage":"2025-03-14T20:00:00+00:00",
            "LastProject":{"Name":"Game","DaysPerWeek":3,"Active":true,"DaysWorkedThisWeek":2,"DaysBehind":1,"TotalDaysWorked":9}}"#,
    )
    .unwrap();

    let imported = JsonFileStore::read(&legacy).unwrap();
    let now = at("2025-03-17T09:00:00+00:00");
    let mut session = Session::open(MemoryStore::new(), &Config::default(), now).unwrap();
    let report = session.replace_state(imported, now).unwrap();
    assert!(report.rolled_over);
    let game = &session.state().projects[0];
    assert_eq!(game.backlog, 4);
    assert_eq!(game.worked_this_week, 0);
    assert_eq!(game.total_worked, 9);
    assert!(session.todays_project().is_none());
    assert_eq!(session.store().save_count(), 1);
}

/// Cycles through a fixed list of picks.
struct Cycle(Vec<usize>, usize);

impl RandomSource for Cycle {
    fn pick(&mut self, len: usize) -> usize {
        let v = self.0[self.1 % self.0.len()] % len;
        self.1 += 1;
        v
    }
}

#[test]
fn a_week_of_claims_stops_at_target() {
    let monday = at("2025-03-10T09:00:00+00:00");
    let mut session = Session::open(MemoryStore::new(), &Config::default(), monday).unwrap();
    session.add_project("A", Some(3), true, monday).unwrap();
    session.add_project("B", Some(3), true, monday).unwrap();

    let mut rng = Cycle(vec![0, 5, 2], 0);
    let mut claimed = 0;
    for day in 0..7 {
        let now = monday + Duration::days(day);
        if let ClaimOutcome::Claimed { .. } = session.auto_claim(now, &mut rng).unwrap() {
            claimed += 1;
        }
    }
    assert_eq!(claimed, 5);
    assert_eq!(session.state().worked_this_week(), 5);
    assert!(session.state().projects.iter().all(|p| p.worked_this_week <= 3));
}

proptest! {
    #[test]
    fn total_worked_grows_by_claim_count(claims in proptest::collection::vec(0usize..3, 0..40)) {
        let engine = ClaimEngine::new(RotationSettings::default());
        let mut state = state_with(vec![project("A", 1, 0), project("B", 2, 0), project("C", 0, 0)]);
        let before: Vec<u32> = state.projects.iter().map(|p| p.total_worked).collect();
        let today = at("2025-03-12T09:00:00+00:00").date_naive();
        let ids: Vec<String> = state.projects.iter().map(|p| p.id.clone()).collect();
        for &i in &claims {
            engine.force_claim(&mut state, &ids[i], today).unwrap();
        }
        for (i, p) in state.projects.iter().enumerate() {
            let n = claims.iter().filter(|&&c| c == i).count() as u32;
            prop_assert_eq!(p.total_worked, before[i] + n);
        }
    }

    #[test]
    fn reconcile_within_week_is_idempotent(
        quotas in proptest::collection::vec((0u32..7, 0u32..7, 0u32..20), 1..6),
        hours in 0i64..96,
    ) {
        let projects = quotas
            .iter()
            .map(|&(q, w, b)| {
                let mut p = project("P", q, w);
                p.backlog = b;
                p
            })
            .collect();
        let mut state = state_with(projects);
        // Monday 2025-03-10 plus up to four days stays in one ISO week.
        let first = at("2025-03-10T00:30:00+00:00") + Duration::hours(hours);
        reconcile(&mut state, first, &WeekNumbering::Iso, BacklogAccrual::FullQuota);
        let settled = state.projects.clone();
        let second = first + Duration::hours(1);
        let report = reconcile(&mut state, second, &WeekNumbering::Iso, BacklogAccrual::FullQuota);
        prop_assert!(!report.rolled_over);
        prop_assert_eq!(state.projects, settled);
    }

    #[test]
    fn backlog_never_shrinks_on_rollover(
        quotas in proptest::collection::vec((0u32..7, 0u32..10, 0u32..20), 1..6),
        shortfall in any::<bool>(),
    ) {
        let projects: Vec<Project> = quotas
            .iter()
            .map(|&(q, w, b)| {
                let mut p = project("P", q, w);
                p.backlog = b;
                p
            })
            .collect();
        let mut state = state_with(projects.clone());
        let accrual = if shortfall { BacklogAccrual::Shortfall } else { BacklogAccrual::FullQuota };
        reconcile(&mut state, at("2025-03-19T09:00:00+00:00"), &WeekNumbering::Iso, accrual);
        for (before, after) in projects.iter().zip(&state.projects) {
            prop_assert!(after.backlog >= before.backlog);
            prop_assert_eq!(after.worked_this_week, 0);
        }
    }
}
