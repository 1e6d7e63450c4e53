use futures::executor::LocalPool;
use futures::future::abortable;
use futures::task::LocalSpawnExt;
use glidekit_animation::{FrameClock, TweenSpec};
use glidekit_foundation::pager::{FlingOutcome, PagerConfig, PagerState, SelectionState};
use glidekit_testing::{PagerTestRule, TestFrameClock};

const PAGE: f32 = 1000.0;

fn pager(current: i32, max: i32) -> PagerTestRule {
    PagerTestRule::new(PagerState::new(current, 0, max), PagerConfig::new(), PAGE)
}

#[test]
fn swipe_up_and_down_between_pages() {
    let mut rule = pager(0, 4);
    assert_eq!(rule.swipe(-600.0, 150), Some(FlingOutcome::Settled { page: 1 }));
    assert_eq!(rule.swipe(-700.0, 150), Some(FlingOutcome::Settled { page: 2 }));
    assert_eq!(rule.swipe(650.0, 150), Some(FlingOutcome::Settled { page: 1 }));
    assert_eq!(rule.state().current_page_offset(), 0.0);
    assert_eq!(rule.state().selection_state(), SelectionState::Selected);
}

#[test]
fn short_swipe_returns_to_current_page() {
    let mut rule = pager(2, 4);
    assert_eq!(rule.swipe(-300.0, 400), Some(FlingOutcome::Settled { page: 2 }));
    assert_eq!(rule.swipe(450.0, 400), Some(FlingOutcome::Settled { page: 2 }));
}

#[test]
fn swipe_past_first_page_is_blocked() {
    let mut rule = pager(0, 2);
    let velocity = rule.perform_swipe(800.0, 100);
    assert!(velocity > 0.0);
    assert_eq!(rule.state().current_page_offset(), 0.0);
    rule.await_idle();
    assert_eq!(rule.last_outcome(), Some(FlingOutcome::Blocked));
    assert_eq!(rule.state().current_page(), 0);
    assert_eq!(rule.state().selection_state(), SelectionState::Selected);
    assert_eq!(rule.clock().frame_count(), 0);
}

#[test]
fn swipe_past_last_page_is_blocked() {
    let mut rule = pager(2, 2);
    assert_eq!(rule.swipe(-800.0, 100), Some(FlingOutcome::Blocked));
    assert_eq!(rule.state().current_page(), 2);
    assert_eq!(rule.state().selection_state(), SelectionState::Selected);
}

#[test]
fn single_drag_is_limited_to_off_screen_limit() {
    let config = PagerConfig::new().off_screen_limit(1);
    let mut rule = PagerTestRule::new(PagerState::new(2, 0, 5), config, PAGE);
    rule.drag_by(-5000.0);
    assert_eq!(rule.state().current_page_offset(), -1.0);
    rule.release(0.0);
    rule.await_idle();
    assert_eq!(rule.last_outcome(), Some(FlingOutcome::Settled { page: 3 }));
}

#[test]
fn new_drag_cancels_running_settle() {
    let mut rule = pager(0, 4);
    rule.drag_by(-600.0);
    rule.release(-3000.0);
    assert!(rule.state().is_settling());
    assert_eq!(rule.last_outcome(), None);

    rule.drag_by(-100.0);
    assert!(!rule.state().is_settling());
    assert_eq!(rule.state().selection_state(), SelectionState::Undecided);

    rule.advance_frame();
    assert_eq!(rule.last_outcome(), Some(FlingOutcome::Cancelled));
    assert_eq!(rule.state().current_page(), 0);
    assert_eq!(rule.state().current_page_offset(), -0.7);
    assert_eq!(rule.state().selection_state(), SelectionState::Undecided);

    rule.release(-3000.0);
    rule.await_idle();
    assert_eq!(rule.last_outcome(), Some(FlingOutcome::Settled { page: 1 }));
    assert_eq!(rule.state().selection_state(), SelectionState::Selected);
}

#[test]
fn settle_runs_frame_by_frame() {
    let config = PagerConfig::new().settle_spec(TweenSpec::new(100));
    let mut rule = PagerTestRule::new(PagerState::new(1, 0, 3), config, PAGE);
    rule.drag_by(-800.0);
    rule.release(-2000.0);

    let mut offsets = vec![rule.state().current_page_offset()];
    while rule.clock().has_pending_frame_requests() {
        rule.advance_frame();
        offsets.push(rule.state().current_page_offset());
    }
    // The final frame commits page 2 and resets the offset.
    assert_eq!(offsets.pop(), Some(0.0));
    assert!(offsets.len() > 3);
    assert!(offsets.windows(2).all(|pair| pair[1] <= pair[0]));
    assert!(offsets.iter().all(|offset| (-1.0..=-0.8).contains(offset)));
    assert_eq!(rule.last_outcome(), Some(FlingOutcome::Settled { page: 2 }));
}

#[test]
fn selection_page_commits_when_aborted() {
    let state = PagerState::new(3, 0, 6);
    let clock = TestFrameClock::default();
    let mut pool = LocalPool::new();

    let task_state = state.clone();
    let task_clock = clock.clone();
    let (task, handle) = abortable(async move {
        task_state
            .selection_page(|pager| async move {
                pager.snap_to_offset(-0.8);
                loop {
                    task_clock.next_frame().await;
                }
            })
            .await
    });
    pool.spawner()
        .spawn_local(async move {
            let _ = task.await;
        })
        .unwrap();
    pool.run_until_stalled();
    assert_eq!(state.selection_state(), SelectionState::Undecided);

    handle.abort();
    pool.run_until_stalled();
    assert_eq!(state.current_page(), 4);
    assert_eq!(state.current_page_offset(), 0.0);
    assert_eq!(state.selection_state(), SelectionState::Selected);
}

#[test]
fn random_swipes_always_end_selected() {
    let mut rule = pager(3, 6);
    let swipes = [
        (-1500.0, 80),
        (200.0, 500),
        (900.0, 90),
        (-2600.0, 300),
        (2600.0, 300),
        (-10.0, 16),
        (4000.0, 120),
        (4000.0, 120),
        (4000.0, 120),
        (4000.0, 120),
    ];
    for (distance, millis) in swipes {
        let outcome = rule.swipe(distance, millis);
        assert!(outcome.is_some());
        let state = rule.state();
        assert_eq!(state.selection_state(), SelectionState::Selected);
        assert_eq!(state.current_page_offset(), 0.0);
        assert!((state.min_page()..=state.max_page()).contains(&state.current_page()));
    }
    assert_eq!(rule.state().current_page(), 0);
}
