use std::thread;
use std::time::Duration;

use glidekit::prelude::*;
use glidekit_testing::PagerTestRule;

const SCREEN_HEIGHT: f32 = 1920.0;

pub fn run() {
    let videos = [
        "https://example.com/shorts/aurora.mp4",
        "https://example.com/shorts/surf.mp4",
        "https://example.com/shorts/ramen.mp4",
        "https://example.com/shorts/skate.mp4",
        "https://example.com/shorts/city.mp4",
    ];
    let state = PagerState::new(1, 0, videos.len() as i32 - 1);
    let config = PagerConfig::new()
        .orientation(Orientation::Vertical)
        .off_screen_limit(1);
    let mut rule = PagerTestRule::new(state, config, SCREEN_HEIGHT);
    print_page(&rule, &videos);

    let swipes = [
        ("quick flick up", -700.0, 120),
        ("slow half drag up", -900.0, 600),
        ("short nudge down", 300.0, 150),
        ("flick down", 1500.0, 200),
        ("flick down", 1500.0, 200),
        ("flick down at top", 1500.0, 200),
    ];
    for (label, distance, millis) in swipes {
        let outcome = rule.swipe(distance, millis);
        println!(
            "{label}: {distance:+}px in {millis}ms -> {outcome:?} after {} frames",
            rule.clock().frame_count()
        );
        print_page(&rule, &videos);
    }

    // A drag paced in real time, with velocity from wall-clock samples.
    let velocity = {
        let handler = rule.handler();
        let mut tracker = VelocityTracker::new();
        let mut position = 0.0;
        handler.on_drag_started();
        tracker.add_position_now(position);
        for _ in 0..8 {
            thread::sleep(Duration::from_millis(8));
            position -= 90.0;
            handler.on_drag(-90.0);
            tracker.add_position_now(position);
        }
        tracker.calculate_velocity()
    };
    rule.release(velocity);
    rule.await_idle();
    println!("paced drag: {velocity:.0}px/s -> {:?}", rule.last_outcome());
    print_page(&rule, &videos);
}

fn print_page(rule: &PagerTestRule, videos: &[&str]) {
    let page = rule.state().current_page();
    let url = usize::try_from(page)
        .ok()
        .and_then(|index| videos.get(index))
        .copied()
        .unwrap_or("<none>");
    let scope = PagerScope::new(rule.state().clone(), page);
    println!(
        "  page {page} ({url}), position {:.2}, {:?}",
        scope.page_position(),
        rule.state().selection_state()
    );
}
