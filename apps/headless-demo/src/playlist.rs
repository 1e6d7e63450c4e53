use glidekit::prelude::*;
use glidekit_testing::{FakeLazyList, ReorderTestRule};

const ROW_HEIGHT: f32 = 72.0;
const VIEWPORT_HEIGHT: f32 = 360.0;

pub fn run() {
    let songs: Vec<String> = (1..=12).map(|i| format!("Song {i}")).collect();
    let list = FakeLazyList::uniform(songs, ROW_HEIGHT, VIEWPORT_HEIGHT);
    let mut rule = ReorderTestRule::new(list);
    println!("before: {:?}", rule.list().items());

    // Drag the second song three rows down.
    rule.perform_touch_input(|scope| {
        if let Some(index) = scope.down(Offset::new(40.0, ROW_HEIGHT * 1.5)) {
            println!("picked up row {index}");
        }
        for (from, to) in scope.move_in_steps(Offset::new(0.0, ROW_HEIGHT * 3.0), 12) {
            println!("  moved {from} -> {to}");
        }
        scope.up();
    });
    println!("after drag: {:?}", rule.list().items());
    println!("keys: {:?}", rule.list().keys());

    // Hold the last visible song past the bottom edge so the list scrolls.
    rule.perform_touch_input(|scope| {
        scope.down(Offset::new(40.0, VIEWPORT_HEIGHT - ROW_HEIGHT / 2.0));
        scope.move_along(ROW_HEIGHT / 2.0);
    });
    rule.await_idle();
    println!(
        "auto-scrolled to {:.0}px, job active: {}",
        rule.list().scroll_offset(),
        rule.state().is_overscroll_job_active()
    );
    rule.perform_touch_input(|scope| scope.cancel());

    log::info!("Playlist order: {:?}", rule.list().items());
}
