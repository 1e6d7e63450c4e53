//! Scripted, headless walkthrough of both controllers.
//!
//! Run with:
//! ```bash
//! RUST_LOG=debug cargo run --package headless-demo
//! ```

mod playlist;
mod shorts;

fn main() {
    #[cfg(feature = "logging")]
    let _ = env_logger::try_init();

    println!("=== Playlist reorder ===");
    playlist::run();

    println!("\n=== Shorts pager ===");
    shorts::run();
}
