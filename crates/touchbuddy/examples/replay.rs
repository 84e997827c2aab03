//! Replay a TOML touch script and print each frame's events as JSON.
//!
//! ```text
//! RUST_LOG=touchbuddy=debug cargo run -p touchbuddy --example replay -- script.toml
//! ```
//!
//! Without an argument the bundled `drag_then_pinch.toml` fixture is used.

use std::error::Error;
use std::path::PathBuf;

use serde_json::json;
use touchbuddy::{InputHelper, TouchComponent, TouchInput};
use touchbuddy_test::{ScriptedTouchPanel, TouchScript, FIXTURE_DIR};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(FIXTURE_DIR).join("drag_then_pinch.toml"), PathBuf::from);
    let script = TouchScript::from_path(&path)?;

    let mut panel = ScriptedTouchPanel::new();
    script.load_into(&mut panel);
    let mut touch = TouchComponent::new(panel);

    for (index, frame) in script.frames.iter().enumerate() {
        touch.update(&frame.active);

        let events = json!({
            "frame": index,
            "active": frame.active,
            "clicks": touch.clicks(),
            "highlights": touch.highlights(),
            "drags": touch.drags(),
            "drops": touch.drops(),
            "flicks": touch.flicks(),
            "pinches": touch.pinches(),
        });
        println!("{}", serde_json::to_string(&events)?);
    }

    Ok(())
}
