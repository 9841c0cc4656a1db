//! Spinning button demo.
//!
//! Clicks a button, lets it spin for a few frames, and waits for the
//! three-second timeout to stop it. Frames are printed as they change.
//!
//! Run with: RUST_LOG=tether=debug cargo run -p tether --example spinner_demo

use std::sync::Arc;

use tether::prelude::*;
use tether::render::{SpinnerGraphic, SvgSpinnerRenderer};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let event_loop = EventLoop::new();

    // The idle icon is the spinner itself, drawn upright.
    let idle = SvgSpinnerRenderer::new(SpinnerGraphic::default_spinner()).render_frame(
        0.0,
        IconSize::default(),
        1.0,
    );

    let button = Arc::new(
        SpinningButton::builder("testing")
            .enabled_icon(idle)
            .timeout_secs(3)
            .build(&event_loop)?,
    );

    button.started_spinning().connect(|_| println!("signal_started_spinning"));
    let loop_handle = event_loop.clone();
    button.stopped_spinning().connect(move |_| {
        println!("signal_stopped_spinning");
        loop_handle.quit();
    });

    let frames = Timer::new(&event_loop);
    let weak = Arc::downgrade(&button);
    frames.timeout().connect(move |_| {
        if let Some(button) = weak.upgrade() {
            if button.take_repaint() {
                println!("frame at {:>3} degrees", button.rotation_angle());
            }
        }
    });
    frames.start_with(std::time::Duration::from_millis(500));

    println!("size hint: {:?}", button.size_hint().preferred);
    button.click();

    let delivered = event_loop.run();
    println!("{delivered} timer callbacks delivered");
    Ok(())
}
