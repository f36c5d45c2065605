//! Headless driver for the dot field simulation
//!
//! Run with: cargo run --bin dot-field-cli --features cli
//!
//! Environment:
//! - DOT_FIELD_CONFIG: JSON options object (camelCase keys)
//! - DOT_FIELD_SIZE: surface size as WxH (default 300x300)
//! - DOT_FIELD_SEED: phase seed (default: OS entropy)
//! - DOT_FIELD_FRAMES: stop after this many frames (default: until Ctrl-C)

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use dot_field::core::config::parse_surface_size;
    use dot_field::core::{DotField, DotFieldConfig, RecordingPainter};
    use dot_field::time::now_millis;
    use std::time::Duration;
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};

    const FRAME_INTERVAL: Duration = Duration::from_millis(16);
    const RIPPLE_EVERY_MS: f64 = 1500.0;
    const ORBIT_PERIOD_MS: f64 = 4000.0;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dot_field=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = match std::env::var("DOT_FIELD_CONFIG") {
        Ok(json) => DotFieldConfig::from_json(&json)?,
        Err(_) => DotFieldConfig::default(),
    };
    let (width, height) = match std::env::var("DOT_FIELD_SIZE") {
        Ok(value) => parse_surface_size(&value).unwrap_or_else(|| {
            warn!(value = %value, "Invalid DOT_FIELD_SIZE, using 300x300");
            (300.0, 300.0)
        }),
        Err(_) => (300.0, 300.0),
    };
    let max_frames: Option<u64> = std::env::var("DOT_FIELD_FRAMES")
        .ok()
        .and_then(|v| v.parse().ok());

    let mut field = match std::env::var("DOT_FIELD_SEED").ok().and_then(|v| v.parse().ok()) {
        Some(seed) => DotField::with_seed(config, seed)?,
        None => DotField::from_entropy(config)?,
    };
    field.resize(width, height);
    field.start();

    info!(
        width,
        height,
        dots = field.dots().len(),
        color = %field.dot_color(),
        "Dot field ready"
    );

    let mut painter = RecordingPainter::new();
    let mut frame_interval = tokio::time::interval(FRAME_INTERVAL);
    let mut stats_interval = tokio::time::interval(Duration::from_secs(1));
    let mut frames = 0u64;
    let mut frames_last_interval = 0u64;
    let mut last_ripple = now_millis();
    let mut peak = 0.0f64;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                let now = now_millis();

                // Sweep the pointer around the surface center
                let angle = now / ORBIT_PERIOD_MS * std::f64::consts::TAU;
                let radius = width.min(height) * 0.35;
                let (x, y) = (width / 2.0 + radius * angle.cos(), height / 2.0 + radius * angle.sin());
                field.pointer_move(x, y, 0.0, 0.0);

                if now - last_ripple >= RIPPLE_EVERY_MS {
                    field.pointer_down(x, y, now);
                    field.pointer_up();
                    last_ripple = now;
                }

                painter.reset();
                let Some(stats) = field.render_frame(now, &mut painter) else {
                    break;
                };
                peak = peak.max(stats.peak_influence);
                frames += 1;
                frames_last_interval += 1;

                if max_frames.is_some_and(|max| frames >= max) {
                    field.stop();
                }
            }
            _ = stats_interval.tick() => {
                info!(
                    frames,
                    fps = frames_last_interval,
                    draw_calls = painter.commands().len(),
                    rings = painter.stroke_count(),
                    ripples = field.ripples().len(),
                    peak_influence = format!("{:.2}", peak),
                    "stats"
                );
                frames_last_interval = 0;
                peak = 0.0;
            }
            _ = &mut ctrl_c => {
                warn!("Interrupted");
                field.stop();
                break;
            }
        }
    }

    info!(frames, state = ?field.state(), "Dot field finished");
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
