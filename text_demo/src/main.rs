//! Headless text demo
//!
//! Flies a camera away from a floating name tag and logs how the tag's scale
//! and alpha respond, while a second thread keeps rewriting the tag's text.
//!
//! Run with `RUST_LOG=debug cargo run -p text_demo [style.toml]`.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bitmap_text::font::FontError;
use bitmap_text::foundation::logging;
use bitmap_text::prelude::*;

const DEFAULT_STYLE: &str = "text_demo/assets/hud_style.toml";
const VIEWPORT_HEIGHT: f32 = 720.0;
const FRAMES: usize = 24;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Text(#[from] TextError),

    #[error("updater thread panicked")]
    Updater,
}

/// Logs every change the tag reports
struct TagLogger;

impl TextChangeListener for TagLogger {
    fn text_size_changed(&self, source: &str, size: Vec2) {
        log::debug!("{} resized to {:.0} x {:.0} px", source, size.x, size.y);
    }

    fn text_alpha_changed(&self, source: &str, alpha: f32) {
        log::info!("{} alpha -> {:.3}", source, alpha);
    }
}

fn load_style(path: &str) -> Result<TextStyleConfig, ConfigError> {
    let style = TextStyleConfig::load_from_file(path)?;
    style.validate()?;
    Ok(style)
}

fn main() -> Result<(), DemoError> {
    logging::init();

    let style_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_STYLE.to_string());
    let style = match load_style(&style_path) {
        Ok(style) => {
            log::info!("Loaded text style from {}", style_path);
            style
        }
        Err(err) => {
            log::warn!("Could not load style {} ({}), using defaults", style_path, err);
            TextStyleConfig::default()
        }
    };

    let font: SharedFont = Arc::new(BitmapFont::from_descriptor(FontDescriptor::ascii_grid(
        "demo-mono",
        24.0,
        12.0,
        24.0,
    ))?);

    let mut tag = BitmapText::new("name_tag", "Player One\nHP 100", Some(font))?;
    style.apply_to(&mut tag)?;
    tag.transform_mut().translation = Vec3::new(0.0, 2.0, 0.0);
    tag.add_change_listener(Arc::new(TagLogger));

    let tag = SharedBitmapText::new(tag);
    let updater = {
        let tag = tag.clone();
        thread::spawn(move || -> TextResult<()> {
            for hp in (0..=100).rev().step_by(10) {
                tag.set_text(&format!("Player One\nHP {hp}"))?;
                thread::sleep(Duration::from_millis(2));
            }
            Ok(())
        })
    };

    let mut camera = Camera::perspective(Vec3::new(0.0, 3.0, 5.0), 60.0, 0.1, 500.0);
    camera.look_at(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    let mut sink = RecordingSink::default();

    for frame in 0..FRAMES {
        let distance = 5.0 + frame as f32 * 5.0;
        camera.set_position(Vec3::new(0.0, 3.0, distance));
        let snapshot = CameraSnapshot::from_camera(&camera, VIEWPORT_HEIGHT);

        let drawn = tag.draw(&snapshot, &mut sink)?;
        let (scale, alpha, lines) = tag.with(|t| (t.transform().scale().x, t.tint().w, t.line_count()))?;
        log::info!(
            "frame {:2}: distance {:5.1} scale {:.5} alpha {:.3} lines {} {}",
            frame,
            distance,
            scale,
            alpha,
            lines,
            if drawn { "drawn" } else { "hidden" }
        );
        thread::sleep(Duration::from_millis(1));
    }

    updater.join().map_err(|_| DemoError::Updater)??;

    let vertices: usize = sink.draws.iter().map(|d| d.vertex_count()).sum();
    log::info!(
        "Submitted {} draw calls, {} vertices; final text {:?}",
        sink.draws.len(),
        vertices,
        tag.with(|t| t.text().to_string())?
    );
    Ok(())
}
