// What you SEE:
// • A field of cyan dots drifting across the window, bouncing off the edges.
// • Dots closer than 100 px are joined by faint lines that fade with distance.
// • Moving the mouse near dots shoves them a little.
// • Resizing the window reseeds the field (30 dots below 768 px wide, else 50).
// • T toggles light/dark, R removes the backdrop image, H hides the HUD. ESC quits.
//
// Flags: --width N --height N --fps N --seed N --backdrop PATH
// Logging: RUST_LOG=debug for FPS and resize detail.

mod backdrop;
mod canvas;
mod config;
mod draw;
mod error;
mod field;
mod gamma;
mod hud;
mod scheduler;
mod theme;
mod types;

use backdrop::Backdrop;
use canvas::Canvas;
use config::AppConfig;
use draw::{Drawer, Painter};
use error::Error;
use field::FieldSimulator;
use hud::Hud;
use rand::SeedableRng;
use rand::rngs::StdRng;
use scheduler::{FrameLoop, FrameScheduler};
use std::time::Instant;
use theme::Theme;
use types::Surface;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let cfg = AppConfig::from_args(&args)?;

    /* --- Window + raster --- */
    let mut drawer = Drawer::new("Particle Field", cfg.width, cfg.height, cfg.fps)?;
    let mut surface = drawer.surface().unwrap_or(Surface::new(cfg.width, cfg.height));
    log::info!("window open at {}x{}, {} fps target", surface.width, surface.height, cfg.fps);

    let mut theme = Theme::default();
    let mut painter = Painter::new(surface, theme.background());

    /* --- Backdrop: a bad file is reported and skipped, never fatal --- */
    let mut backdrop = cfg.backdrop.as_deref().and_then(|path| match Backdrop::load(path) {
        Ok(b) => Some(b),
        Err(e) => {
            log::warn!("{e}");
            None
        }
    });
    if let Some(b) = &backdrop {
        painter.set_backdrop(Some(b.fit(surface)));
    }

    /* --- Field: without a surface it stays off and gets no events --- */
    let rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut field = FieldSimulator::initialize(drawer.surface(), cfg.field, rng);

    let mut hud = Hud::new();
    let mut generation = 0;

    /* ------------------------------ Main loop ------------------------------ */
    let mut frames = FrameLoop::new();
    frames.request_frame();
    let mut last_frame_time = Instant::now();

    while drawer.is_open() && !drawer.esc_pressed() && frames.next_frame() {
        let now = Instant::now();
        let dt = now - last_frame_time;
        last_frame_time = now;

        /* 1) Host events: keys, resize, pointer */
        if drawer.t_pressed_once() {
            theme = theme.toggle();
            painter.set_background(theme.background());
            log::info!("{} theme activated", if theme.is_light() { "Light" } else { "Dark" });
        }
        if drawer.r_pressed_once() && backdrop.take().is_some() {
            painter.set_backdrop(None);
            log::info!("backdrop removed");
        }
        if drawer.h_pressed_once() {
            hud.toggle_visible();
        }

        if let Some(now_surface) = drawer.surface() {
            if now_surface != surface {
                surface = now_surface;
                painter.resize(surface);
                if let Some(b) = &backdrop {
                    painter.set_backdrop(Some(b.fit(surface)));
                }
                if let Some(f) = field.as_mut() {
                    f.on_resize(surface);
                }
            }
        }

        if let (Some(f), Some((x, y))) = (field.as_mut(), drawer.mouse_pos()) {
            f.on_pointer_move(x, y);
        }

        /* 2) Simulate + draw; the field re-arms the loop itself */
        match field.as_mut() {
            Some(f) => {
                f.step(&mut painter, &mut frames);
                if f.generation() != generation {
                    generation = f.generation();
                    hud.restart_count(f.particles().len());
                }
            }
            None => {
                painter.clear();
                frames.request_frame();
            }
        }

        /* 3) HUD on top, then present */
        hud.frame(dt);
        hud.render(painter.frame_mut(), theme);
        drawer.present(painter.frame())?;
    }

    frames.stop();
    log::info!("closing after {} frames", frames.frames());
    Ok(())
}
