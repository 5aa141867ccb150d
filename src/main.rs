use log::{error, info};
use on_map_troops::data::Database;
use on_map_troops::render::{CanvasLabel, LabelStyle, SdlOverlayLayer};
use on_map_troops::{DisplayOptions, OverlayContext, Spriteset};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use std::path::PathBuf;

// Screen constants
const GAME_WIDTH: u32 = 960;
const GAME_HEIGHT: u32 = 528;
const TILE_SIZE: u32 = 48;
const MAP_ID: u32 = 1;

/// How far a sprite wanders from its home tile, in pixels
const WANDER_RADIUS: f32 = 20.0;

/// Home position and wander phase for each event sprite
struct Wander {
    event_id: u32,
    home: (i32, i32),
    phase: f32,
}

fn draw_sprites(
    canvas: &mut Canvas<Window>,
    spriteset: &Spriteset<CanvasLabel>,
) -> Result<(), String> {
    for sprite in spriteset.iter() {
        let bounds = sprite.bounds;
        let color = if sprite.anchor().encounter().is_some() {
            Color::RGB(170, 40, 60) // Encounters
        } else {
            Color::RGB(60, 120, 200) // Everyone else
        };

        canvas.set_draw_color(color);
        canvas.fill_rect(Rect::new(
            bounds.x - bounds.width as i32 / 2,
            bounds.y - bounds.height as i32,
            bounds.width,
            bounds.height,
        ))?;
    }

    // Overlays go on top of every sprite
    for sprite in spriteset.iter() {
        if let Some(window) = sprite.anchor().window() {
            window.surface().render(canvas)?;
        }
    }

    Ok(())
}

fn run() -> Result<(), String> {
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    let database = Database::load_dir(&data_dir, MAP_ID).map_err(|e| e.to_string())?;
    let options = DisplayOptions::load(data_dir.join("plugins.json")).unwrap_or_else(|e| {
        info!("Using default display options ({})", e);
        DisplayOptions::default()
    });

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let window = video_subsystem
        .window("On Map Troops", GAME_WIDTH, GAME_HEIGHT)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    let mut event_pump = sdl_context.event_pump()?;

    let mut layer = SdlOverlayLayer::new(LabelStyle::default());
    let ctx = OverlayContext::new(&database, &options);

    let mut spriteset: Spriteset<CanvasLabel> = Spriteset::from_events(&database, TILE_SIZE);
    let wanders: Vec<Wander> = spriteset
        .iter()
        .map(|sprite| Wander {
            event_id: sprite.event_id,
            home: (sprite.bounds.x, sprite.bounds.y),
            phase: sprite.event_id as f32 * 1.7,
        })
        .collect();

    info!("Spawned {} event sprites", spriteset.len());

    let mut frame: u64 = 0;

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::KeyDown {
                    keycode: Some(Keycode::R),
                    ..
                } => {
                    let redrawn = spriteset.refresh_overlays(&ctx);
                    info!("Refreshed overlays ({} redrawn)", redrawn);
                }
                _ => {}
            }
        }

        // The overlay layer exists once the first map frame is up
        if frame == 1 {
            layer.set_ready(true);
        }

        let t = frame as f32 / 60.0;
        for wander in &wanders {
            if let Some(sprite) = spriteset.get_mut(wander.event_id) {
                let angle = t + wander.phase;
                sprite.move_to(
                    wander.home.0 + (angle.cos() * WANDER_RADIUS) as i32,
                    wander.home.1 + (angle.sin() * WANDER_RADIUS * 0.5) as i32,
                );
            }
        }

        spriteset.update_all(&mut layer, &ctx);

        canvas.set_draw_color(Color::RGB(40, 90, 40));
        canvas.clear();
        draw_sprites(&mut canvas, &spriteset)?;
        canvas.present();

        frame += 1;
        std::thread::sleep(std::time::Duration::new(0, 1_000_000_000u32 / 60));
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
