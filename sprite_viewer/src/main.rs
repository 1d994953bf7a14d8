//! Sprite sheet viewer
//!
//! Opens a window and steps through the frames of a sprite sheet, showing the
//! current frame in the title bar.
//!
//! ```text
//! sprite_viewer <sheet.ron|sheet.toml> [--config graphics.toml] [--dump DIR]
//! ```
//!
//! Keys: Escape quits, Space pauses, Left/Right step while paused.
//! `--dump` writes every frame to `DIR/frame_NNN.png` and exits without
//! opening a window.

use gfxlite::foundation::logging;
use gfxlite::prelude::*;
use gfxlite::render::window::{Action, Key, WindowEvent};
use std::error::Error;
use std::path::{Path, PathBuf};

/// Seconds each frame stays on screen
const FRAME_PERIOD: f64 = 0.1;

struct Args {
    sheet: PathBuf,
    config: Option<PathBuf>,
    dump: Option<PathBuf>,
}

impl Args {
    fn parse() -> Result<Self, String> {
        let usage = "usage: sprite_viewer <sheet.ron|sheet.toml> [--config FILE] [--dump DIR]";
        let mut sheet = None;
        let mut config = None;
        let mut dump = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => config = Some(args.next().ok_or(usage)?.into()),
                "--dump" => dump = Some(args.next().ok_or(usage)?.into()),
                "-h" | "--help" => return Err(usage.to_string()),
                _ if sheet.is_none() => sheet = Some(PathBuf::from(arg)),
                _ => return Err(format!("unexpected argument '{arg}'\n{usage}")),
            }
        }

        Ok(Self {
            sheet: sheet.ok_or(usage)?,
            config,
            dump,
        })
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse()?;

    let config = match &args.config {
        Some(path) => GraphicsConfig::load_from_file(path)?,
        None => GraphicsConfig::default(),
    };
    config.validate()?;
    logging::init(&config.logging)?;

    let sheet = SpriteSheet::load_from_file(&args.sheet)?;
    let texture_path = sheet
        .texture_path(&args.sheet)
        .ok_or_else(|| format!("{} names no texture", args.sheet.display()))?;
    let texture = Texture::from_file(&texture_path)?;
    let sprite = Sprite::from_sheet(&texture, &sheet)?;

    log::info!(
        "Sheet {:?}: {} frames of {:?} from {}",
        args.sheet,
        sprite.frame_count(),
        sprite.frame_size(),
        sprite.region()
    );

    match &args.dump {
        Some(dir) => dump_frames(&sprite, dir),
        None => run(&config, sprite),
    }
}

/// Render every frame into its own PNG
fn dump_frames(sprite: &Sprite<'_>, dir: &Path) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(dir)?;
    let (w, h) = sprite.frame_size();
    let (width, height) = (u32::try_from(w)?, u32::try_from(h)?);
    if width == 0 || height == 0 {
        return Err(format!("frames of {w}x{h} pixels cannot be saved").into());
    }

    for frame in 0..u32::try_from(sprite.frame_count())? {
        let mut canvas = Canvas::new(width, height);
        sprite.with_frame(frame)?.draw(&mut canvas, Rect::from_size(w, h))?;
        canvas.image().save(dir.join(format!("frame_{frame:03}.png")))?;
    }

    log::info!("Wrote {} frames to {:?}", sprite.frame_count(), dir);
    Ok(())
}

/// Animate the sheet in a window until it is closed
fn run(config: &GraphicsConfig, mut sprite: Sprite<'_>) -> Result<(), Box<dyn Error>> {
    let graphics = Graphics::acquire(config)?;
    let mut window = Window::new(&graphics, &config.window)?;
    let base_title = window.title().to_string();

    let mut paused = false;
    let mut last_step = graphics.time();
    window.set_title(&frame_title(&base_title, &sprite));

    while !window.should_close() {
        graphics.wait_events(config.event_timeout());

        let mut step: i64 = 0;
        for (_, event) in window.drain_events() {
            match event {
                WindowEvent::Key(Key::Escape, _, Action::Press, _) | WindowEvent::Close => {
                    window.set_should_close(true);
                }
                WindowEvent::Key(Key::Space, _, Action::Press, _) => {
                    paused = !paused;
                    log::debug!("Animation {}", if paused { "paused" } else { "resumed" });
                }
                WindowEvent::Key(Key::Right, _, Action::Press | Action::Repeat, _) if paused => {
                    step += 1;
                }
                WindowEvent::Key(Key::Left, _, Action::Press | Action::Repeat, _) if paused => {
                    step -= 1;
                }
                _ => {}
            }
        }

        let now = graphics.time();
        if !paused && now - last_step >= FRAME_PERIOD {
            step += 1;
            last_step = now;
        }

        if step != 0 {
            sprite.set_frame(wrap_frame(sprite.frame(), step, sprite.frame_count()))?;
            window.set_title(&frame_title(&base_title, &sprite));
        }

        window.swap_buffers();
    }

    log::info!("Viewer closed at frame {}", sprite.frame());
    Ok(())
}

/// Frame index `step` frames away from `frame`, wrapping in both directions
fn wrap_frame(frame: u32, step: i64, count: u64) -> u32 {
    let count = i128::from(count.max(1));
    let next = (i128::from(frame) + i128::from(step)).rem_euclid(count);
    u32::try_from(next).unwrap_or(0)
}

fn frame_title<T: TextureDimensions + ?Sized>(base: &str, sprite: &Sprite<'_, T>) -> String {
    format!("{base} - frame {}/{}", u64::from(sprite.frame()) + 1, sprite.frame_count())
}
