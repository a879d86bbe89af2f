// SPDX-License-Identifier: GPL-3.0-only

//! Terminal front-end
//!
//! Runs the coordinator against the simulated camera and draws the camera
//! screen with ratatui. Keys stand in for gestures:
//!
//! | Key            | Gesture                         |
//! |----------------|---------------------------------|
//! | `+` / `-`      | pinch out / in                  |
//! | `←` / `→`      | swipe left / right (filters)    |
//! | `↑` / `↓`      | swipe up / down (frames)        |
//! | space / `p`    | tap the capture button          |
//! | `g` / `Esc`    | open / close the gallery        |
//! | `o`            | open the newest photo           |
//! | `q` / Ctrl+C   | quit                            |

use crate::app::view::frame_glyph_positions;
use crate::app::{AppModel, Coordinator, CoordinatorHandle, Message, Renderer, ScreenView};
use crate::backends::virtual_camera::{VirtualCamera, filters};
use crate::config::Config;
use crate::constants::timing;
use crate::errors::{AppError, AppResult};
use crate::storage::JsonPhotoStore;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Clear, List, ListItem, Widget},
};
use std::io::{self, Stdout, stdout};
use tracing::{info, warn};

/// Swipe length produced by an arrow key
const KEY_SWIPE_DISTANCE: f64 = 120.0;
/// Pinch magnification produced by `+` (and its inverse by `-`)
const KEY_PINCH_STEP: f64 = 1.25;

/// Screen points covered by one terminal cell
const CELL_WIDTH_PT: f32 = 8.0;
const CELL_HEIGHT_PT: f32 = 16.0;

/// Run the interactive camera screen until the user quits
pub fn run(config: Config) -> AppResult<()> {
    let photo_dir = config.photo_dir();
    let store = JsonPhotoStore::open(photo_dir.clone())?;
    let camera = VirtualCamera::new(photo_dir, config.zoom_range);
    let model = AppModel::new(config, Box::new(camera), store);

    let runtime = tokio::runtime::Runtime::new()?;

    // Set up terminal
    enable_raw_mode()?;
    let terminal = setup_or_restore(enter_screen, restore_terminal)?;

    let result = runtime.block_on(run_app(model, terminal));

    restore_terminal()?;
    result
}

fn enter_screen() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)
}

/// Run `setup`; if it fails, undo the raw mode entered before it
fn setup_or_restore<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    setup().inspect_err(|_| {
        if let Err(e) = restore() {
            warn!(error = %e, "Failed to restore terminal");
        }
    })
}

async fn run_app(model: AppModel, terminal: Terminal<CrosstermBackend<Stdout>>) -> AppResult<()> {
    let coordinator = Coordinator::new(model, TerminalRenderer { terminal });
    let handle = coordinator.handle();

    let input = tokio::task::spawn_blocking(move || {
        let result = input_loop(&handle);
        // Stop the coordinator even if input failed
        handle.shutdown();
        result
    });

    let model = coordinator.run().await;
    info!(captures = model.confetti_counter, "Terminal session ended");

    match input.await {
        Ok(result) => result.map_err(AppError::from),
        Err(e) => Err(AppError::Terminal(e.to_string())),
    }
}

fn input_loop(handle: &CoordinatorHandle) -> io::Result<()> {
    loop {
        if !event::poll(timing::ANIMATION_FRAME)? {
            if !handle.send(Message::AnimationFrame) {
                return Ok(());
            }
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if ctrl_c || key.code == KeyCode::Char('q') {
                    return Ok(());
                }
                for message in key_messages(key.code) {
                    if !handle.send(message) {
                        return Ok(());
                    }
                }
            }
            Event::Resize(..) => {
                if !handle.send(Message::AnimationFrame) {
                    return Ok(());
                }
            }
            _ => {}
        }
    }
}

/// Gesture messages a key press stands for
pub fn key_messages(code: KeyCode) -> Vec<Message> {
    use crate::app::Translation;

    match code {
        KeyCode::Char('+') | KeyCode::Char('=') => {
            vec![Message::PinchChanged(KEY_PINCH_STEP), Message::PinchEnded]
        }
        KeyCode::Char('-') => vec![
            Message::PinchChanged(1.0 / KEY_PINCH_STEP),
            Message::PinchEnded,
        ],
        KeyCode::Left => vec![Message::SwipeEnded(Translation::new(
            -KEY_SWIPE_DISTANCE,
            0.0,
        ))],
        KeyCode::Right => vec![Message::SwipeEnded(Translation::new(
            KEY_SWIPE_DISTANCE,
            0.0,
        ))],
        KeyCode::Up => vec![Message::SwipeEnded(Translation::new(
            0.0,
            -KEY_SWIPE_DISTANCE,
        ))],
        KeyCode::Down => vec![Message::SwipeEnded(Translation::new(
            0.0,
            KEY_SWIPE_DISTANCE,
        ))],
        KeyCode::Char(' ') | KeyCode::Char('p') => vec![Message::CaptureTap],
        KeyCode::Char('g') => vec![Message::PresentGallery],
        KeyCode::Esc => vec![Message::DismissGallery],
        KeyCode::Char('o') => vec![Message::OpenLatestPhoto],
        _ => Vec::new(),
    }
}

struct TerminalRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, view: &ScreenView) {
        if let Err(e) = self.terminal.draw(|f| draw_screen(f, view)) {
            warn!(error = %e, "Failed to draw screen");
        }
    }
}

fn draw_screen(f: &mut Frame, view: &ScreenView) {
    let area = f.area();

    // Reserve bottom line for status
    let screen_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };

    f.render_widget(PreviewWidget { view }, screen_area);

    if view.show_gallery {
        draw_gallery(f, screen_area, view);
    }

    let message = if view.show_gallery {
        "'Esc' close | 'o' open newest | 'q' quit"
    } else {
        "'←→' filter | '↑↓' frame | '+-' zoom | 'space' capture | 'g' gallery | 'q' quit"
    };
    f.render_widget(StatusBar { message }, status_area);
}

fn draw_gallery(f: &mut Frame, area: Rect, view: &ScreenView) {
    let inset = Rect {
        x: area.x + area.width / 8,
        y: area.y + area.height / 8,
        width: area.width - area.width / 4,
        height: area.height - area.height / 4,
    };

    let items: Vec<ListItem> = if view.gallery_photos.is_empty() {
        vec![ListItem::new("No photos yet")]
    } else {
        view.gallery_photos
            .iter()
            .map(|photo| {
                ListItem::new(format!(
                    "{}  {}",
                    photo.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    photo.filename
                ))
            })
            .collect()
    };

    let title = format!(" Gallery ({}) ", view.gallery_photos.len());
    f.render_widget(Clear, inset);
    f.render_widget(List::new(items).block(Block::bordered().title(title)), inset);
}

/// Camera preview with all overlays
struct PreviewWidget<'a> {
    view: &'a ScreenView,
}

impl Widget for PreviewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 12 || area.height < 6 {
            return;
        }
        let view = self.view;

        // Background: filter tint, white while the flash is up
        let background = if view.flash {
            Color::White
        } else {
            let (r, g, b) = filters::preview_tint(view.filter);
            Color::Rgb(r / 3, g / 3, b / 3)
        };
        let grid_step = ((6.0 * view.zoom_factor).round() as u16).max(2);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    let on_grid = (x - area.x) % grid_step == 0
                        && (y - area.y) % (grid_step / 2).max(1) == 0;
                    cell.set_char(if on_grid { '·' } else { ' ' });
                    cell.set_fg(Color::Gray);
                    cell.set_bg(background);
                }
            }
        }

        let zoom_label = format!(" {:.1}x ", view.zoom_factor);
        buf.set_string(
            area.right().saturating_sub(zoom_label.len() as u16 + 1),
            area.y,
            &zoom_label,
            Style::default().fg(Color::Yellow).bg(Color::Black),
        );

        if let Some(glyph) = view.frame_glyph {
            let positions = frame_glyph_positions(
                area.width as f32 * CELL_WIDTH_PT,
                area.height as f32 * CELL_HEIGHT_PT,
            );
            for (px, py) in positions {
                // Glyphs are two cells wide; center them on the point
                let x = area.x + (px / CELL_WIDTH_PT).max(1.0) as u16 - 1;
                let y = area.y + (py / CELL_HEIGHT_PT).max(0.0) as u16;
                if x + 1 < area.right() && y < area.bottom() {
                    buf.set_string(x, y, glyph, Style::default());
                }
            }
        }

        if let Some(name) = view.name_overlay {
            let label = format!("  {}  ", name);
            let x = area.x + area.width.saturating_sub(label.len() as u16) / 2;
            buf.set_string(
                x,
                area.y + 2,
                &label,
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            );
        }

        // Confetti, scattered around the center
        let (cx, cy) = (
            area.x as f32 + area.width as f32 / 2.0,
            area.y as f32 + area.height as f32 / 2.0,
        );
        for particle in &view.confetti {
            if particle.opacity < 0.15 {
                continue;
            }
            let x = cx + particle.x / CELL_WIDTH_PT;
            let y = cy + particle.y / CELL_HEIGHT_PT;
            if x >= area.x as f32 && y >= area.y as f32 {
                let (x, y) = (x as u16, y as u16);
                if x + 1 < area.right() && y < area.bottom() {
                    buf.set_string(x, y, particle.glyph, Style::default());
                }
            }
        }

        // Bottom bar: thumbnail, capture button
        let bar_y = area.bottom().saturating_sub(2);
        if let Some(thumbnail) = &view.thumbnail {
            let name = thumbnail
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            buf.set_string(
                area.x + 2,
                bar_y,
                format!("[▣ {}]", name),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            );
        }

        let button = capture_button_label(view);
        let button_x = area.x + (area.width.saturating_sub(button.chars().count() as u16)) / 2;
        let button_color = if view.is_button_pressed() {
            Color::Rgb(200, 120, 0)
        } else {
            Color::Rgb(255, 165, 0)
        };
        buf.set_string(
            button_x,
            bar_y,
            button,
            Style::default()
                .fg(button_color)
                .add_modifier(Modifier::BOLD),
        );
    }
}

/// Capture button as `(  ●  )`, as wide as the button's outer ring
fn capture_button_label(view: &ScreenView) -> String {
    let (outer, _) = view.capture_button_size();
    let width = ((outer / CELL_WIDTH_PT).round() as usize).max(3);
    let inside = width - 2;
    let left = (inside - 1) / 2;
    let right = inside - 1 - left;
    format!("({}●{})", " ".repeat(left), " ".repeat(right))
}

/// Status bar widget
struct StatusBar<'a> {
    message: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        // Fill background
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(Color::DarkGray);
            }
        }

        let text: String = self.message.chars().take(area.width as usize).collect();
        buf.set_string(
            area.x,
            area.y,
            text,
            Style::default().fg(Color::White).bg(Color::DarkGray),
        );
    }
}
