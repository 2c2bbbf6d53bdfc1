//! Rendering for the maze, the HUD panel and the end-of-level overlay.

use app::app_loop::{AppMode, AppState};
use app::hud::{HudModel, finished_lines};
use macroquad::prelude::*;
use stalker_core::{CellKind, DangerBand, Game, GameState, Maze, Pos, TICK_MS, TrapPhase};

const HUD_WIDTH: f32 = 220.0;
const MARGIN: f32 = 16.0;
const LINE_HEIGHT: f32 = 24.0;
const HUD_FONT_SIZE: f32 = 22.0;
const OVERLAY_FONT_SIZE: f32 = 30.0;
const MAX_CELL: f32 = 32.0;

const WALL_COLOR: Color = Color { r: 0.25, g: 0.22, b: 0.35, a: 1.0 };
const FLOOR_COLOR: Color = Color { r: 0.12, g: 0.12, b: 0.16, a: 1.0 };
const EXIT_COLOR: Color = Color { r: 0.95, g: 0.8, b: 0.2, a: 1.0 };
const TRAP_COLOR: Color = Color { r: 0.6, g: 0.35, b: 0.2, a: 1.0 };
const PIT_COLOR: Color = Color { r: 0.02, g: 0.02, b: 0.02, a: 1.0 };
const BOMB_COLOR: Color = Color { r: 0.9, g: 0.3, b: 0.3, a: 1.0 };
const PLAYER_COLOR: Color = Color { r: 0.95, g: 0.4, b: 0.75, a: 1.0 };
const STALKER_COLOR: Color = Color { r: 0.6, g: 0.9, b: 1.0, a: 1.0 };

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapLayout {
    pub origin_x: f32,
    pub origin_y: f32,
    pub cell: f32,
}

impl MapLayout {
    /// Largest square cell that fits the maze left of the HUD panel.
    pub fn fit(screen_width: f32, screen_height: f32, maze: &Maze) -> Self {
        let usable_w = (screen_width - HUD_WIDTH - 3.0 * MARGIN).max(0.0);
        let usable_h = (screen_height - 2.0 * MARGIN).max(0.0);
        let cell = (usable_w / maze.width.max(1) as f32)
            .min(usable_h / maze.height.max(1) as f32)
            .clamp(1.0, MAX_CELL)
            .floor();
        Self { origin_x: MARGIN, origin_y: MARGIN, cell }
    }

    pub fn cell_origin(&self, pos: Pos) -> (f32, f32) {
        (self.origin_x + pos.x as f32 * self.cell, self.origin_y + pos.y as f32 * self.cell)
    }

    fn hud_x(&self, maze: &Maze) -> f32 {
        self.origin_x + maze.width as f32 * self.cell + MARGIN
    }
}

pub fn cell_color(kind: CellKind, trap: TrapPhase) -> Color {
    match kind {
        CellKind::Wall => WALL_COLOR,
        CellKind::Floor | CellKind::Start => FLOOR_COLOR,
        CellKind::Exit => EXIT_COLOR,
        CellKind::Trap => match trap {
            TrapPhase::Dormant => FLOOR_COLOR,
            TrapPhase::Crumbling { .. } => TRAP_COLOR,
            TrapPhase::Collapsed => PIT_COLOR,
        },
        CellKind::Bomb => BOMB_COLOR,
    }
}

/// Fog applies by scaling the cell's color toward black.
pub fn fogged(color: Color, alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    Color { r: color.r * alpha, g: color.g * alpha, b: color.b * alpha, a: 1.0 }
}

pub fn draw_frame(game: &Game, app_state: &AppState) {
    let state = game.state();
    let progress = tick_progress(game.pending_ms() as f32);
    let layout = MapLayout::fit(screen_width(), screen_height(), &state.maze);
    draw_maze(state, layout);
    draw_actors(state, layout, progress);
    draw_hud(state, layout);
    if let AppMode::Finished(_) = app_state.mode {
        let best = app_state.best_times.best(state.level);
        draw_overlay(&finished_lines(state, best, app_state.new_best));
    }
}

fn draw_maze(state: &GameState, layout: MapLayout) {
    for cell in &state.maze.cells {
        let alpha = state.visibility.alpha_at(cell.pos);
        if alpha <= 0.0 {
            continue;
        }
        let (x, y) = layout.cell_origin(cell.pos);
        let color = fogged(cell_color(cell.kind, cell.trap), alpha);
        draw_rectangle(x, y, layout.cell, layout.cell, color);
    }
}

fn draw_actors(state: &GameState, layout: MapLayout, tick_progress: f32) {
    let half = layout.cell / 2.0;
    for stalker in &state.stalkers {
        if !state.visibility.is_visible(stalker.pos) {
            continue;
        }
        let (x, y) = layout.cell_origin(stalker.pos);
        draw_circle(x + half, y + half, half * 0.8, STALKER_COLOR);
    }

    // Dashes slide from the start cell over the tick instead of popping.
    let (x, y) = match state.player.dash_trail {
        Some(trail) => {
            let (from_x, from_y) = layout.cell_origin(trail.from);
            let (to_x, to_y) = layout.cell_origin(trail.to);
            let t = tick_progress.clamp(0.0, 1.0);
            (from_x + (to_x - from_x) * t, from_y + (to_y - from_y) * t)
        }
        None => layout.cell_origin(state.player.pos),
    };
    let color = if state.is_freeze() { fogged(PLAYER_COLOR, 0.5) } else { PLAYER_COLOR };
    draw_circle(x + half, y + half, half * 0.7, color);
}

fn draw_hud(state: &GameState, layout: MapLayout) {
    let hud = HudModel::from_state(state);
    let x = layout.hud_x(&state.maze);
    let mut y = layout.origin_y + LINE_HEIGHT;
    for line in hud.lines() {
        draw_text(&line, x, y, HUD_FONT_SIZE, WHITE);
        y += LINE_HEIGHT;
    }

    let meter_color = match hud.danger {
        DangerBand::Calm => GREEN,
        DangerBand::Tense => ORANGE,
        DangerBand::Panic => RED,
    };
    draw_rectangle_lines(x, y, HUD_WIDTH - MARGIN, 12.0, 1.0, GRAY);
    draw_rectangle(x, y, (HUD_WIDTH - MARGIN) * hud.danger_fill, 12.0, meter_color);
    y += 2.0 * LINE_HEIGHT;

    for help in ["Move: WASD/Arrows", "Hide: hold Space", "Dash: Shift+Dir", "Bomb: B+Dir"] {
        draw_text(help, x, y, 16.0, GRAY);
        y += 18.0;
    }
}

fn draw_overlay(lines: &[String]) {
    let height = lines.len() as f32 * LINE_HEIGHT * 1.4 + 2.0 * MARGIN;
    let top = (screen_height() - height) / 2.0;
    draw_rectangle(0.0, top, screen_width(), height, Color { r: 0.0, g: 0.0, b: 0.0, a: 0.8 });
    let mut y = top + MARGIN + LINE_HEIGHT;
    for line in lines {
        let size = measure_text(line, None, OVERLAY_FONT_SIZE as u16, 1.0);
        draw_text(line, (screen_width() - size.width) / 2.0, y, OVERLAY_FONT_SIZE, WHITE);
        y += LINE_HEIGHT * 1.4;
    }
}

/// Fraction of the current tick that has elapsed, for interpolation.
pub fn tick_progress(accumulated_ms: f32) -> f32 {
    (accumulated_ms / TICK_MS as f32).clamp(0.0, 1.0)
}
