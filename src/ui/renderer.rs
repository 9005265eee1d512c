use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::constants::PREVIEW_SIZE;
use crate::driver::Driver;
use crate::game::piece::center;
use crate::game::{Cell, Game, GameState, Piece, EMPTY};

/// Colors a cell value `n` is drawn with: `PALETTE[n - 1]`.
pub const PALETTE: [Color; 8] = [
    Color::Rgb(226, 50, 88),
    Color::Rgb(203, 192, 130),
    Color::Rgb(103, 145, 123),
    Color::Rgb(183, 175, 2),
    Color::Rgb(86, 156, 214),
    Color::Rgb(197, 134, 192),
    Color::Rgb(78, 201, 176),
    Color::Rgb(206, 145, 120),
];

pub const COLOR_INACTIVE: Color = Color::Rgb(100, 100, 100);

const PANEL_WIDTH: u16 = 16;

pub fn ui(f: &mut Frame, driver: &Driver, best: u32, now: Instant) {
    let game = driver.game();
    let size = f.size();

    let board_height = game.board().height() as u16 + 2; // rows + borders
    let board_width = game.board().width() as u16 * 2 + 2; // 2 chars per block + borders

    // Create a centered layout
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(board_height),
            Constraint::Min(1),
        ])
        .split(size);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(board_width),
            Constraint::Length(PANEL_WIDTH),
            Constraint::Min(1),
        ])
        .split(vertical_chunks[1]);

    let board_area = horizontal_chunks[1];
    let info_area = horizontal_chunks[2];

    let hidden_rows: &[usize] = match driver.blink() {
        Some(blink) if blink.hidden(now) => &blink.rows,
        _ => &[],
    };

    render_board(f, game, hidden_rows, board_area);
    render_info(f, game, best, info_area);

    match game.state() {
        GameState::Paused => render_paused_overlay(f, board_area),
        GameState::GameOver => render_game_over_overlay(f, game, best, board_area),
        _ => {}
    }
}

fn cell_color(cell: Cell, inactive: bool) -> Color {
    if inactive {
        COLOR_INACTIVE
    } else {
        PALETTE[usize::from(cell - 1) % PALETTE.len()]
    }
}

fn render_board(f: &mut Frame, game: &Game, hidden_rows: &[usize], area: Rect) {
    let board = game.board();
    let inactive = game.state() == GameState::GameOver;

    let mut colors: Vec<Vec<Option<Color>>> = board
        .rows()
        .enumerate()
        .map(|(y, row)| {
            row.iter()
                .map(|&cell| {
                    if cell == EMPTY || hidden_rows.contains(&y) {
                        None
                    } else {
                        Some(cell_color(cell, inactive))
                    }
                })
                .collect()
        })
        .collect();

    // Current piece on top; cells above the board are not drawn
    if game.shows_current() {
        let piece = game.current();
        for (x, y) in piece.get_blocks() {
            if x >= 0 && y >= 0 && (x as usize) < board.width() && (y as usize) < board.height() {
                colors[y as usize][x as usize] = Some(cell_color(piece.color, inactive));
            }
        }
    }

    let board_lines: Vec<Line> = colors
        .iter()
        .enumerate()
        .map(|(y, row)| {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(x, color)| match color {
                    Some(color) => Span::styled("██", Style::default().fg(*color)),
                    // Checkerboard for empty cells
                    None if (x + y) % 2 == 0 => {
                        Span::styled("░░", Style::default().fg(Color::DarkGray))
                    }
                    None => Span::raw("  "),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let board_widget = Paragraph::new(board_lines)
        .block(Block::default().borders(Borders::ALL).title("tstack"));

    f.render_widget(board_widget, area);
}

fn render_info(f: &mut Frame, game: &Game, best: u32, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(PREVIEW_SIZE as u16 + 2), // Preview
            Constraint::Length(6),                       // Score
            Constraint::Min(1),                          // Keys
        ])
        .split(area);

    render_preview(f, game.preview(), chunks[0]);
    render_score(f, game, best, chunks[1]);
    render_keys(f, chunks[2]);
}

fn render_preview(f: &mut Frame, piece: &Piece, area: Rect) {
    let size = PREVIEW_SIZE as usize;
    let mut cells = vec![vec![false; size]; size];
    let ox = center(PREVIEW_SIZE, piece.shape.width());
    let oy = center(PREVIEW_SIZE, piece.shape.height());
    for (x, y) in piece.shape.blocks_at(ox, oy) {
        cells[y as usize][x as usize] = true;
    }

    let color = cell_color(piece.color, false);
    let lines: Vec<Line> = cells
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&filled| {
                    if filled {
                        Span::styled("██", Style::default().fg(color))
                    } else {
                        Span::raw("  ")
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let preview_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Next"))
        .alignment(Alignment::Center);

    f.render_widget(preview_widget, area);
}

fn render_score(f: &mut Frame, game: &Game, best: u32, area: Rect) {
    let score_text = vec![
        Line::from(vec![Span::styled("Score", Style::default().fg(Color::Cyan))]),
        Line::from(vec![Span::raw(game.score().to_string())]),
        Line::from(vec![Span::styled("Best", Style::default().fg(Color::Cyan))]),
        Line::from(vec![Span::raw(best.max(game.score()).to_string())]),
    ];

    let score_widget = Paragraph::new(score_text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(score_widget, area);
}

fn render_keys(f: &mut Frame, area: Rect) {
    let keys = [
        "←→  move",
        "↑   rotate",
        "↓   drop",
        "SPC hard drop",
        "P   pause",
        "R   restart",
        "Q   quit",
    ];
    let lines: Vec<Line> = keys.iter().map(|k| Line::from(Span::raw(*k))).collect();

    let keys_widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(keys_widget, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn render_paused_overlay(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(70, 30, area);
    f.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(vec![Span::styled("PAUSED", Style::default().fg(Color::Yellow))]),
        Line::from(vec![Span::raw("P to resume")]),
    ];

    let paused_widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(paused_widget, popup_area);
}

fn render_game_over_overlay(f: &mut Frame, game: &Game, best: u32, area: Rect) {
    let popup_area = centered_rect(70, 35, area);
    f.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::styled("GAME OVER", Style::default().fg(Color::Red))]),
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::raw(format!("Score: {}", game.score()))]),
        Line::from(vec![Span::raw(format!("Best: {}", best.max(game.score())))]),
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::raw("R to restart")]),
    ];

    let game_over_widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(game_over_widget, popup_area);
}
