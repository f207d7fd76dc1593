//! Status line, key help, and phase overlays.

use clover::session::{ChallengeView, PhaseView, SessionEvent, SessionSnapshot};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const CONTROLS: &[(&str, &str)] = &[
    ("[WASD]", "Move"),
    ("[Tab]", "Next"),
    ("[Space]", "Reveal"),
    ("[F]", "Flag"),
    ("[X]", "Scan"),
    ("[H]", "Hack"),
    ("[V]", "Camera"),
    ("[R]", "Restart"),
    ("[Q]", "Quit"),
];

fn label(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(Color::DarkGray))
}

fn value(text: String, color: Color) -> Span<'static> {
    Span::styled(text, Style::default().fg(color))
}

/// Top line: layer, score, counters, and mode flags.
pub fn render_status_line(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    if area.height == 0 {
        return;
    }

    let mut spans = vec![
        label("Layer "),
        value(
            format!("{}/{}", snapshot.layer, snapshot.total_layers),
            Color::Cyan,
        ),
        label("  Score "),
        value(snapshot.score.to_string(), Color::Yellow),
        label("  Mines "),
        value(snapshot.mine_count.to_string(), Color::White),
        label("  Flags "),
        value(snapshot.flags_placed.to_string(), Color::Red),
        label("  Cleared "),
        value(
            format!(
                "{}/{}",
                snapshot.safe_cells_revealed, snapshot.total_safe_cells
            ),
            Color::Green,
        ),
        label("  Scanner "),
        value(snapshot.scanner_charges.to_string(), Color::Magenta),
        label("  Camera "),
        value(snapshot.camera.mode.name().to_string(), Color::White),
    ];
    if snapshot.hack_mode {
        spans.push(Span::styled(
            "  [HACK]",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(line, Rect { height: 1, ..area });
}

/// Bottom line: key help.
pub fn render_controls(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }

    let mut spans = Vec::new();
    for (i, (key, action)) in CONTROLS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    let y = area.bottom().saturating_sub(1);
    frame.render_widget(line, Rect::new(area.x, y, area.width, 1));
}

/// One-line description for the message line, if the event deserves one.
pub fn describe_event(event: &SessionEvent) -> Option<String> {
    let text = match event {
        SessionEvent::SelectionMoved { .. } | SessionEvent::CameraModeChanged(_) => return None,
        SessionEvent::CellsRevealed { count } if *count > 1 => format!("Cleared {} cells", count),
        SessionEvent::CellsRevealed { .. } => return None,
        SessionEvent::MineTriggered { problem, .. } => format!("Mine! Solve {}", problem),
        SessionEvent::FlagToggled { row, col, flagged } => {
            let verb = if *flagged { "Flagged" } else { "Unflagged" };
            format!("{} ({}, {})", verb, row, col)
        }
        SessionEvent::ScannerUsed {
            revealed,
            charges_left,
        } => format!(
            "Scanner cleared {} cells, {} charges left",
            revealed, charges_left
        ),
        SessionEvent::HackModeToggled(true) => "Hack mode on".to_string(),
        SessionEvent::HackModeToggled(false) => "Hack mode off".to_string(),
        SessionEvent::MineDefused { .. } => "Mine defused!".to_string(),
        SessionEvent::MineDetonated { timed_out: true, .. } => "Too slow. Boom.".to_string(),
        SessionEvent::MineDetonated { .. } => "Wrong answer. Boom.".to_string(),
        SessionEvent::LayerComplete { layer } => format!("Layer {} cleared", layer + 1),
        SessionEvent::LayerAdvanced { layer } => format!("Entering layer {}", layer + 1),
        SessionEvent::GameWon { score } => format!("Victory with {} points", score),
        SessionEvent::SessionReset => "New game".to_string(),
    };
    Some(text)
}

/// Second line from the bottom: latest event message.
pub fn render_message(frame: &mut Frame, area: Rect, message: &str) {
    if area.height < 2 || message.is_empty() {
        return;
    }
    let line = Paragraph::new(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Cyan),
    ))
    .alignment(Alignment::Center);
    let y = area.bottom().saturating_sub(2);
    frame.render_widget(line, Rect::new(area.x, y, area.width, 1));
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_box(frame: &mut Frame, area: Rect, title: &str, color: Color, lines: Vec<Line>) {
    let height = lines.len() as u16 + 2;
    let overlay = centered(area, 36, height);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(text, inner);
}

fn challenge_lines(challenge: &ChallengeView) -> Vec<Line<'static>> {
    let timer = if challenge.timed_out {
        Span::styled(
            "TIME'S UP",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        let seconds = challenge.remaining_ms as f64 / 1000.0;
        let color = if challenge.remaining_ms <= 2_000 {
            Color::LightRed
        } else {
            Color::Green
        };
        Span::styled(format!("{:.1}s", seconds), Style::default().fg(color))
    };

    vec![
        Line::from(Span::styled(
            challenge.problem.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::DarkGray)),
            Span::styled(challenge.input.clone(), Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(timer),
        Line::from(label("[Enter] Submit  [Bksp] Delete")),
    ]
}

/// Overlay for whatever phase the session is in. Nothing while playing.
pub fn render_phase_overlay(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    match snapshot.phase {
        PhaseView::Playing => {}
        PhaseView::Defusing => {
            if let Some(challenge) = &snapshot.challenge {
                render_box(frame, area, "DEFUSE", Color::Red, challenge_lines(challenge));
            }
        }
        PhaseView::LayerComplete => {
            let lines = vec![
                Line::from(Span::styled(
                    format!("Layer {} cleared!", snapshot.layer),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(value(format!("Score {}", snapshot.score), Color::Yellow)),
                Line::from(label("Descending...")),
            ];
            render_box(frame, area, "Layer Complete", Color::Green, lines);
        }
        PhaseView::GameOver => {
            let lines = vec![
                Line::from(Span::styled(
                    "BOOM",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(value(
                    format!("Final score {}", snapshot.score),
                    Color::Yellow,
                )),
                Line::from(label("[R] Restart  [Q] Quit")),
            ];
            render_box(frame, area, "Game Over", Color::Red, lines);
        }
        PhaseView::Won => {
            let lines = vec![
                Line::from(Span::styled(
                    "All layers cleared!",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(value(
                    format!("Final score {}", snapshot.score),
                    Color::Yellow,
                )),
                Line::from(label("[R] Play again  [Q] Quit")),
            ];
            render_box(frame, area, "Victory", Color::Green, lines);
        }
    }
}
