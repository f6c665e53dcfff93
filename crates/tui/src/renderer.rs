use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};
use samwich_core::session::AdjustSession;
use samwich_core::store::ExpiryLevel;
use samwich_protocol::{CardLayer, Macros, SwipeAction, ThemeToken};

use crate::app::{App, ROW_ASPECT, Screen};

const FRAME: Duration = Duration::from_millis(16);
const CARD_WIDTH: u16 = 36;
const CARD_HEIGHT: u16 = 14;

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::Surface => Color::Black,
        ThemeToken::Border => Color::DarkGray,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::CardSurface => Color::Rgb(28, 28, 32),
        ThemeToken::CardBorder => Color::Rgb(200, 170, 120),
        ThemeToken::CardTitle => Color::Rgb(255, 214, 150),
        ThemeToken::CardInactive => Color::Rgb(70, 70, 70),
        ThemeToken::DecisionDismiss => Color::Red,
        ThemeToken::DecisionSave => Color::Yellow,
        ThemeToken::DecisionOpen => Color::Green,
        ThemeToken::ExpiryFresh => Color::Green,
        ThemeToken::ExpirySoon => Color::Yellow,
        ThemeToken::ExpiryExpired => Color::Red,
        ThemeToken::ProgressFill => Color::Rgb(120, 200, 120),
        ThemeToken::ProgressTrack => Color::DarkGray,
        ThemeToken::CarbsBar => Color::Rgb(90, 160, 230),
        ThemeToken::ProteinBar => Color::Rgb(230, 120, 90),
        ThemeToken::FatBar => Color::Rgb(230, 200, 90),
        ThemeToken::FiberBar => Color::Rgb(120, 200, 120),
    }
}

fn decision_token(action: SwipeAction) -> ThemeToken {
    match action {
        SwipeAction::Dismiss => ThemeToken::DecisionDismiss,
        SwipeAction::Save => ThemeToken::DecisionSave,
        SwipeAction::Open | SwipeAction::Unassigned => ThemeToken::DecisionOpen,
    }
}

fn expiry_token(level: ExpiryLevel) -> ThemeToken {
    match level {
        ExpiryLevel::Fresh => ThemeToken::ExpiryFresh,
        ExpiryLevel::Soon => ThemeToken::ExpirySoon,
        ExpiryLevel::Expired => ThemeToken::ExpiryExpired,
    }
}

pub fn run_tui(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> Result<()> {
    let mut last = Instant::now();
    while !app.should_quit() {
        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        let now = Instant::now();
        app.tick(now.duration_since(last).as_secs_f64());
        last = now;
    }
    Ok(())
}

fn draw(frame: &mut Frame, app: &mut App) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(frame.area());

    let title = match &app.screen {
        Screen::Discover => format!(
            " samwich | {} left | {} saved ",
            app.discover.deck().pending_len(),
            app.discover.saved().len()
        ),
        Screen::Adjust(adjust) => format!(" samwich | {} ", adjust.name()),
        Screen::Pantry => String::from(" samwich | pantry "),
        Screen::Macros => String::from(" samwich | today "),
    };
    frame.render_widget(
        Paragraph::new(title).style(
            Style::default()
                .fg(theme_to_color(ThemeToken::TextPrimary))
                .bg(theme_to_color(ThemeToken::Border)),
        ),
        header,
    );

    if app.screen == Screen::Discover {
        draw_discover(frame, body, app);
    }
    match &app.screen {
        Screen::Discover => {}
        Screen::Adjust(adjust) => draw_adjust(frame, body, app, adjust),
        Screen::Pantry => draw_pantry(frame, body, app),
        Screen::Macros => draw_macros(frame, body, app),
    }

    let help = match &app.screen {
        Screen::Discover => {
            "arrows swipe  enter tap  d/s/o skip/save/open  u undo  r refresh  t tutorial  p pantry  m macros  q quit"
        }
        Screen::Adjust(_) => "↑↓ select  ←/- less  →/+ more  x reset  enter cook  esc back",
        Screen::Pantry => "R restore  m macros  esc back",
        Screen::Macros => "R reset  p pantry  esc back",
    };
    let status = Line::from(vec![Span::styled(
        app.status.as_str(),
        Style::default().fg(theme_to_color(ThemeToken::TextSecondary)),
    )]);
    let help = Line::from(Span::styled(
        help,
        Style::default().fg(theme_to_color(ThemeToken::TextMuted)),
    ));
    frame.render_widget(Paragraph::new(vec![status, help]), footer);
}

fn draw_discover(frame: &mut Frame, area: Rect, app: &mut App) {
    let [progress, stage, prompt] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let fraction = app.discover.progress();
    frame.render_widget(
        Gauge::default()
            .ratio(fraction.clamp(0.0, 1.0))
            .label("")
            .gauge_style(
                Style::default()
                    .fg(theme_to_color(ThemeToken::ProgressFill))
                    .bg(theme_to_color(ThemeToken::ProgressTrack)),
            ),
        progress,
    );

    let card = centered(stage, CARD_WIDTH, CARD_HEIGHT);
    app.set_card_area(card);

    if app.discover.deck().is_empty() && app.discover.layers().is_empty() {
        frame.render_widget(
            Paragraph::new("No more recipes. Press r to refresh.")
                .style(Style::default().fg(theme_to_color(ThemeToken::TextMuted))),
            card,
        );
    }

    let hint = app.discover.drag_hint();
    let layers = app.discover.layers();
    let top = layers.iter().rposition(|l| l.enabled);
    for (index, layer) in layers.iter().enumerate() {
        let Some(recipe) = app.recipe(layer.item_id) else {
            continue;
        };
        let hint = if Some(index) == top { hint } else { None };
        draw_card(frame.buffer_mut(), stage, card, layer, &recipe_lines(recipe), hint);
    }

    if let Some(step) = app.discover.tutorial().step() {
        frame.render_widget(
            Paragraph::new(format!("{}  (n next, x close)", step.prompt())).style(
                Style::default()
                    .fg(theme_to_color(ThemeToken::CardTitle))
                    .add_modifier(Modifier::BOLD),
            ),
            prompt,
        );
    }
}

fn recipe_lines(recipe: &samwich_core::model::Recipe) -> Vec<String> {
    let m = &recipe.macronutrients;
    let mut lines = vec![recipe.name.clone(), String::new()];
    if !recipe.uses.is_empty() {
        lines.push(format!("Uses: {}", recipe.uses));
    }
    if recipe.serves > 0 {
        lines.push(format!("Serves {}", recipe.serves));
    }
    if !recipe.consume.is_empty() {
        lines.push(recipe.consume.clone());
    }
    lines.push(String::new());
    lines.push(format!("{} kcal", m.calories));
    lines.push(format!(
        "C {}g  P {}g  F {}g  Fi {}g",
        m.carbohydrates, m.protein, m.fat, m.fiber
    ));
    lines
}

/// Draw one card cell by cell so it can slide partly off the stage.
/// Rotation shears rows sideways around the card's vertical center.
fn draw_card(
    buf: &mut Buffer,
    clip: Rect,
    rest: Rect,
    layer: &CardLayer,
    lines: &[String],
    hint: Option<SwipeAction>,
) {
    let t = &layer.transform;
    let width = (f64::from(rest.width) * t.scale).round() as i32;
    let height = (f64::from(rest.height) * t.scale).round() as i32;
    if width < 4 || height < 3 {
        return;
    }
    let center_x = f64::from(rest.x) + f64::from(rest.width) / 2.0 + t.translate.x;
    let center_y = f64::from(rest.y) + f64::from(rest.height) / 2.0 + t.translate.y / ROW_ASPECT;
    let left = (center_x - f64::from(width) / 2.0).round() as i32;
    let top = (center_y - f64::from(height) / 2.0).round() as i32;
    let shear = t.rotation_deg.to_radians().tan() * ROW_ASPECT;

    let faded = t.opacity < 0.6;
    let border = match hint {
        Some(action) => theme_to_color(decision_token(action)),
        None if faded => theme_to_color(ThemeToken::CardInactive),
        None => theme_to_color(ThemeToken::CardBorder),
    };
    let text = if faded {
        theme_to_color(ThemeToken::CardInactive)
    } else {
        theme_to_color(ThemeToken::TextPrimary)
    };
    let title = if faded {
        text
    } else {
        theme_to_color(ThemeToken::CardTitle)
    };
    let surface = theme_to_color(ThemeToken::CardSurface);

    for row in 0..height {
        let offset = ((f64::from(row) - f64::from(height) / 2.0) * shear).round() as i32;
        let y = top + row;
        let content: Vec<char> = if row == 1 {
            hint.map(|action| action.to_string().to_uppercase().chars().collect())
                .unwrap_or_default()
        } else if row >= 2 {
            lines
                .get((row - 2) as usize)
                .map(|line| line.chars().collect())
                .unwrap_or_default()
        } else {
            Vec::new()
        };
        for col in 0..width {
            let x = left + offset + col;
            let (ch, fg) = if row == 0 || row == height - 1 {
                let ch = match (row == 0, col) {
                    (true, 0) => '╭',
                    (true, c) if c == width - 1 => '╮',
                    (false, 0) => '╰',
                    (false, c) if c == width - 1 => '╯',
                    _ => '─',
                };
                (ch, border)
            } else if col == 0 || col == width - 1 {
                ('│', border)
            } else {
                let ch = if (2..width - 2).contains(&col) {
                    content.get((col - 2) as usize).copied().unwrap_or(' ')
                } else {
                    ' '
                };
                let fg = if row == 1 && hint.is_some() {
                    border
                } else if row == 2 {
                    title
                } else {
                    text
                };
                (ch, fg)
            };
            put(buf, clip, x, y, ch, Style::default().fg(fg).bg(surface));
        }
    }
}

fn put(buf: &mut Buffer, clip: Rect, x: i32, y: i32, ch: char, style: Style) {
    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    if x < clip.x || y < clip.y || x >= clip.right() || y >= clip.bottom() {
        return;
    }
    buf[(x, y)].set_char(ch).set_style(style);
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

fn draw_adjust(frame: &mut Frame, area: Rect, app: &App, adjust: &AdjustSession) {
    let [ingredients, totals] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    let items: Vec<ListItem> = adjust
        .ingredients()
        .iter()
        .zip(adjust.original())
        .enumerate()
        .map(|(i, (row, original))| {
            let mut style = Style::default().fg(theme_to_color(ThemeToken::TextPrimary));
            if row.quantity != original.quantity {
                style = style.fg(theme_to_color(ThemeToken::DecisionSave));
            }
            if i == app.selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(format!(" - {:>5} +  {}", row.quantity, row.name)).style(style)
        })
        .collect();
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title(" Ingredients ")),
        ingredients,
    );

    let current = adjust.current_macros(&app.table);
    let before = adjust.original_macros();
    let row = |label: &str, now: f64, was: f64| {
        let changed = (now - was).abs() > f64::EPSILON;
        let color = if changed {
            ThemeToken::DecisionSave
        } else {
            ThemeToken::TextPrimary
        };
        Line::from(vec![
            Span::raw(format!("{label:<14}")),
            Span::styled(format!("{now:>6}"), Style::default().fg(theme_to_color(color))),
            Span::styled(
                format!("  (was {was})"),
                Style::default().fg(theme_to_color(ThemeToken::TextMuted)),
            ),
        ])
    };
    let lines = vec![
        row("Calories", current.calories, before.calories),
        row("Carbohydrates", current.carbohydrates, before.carbohydrates),
        row("Protein", current.protein, before.protein),
        row("Fat", current.fat, before.fat),
        row("Fiber", current.fiber, before.fiber),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Macros ")),
        totals,
    );
}

fn draw_pantry(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .inventory
        .get()
        .iter()
        .map(|item| {
            let level = item.expiry_level();
            let tag = match level {
                ExpiryLevel::Expired => String::from("expired"),
                _ => format!("{} days", item.expiry),
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!(" {:<20} {:<10} ", item.name, item.quantity)),
                Span::styled(tag, Style::default().fg(theme_to_color(expiry_token(level)))),
            ]))
        })
        .collect();
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title(" Pantry ")),
        area,
    );
}

fn draw_macros(frame: &mut Frame, area: Rect, app: &App) {
    let current: Macros = app.macros.get();
    let percents = app.goals.percent_of(&current);
    let bars = [
        ("Calories", current.calories, percents.calories, ThemeToken::ProgressFill),
        ("Carbs", current.carbohydrates, percents.carbohydrates, ThemeToken::CarbsBar),
        ("Protein", current.protein, percents.protein, ThemeToken::ProteinBar),
        ("Fat", current.fat, percents.fat, ThemeToken::FatBar),
        ("Fiber", current.fiber, percents.fiber, ThemeToken::FiberBar),
    ];
    let block = Block::default().borders(Borders::ALL).title(" Today ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical(bars.iter().map(|_| Constraint::Length(2))).split(inner);
    for ((label, value, percent, token), row) in bars.into_iter().zip(rows.iter()) {
        let capped = percent.clamp(0, 100) as u16;
        frame.render_widget(
            Gauge::default()
                .percent(capped)
                .label(format!("{label}: {value} ({percent}%)"))
                .gauge_style(
                    Style::default()
                        .fg(theme_to_color(token))
                        .bg(theme_to_color(ThemeToken::ProgressTrack)),
                ),
            Rect { height: 1, ..*row },
        );
    }
}
