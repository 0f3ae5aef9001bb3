use crate::app::App;
use crate::panel::{color, holo_color, CardPanel, CardSize};
use dreamroster_core::{
    role_color, AssetSubject, CardPose, FullRosterLayout, FullRosterSequencer, ResolvedAsset,
    RevealFrame, RevealSequencer, Role, Stage, CHAMPION_TAGLINE, FULL_ROSTER_SKIP_HINT,
    REVEAL_CONTINUE_HINT, ViewportClass,
};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::prelude::{Alignment, Color, Line, Modifier, Span, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const HOLO_PHASE_MS: u64 = 250;

fn screen_areas(screen: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(CardSize::Md.height()),
            Constraint::Length(10),
        ])
        .split(screen)
        .to_vec()
}

/// Narrow terminals get the compact card without a portrait row.
pub fn roster_card_size(viewport: ViewportClass) -> CardSize {
    match viewport {
        ViewportClass::Narrow => CardSize::Sm,
        ViewportClass::Wide => CardSize::Md,
    }
}

/// One slot rect per role, left to right, as drawn on `screen`.
pub fn roster_slots(screen: Rect, size: CardSize) -> Vec<(Role, Rect)> {
    let area = screen_areas(screen)[1];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);
    Role::ALL
        .into_iter()
        .zip(columns.iter())
        .map(|(role, column)| {
            let slot = Rect {
                height: column.height.min(size.height()),
                ..*column
            };
            (role, slot)
        })
        .collect()
}

/// The roster slot under a terminal cell, if any.
pub fn role_at(screen: Rect, size: CardSize, column: u16, row: u16) -> Option<Role> {
    let cell = Position::new(column, row);
    roster_slots(screen, size)
        .into_iter()
        .find(|(_, slot)| slot.contains(cell))
        .map(|(role, _)| role)
}

pub fn draw(frame: &mut Frame, app: &App) {
    let root = screen_areas(frame.area());

    draw_header(frame, root[0], app);
    draw_roster(frame, frame.area(), app);
    draw_events(frame, root[2], app);

    if let Some(reveal) = app.game.reveal() {
        draw_reveal_overlay(frame, app, reveal);
    }
    if let Some(effect) = app.game.effect() {
        draw_full_roster_overlay(frame, app, effect);
    }
    if app.show_help {
        draw_help_popup(frame);
    }
}

fn holo_phase(app: &App) -> u64 {
    app.game.now_ms() / HOLO_PHASE_MS
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let roster = app.game.roster();
    let lines = vec![
        Line::from(format!("Dream Roster | Hint: {}", app.next_hint()).bold()),
        Line::from(format!(
            "Roster {}/{}  Upgraded {}  Seed {}  Layout {:?}",
            roster.filled_count(),
            Role::ALL.len(),
            roster.upgraded_ids().len(),
            app.seed,
            app.viewport
        )),
        Line::from(format!("Status: {}", app.status_line)),
    ];
    let block = Block::default().borders(Borders::ALL).title("Overview");
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_roster(frame: &mut Frame, screen: Rect, app: &App) {
    let size = roster_card_size(app.viewport);
    let roster = app.game.roster();
    for (role, slot) in roster_slots(screen, size) {
        match roster.slot(role) {
            Some(card) => {
                let panel = CardPanel::new(card, &app.data.palette, app.portrait(card))
                    .size(size)
                    .upgraded(roster.is_upgraded(&card.id), holo_phase(app));
                frame.render_widget(panel.widget(slot.width), slot);
            }
            None => draw_empty_slot(frame, slot, app, role),
        }
    }
}

fn draw_empty_slot(frame: &mut Frame, area: Rect, app: &App, role: Role) {
    let tint = color(role_color(role));
    let revealing = app
        .game
        .roster()
        .revealing()
        .is_some_and(|pending| pending.role == role);
    let body = if revealing {
        "revealing...".to_string()
    } else {
        format!("[{}] draw", role.draw_key())
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(role.name().to_uppercase(), Style::default().fg(tint).bold()))
            .alignment(Alignment::Center),
        Line::from(""),
        Line::from(body.dim()).alignment(Alignment::Center),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(tint).add_modifier(Modifier::DIM));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let start = app.event_log.len().saturating_sub(capacity);
    let lines: Vec<Line<'_>> = app
        .event_log
        .iter()
        .skip(start)
        .map(|line| Line::from(line.clone()))
        .collect();
    let block = Block::default().borders(Borders::ALL).title("Events");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn asset_line(asset: &ResolvedAsset, tint: Color) -> Line<'static> {
    match asset {
        ResolvedAsset::Found(path) => Line::from(format!("[{path}]").dim()),
        ResolvedAsset::Placeholder(letter) => {
            Line::from(Span::styled(letter.to_string(), Style::default().fg(tint).bold()))
        }
    }
}

fn draw_reveal_overlay(frame: &mut Frame, app: &App, reveal: &RevealSequencer) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", reveal.stage().label()))
        .title_bottom(Line::from(" space / click to skip ").alignment(Alignment::Right));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(""); (inner.height / 3) as usize];
    match reveal.frame() {
        RevealFrame::League { code, name } => {
            let logo = app.resolve(AssetSubject::LeagueLogo(reveal.region()));
            lines.push(asset_line(&logo, Color::White));
            lines.push(Line::from(""));
            lines.push(Line::from(code.bold()));
            lines.push(Line::from(name.dim()));
        }
        RevealFrame::Position { role } => {
            lines.push(Line::from(Span::styled(
                role.name().to_uppercase(),
                Style::default().fg(color(role_color(role))).bold(),
            )));
        }
        RevealFrame::Team { team, year } => {
            let tint = color(app.data.palette.team_color(team));
            let logo = app.resolve(AssetSubject::TeamLogo(team));
            lines.push(asset_line(&logo, tint));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(team.to_string(), Style::default().fg(tint).bold())));
            lines.push(Line::from(year.to_string().dim()));
        }
        RevealFrame::Card { card } => {
            let width = CARD_LG_WIDTH.min(inner.width);
            let card_area = Rect {
                x: inner.x + (inner.width - width) / 2,
                y: inner.y,
                width,
                height: CardSize::Lg.height().min(inner.height),
            };
            let panel = CardPanel::new(card, &app.data.palette, app.portrait(card))
                .size(CardSize::Lg);
            frame.render_widget(panel.widget(width), card_area);
            let caption = Rect {
                y: card_area.y + card_area.height,
                height: inner.height.saturating_sub(card_area.height),
                ..inner
            };
            let text = vec![
                Line::from(card.name.clone().bold()),
                Line::from(REVEAL_CONTINUE_HINT.dim()),
            ];
            frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), caption);
            return;
        }
        RevealFrame::Done => return,
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

const CARD_LG_WIDTH: u16 = 24;

fn draw_full_roster_overlay(frame: &mut Frame, app: &App, effect: &FullRosterSequencer) {
    let area = frame.area();
    frame.render_widget(Clear, area);
    let stage = effect.stage();
    let team_tint = color(app.data.palette.team_color(effect.team()));

    if stage.shows_flash() {
        frame.render_widget(Block::default().style(Style::default().bg(Color::White)), area);
        return;
    }

    let border = if stage.glow_visible() {
        Style::default().fg(holo_color(holo_phase(app)))
    } else {
        Style::default().fg(team_tint)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} {} ", effect.team(), effect.year()))
        .title_bottom(Line::from(format!(" {FULL_ROSTER_SKIP_HINT} ")).alignment(Alignment::Center));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if stage.shows_champion_frame() {
        draw_champion_frame(frame, inner, app, effect);
        return;
    }

    let layout = FullRosterLayout::new(app.viewport);
    let base_offset = app.viewport.base_offset();
    for placed in effect.placements(&layout, app.game.now_ms()) {
        let Some(rect) = project_pose(placed.pose, base_offset, inner, CardSize::Md) else {
            continue;
        };
        let panel = CardPanel::new(placed.card, &app.data.palette, app.portrait(placed.card))
            .size(CardSize::Md)
            .upgraded(placed.upgraded, holo_phase(app) + placed.slot as u64);
        let mut widget = panel.widget(rect.width);
        if placed.pose.opacity < 0.5 {
            widget = widget.style(Style::default().add_modifier(Modifier::DIM));
        }
        frame.render_widget(Clear, rect);
        frame.render_widget(widget, rect);
    }
}

fn draw_champion_frame(frame: &mut Frame, area: Rect, app: &App, effect: &FullRosterSequencer) {
    let tint = color(app.data.palette.champion_color(effect.team()));
    let photo = app.resolve(AssetSubject::ChampionshipPhoto {
        team: effect.team(),
        year: effect.year(),
    });
    let mut lines = vec![Line::from(""); (area.height / 3) as usize];
    lines.push(asset_line(&photo, tint));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        effect.team().to_string(),
        Style::default().fg(tint).bold(),
    )));
    lines.push(Line::from(Span::styled(
        format!("{} {CHAMPION_TAGLINE}", effect.year()),
        Style::default().fg(tint).add_modifier(Modifier::BOLD | Modifier::ITALIC),
    )));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Maps a layout pose onto terminal cells. One base offset spans a fifth of
/// `area`; slot 2 at rest sits in the middle.
pub fn project_pose(pose: CardPose, base_offset: f32, area: Rect, size: CardSize) -> Option<Rect> {
    if !pose.is_visible() || base_offset <= 0.0 {
        return None;
    }
    let spacing = (area.width / 5).max(1) as f32;
    let full_width = (spacing - 1.0).max(6.0);
    let width = (full_width * pose.scale).round().min(area.width as f32) as u16;
    let height = (size.height() as f32 * pose.scale)
        .round()
        .min(area.height as f32) as u16;
    if width < 3 || height < 3 {
        return None;
    }
    let center_x = area.x as f32 + area.width as f32 / 2.0 + pose.x / base_offset * spacing;
    let center_y = area.y as f32 + area.height as f32 / 2.0 + pose.y / base_offset * spacing;
    let max_x = (area.x + area.width - width) as f32;
    let max_y = (area.y + area.height - height) as f32;
    let x = (center_x - width as f32 / 2.0).round().clamp(area.x as f32, max_x) as u16;
    let y = (center_y - height as f32 / 2.0).round().clamp(area.y as f32, max_y) as u16;
    Some(Rect {
        x,
        y,
        width,
        height,
    })
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);
    let mut lines: Vec<Line<'_>> = Role::ALL
        .iter()
        .map(|role| Line::from(format!("{}  draw {}", role.draw_key(), role)))
        .collect();
    lines.extend([
        Line::from("space / enter / click  skip animation"),
        Line::from("e  play full roster (all five slots filled)"),
        Line::from("n  play next showcase roster"),
        Line::from("c  clear upgrades | r reset roster"),
        Line::from("? help | esc close | q quit"),
    ]);
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
