use dreamroster_core::{role_color, Card, ResolvedAsset, Rgb, TeamPalette, HOLOGRAPHIC};
use ratatui::prelude::{Alignment, Color, Line, Modifier, Span, Style, Stylize};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSize {
    Sm,
    Md,
    Lg,
}

impl CardSize {
    /// Rows given to the portrait between the badges and the name.
    fn portrait_rows(self) -> usize {
        match self {
            CardSize::Sm => 0,
            CardSize::Md => 1,
            CardSize::Lg => 3,
        }
    }

    pub fn height(self) -> u16 {
        // borders, color bar, badges, portrait, name, team, role
        2 + 1 + 1 + self.portrait_rows() as u16 + 3
    }
}

pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Holographic border color for an upgraded card, cycling with `phase`.
pub fn holo_color(phase: u64) -> Color {
    color(HOLOGRAPHIC[(phase as usize) % HOLOGRAPHIC.len()])
}

pub struct CardPanel<'a> {
    pub card: &'a Card,
    pub team_color: Rgb,
    pub portrait: ResolvedAsset,
    pub upgraded: bool,
    pub size: CardSize,
    pub phase: u64,
}

impl<'a> CardPanel<'a> {
    pub fn new(card: &'a Card, palette: &TeamPalette, portrait: ResolvedAsset) -> Self {
        Self {
            card,
            team_color: palette.team_color(&card.team),
            portrait,
            upgraded: false,
            size: CardSize::Md,
            phase: 0,
        }
    }

    pub fn size(mut self, size: CardSize) -> Self {
        self.size = size;
        self
    }

    pub fn upgraded(mut self, upgraded: bool, phase: u64) -> Self {
        self.upgraded = upgraded;
        self.phase = phase;
        self
    }

    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let inner = width.saturating_sub(2).max(1) as usize;
        let team = color(self.team_color);
        let mut lines = vec![Line::from(Span::styled("▀".repeat(inner), Style::default().fg(team)))];

        let badge = format!("{}'", self.card.short_year());
        let region = self.card.region.code();
        let gap = inner.saturating_sub(badge.len() + region.len()).max(1);
        lines.push(Line::from(vec![
            Span::styled(badge, Style::default().fg(Color::Black).bg(team)),
            Span::raw(" ".repeat(gap)),
            Span::styled(region.to_string(), Style::default().add_modifier(Modifier::DIM)),
        ]));

        let rows = self.size.portrait_rows();
        if rows > 0 {
            let portrait = match &self.portrait {
                ResolvedAsset::Found(path) => Line::from(format!("[{path}]").dim()),
                ResolvedAsset::Placeholder(letter) => {
                    Line::from(Span::styled(letter.to_string(), Style::default().fg(team).bold()))
                }
            };
            let pad = (rows - 1) / 2;
            for _ in 0..pad {
                lines.push(Line::from(""));
            }
            lines.push(portrait.alignment(Alignment::Center));
            for _ in 0..rows - 1 - pad {
                lines.push(Line::from(""));
            }
        }

        lines.push(Line::from(self.card.name.clone().bold()).alignment(Alignment::Center));
        lines.push(Line::from(self.card.team.clone()).alignment(Alignment::Center));
        let role = self.card.role;
        lines.push(
            Line::from(Span::styled(
                format!(" {} ", role.name().to_uppercase()),
                Style::default().fg(Color::Black).bg(color(role_color(role))),
            ))
            .alignment(Alignment::Center),
        );
        lines
    }

    pub fn block(&self) -> Block<'static> {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color(self.team_color)));
        if self.upgraded {
            block = block
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(holo_color(self.phase)))
                .title(" ★ ");
        }
        block
    }

    pub fn widget(&self, width: u16) -> Paragraph<'static> {
        Paragraph::new(self.lines(width)).block(self.block())
    }
}
