//! Combat HUD.
//!
//! Layout, top to bottom: header with elapsed time, the two combatants side
//! by side, the rolling combat log, and the controls line.

use arena_core::{CombatConfig, CombatSnapshot, CombatantView};
use arena_runtime::HudSink;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};

use crate::terminal::Tui;

/// Height of the log panel: ten entries plus borders.
pub const LOG_PANEL_HEIGHT: u16 = CombatConfig::MAX_LOG_ENTRIES as u16 + 2;

pub const CONTROLS: &str =
    "[a] Melee | [s] Magic | [z] Main-Hand | [x] Off-Hand | [d] Neck | [c] Ring | [q] Forfeit";

/// Draws snapshots onto the terminal.
pub struct TerminalHud<'a> {
    terminal: &'a mut Tui,
}

impl<'a> TerminalHud<'a> {
    pub fn new(terminal: &'a mut Tui) -> Self {
        Self { terminal }
    }
}

impl HudSink for TerminalHud<'_> {
    fn render(&mut self, snapshot: &CombatSnapshot) -> std::io::Result<()> {
        self.terminal.draw(|frame| render_frame(frame, snapshot))?;
        Ok(())
    }
}

fn render_frame(frame: &mut Frame, snapshot: &CombatSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(LOG_PANEL_HEIGHT),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{} vs {}", snapshot.player.name, snapshot.opponent.name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" | {:.1}s | {}", snapshot.elapsed, snapshot.state)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Arena"));
    frame.render_widget(header, chunks[0]);

    let sides = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_combatant(frame, sides[0], &snapshot.player);
    render_combatant(frame, sides[1], &snapshot.opponent);

    render_log(frame, chunks[2], snapshot);

    let footer = Paragraph::new(CONTROLS).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[3]);
}

fn render_combatant(frame: &mut Frame, area: Rect, view: &CombatantView) {
    let color = if view.is_player {
        Color::Cyan
    } else {
        Color::Red
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            view.name.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let hp = Gauge::default()
        .gauge_style(Style::default().fg(hp_color(view)))
        .ratio(ratio(view.hp, view.max_hp))
        .label(format!("HP {:.0}/{:.0}", view.hp.max(0.0), view.max_hp));
    frame.render_widget(hp, rows[0]);

    let bar = Gauge::default()
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio(ratio(view.bar, CombatConfig::BAR_FULL))
        .label(format!("Bar {:.0}%", view.bar));
    frame.render_widget(bar, rows[1]);

    frame.render_widget(Paragraph::new(detail_lines(view)), rows[2]);
}

fn detail_lines(view: &CombatantView) -> Vec<Line<'static>> {
    let stats = &view.stats;
    let mut lines = vec![
        Line::from(format!("Queued: {}", view.queued)),
        Line::from(format!(
            "AtkPw {} AtkSp {} MgcPw {}",
            stats.atk_pw, stats.atk_sp, stats.mgc_pw
        )),
        Line::from(format!(
            "Block {} Dodge {} Armor {} MgcRs {} Crits {}",
            stats.block, stats.dodge, stats.armor, stats.mgc_rs, stats.crits
        )),
    ];
    if view.is_player {
        lines.push(Line::from(format!(
            "DPS {:.1} | Dealt {:.0} | Taken {:.0}",
            view.dps, view.damage_dealt, view.damage_taken
        )));
    }

    if view.effects.is_empty() {
        lines.push(Line::from("Effects: none"));
    } else {
        lines.push(Line::from("Effects:"));
        for effect in &view.effects {
            let (tag, color) = if effect.is_buff {
                ("buff", Color::Green)
            } else {
                ("debuff", Color::Magenta)
            };
            lines.push(Line::from(vec![
                Span::raw(format!("  {} ", effect.name)),
                Span::styled(format!("[{tag}]"), Style::default().fg(color)),
                Span::raw(format!(" {:.1}s", effect.remaining)),
            ]));
        }
    }
    lines
}

fn render_log(frame: &mut Frame, area: Rect, snapshot: &CombatSnapshot) {
    let items: Vec<ListItem> = snapshot
        .log
        .iter()
        .map(|entry| ListItem::new(entry.to_string()))
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Combat Log"));
    frame.render_widget(list, area);
}

fn ratio(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn hp_color(view: &CombatantView) -> Color {
    match ratio(view.hp, view.max_hp) {
        r if r > 0.5 => Color::Green,
        r if r > 0.25 => Color::Yellow,
        _ => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{CombatStats, EffectView};

    fn view() -> CombatantView {
        CombatantView {
            name: "Hero".to_owned(),
            is_player: true,
            hp: 30.0,
            max_hp: 120.0,
            bar: 40.0,
            stats: CombatStats::default(),
            effects: vec![EffectView {
                name: "Rend".to_owned(),
                remaining: 2.5,
                is_buff: false,
            }],
            queued: "Basic Melee (Basic Melee)".to_owned(),
            damage_dealt: 50.0,
            damage_taken: 90.0,
            dps: 4.2,
        }
    }

    #[test]
    fn ratio_is_clamped() {
        assert_eq!(ratio(150.0, 100.0), 1.0);
        assert_eq!(ratio(-5.0, 100.0), 0.0);
        assert_eq!(ratio(5.0, 0.0), 0.0);
    }

    #[test]
    fn hp_color_follows_remaining_health() {
        assert_eq!(hp_color(&view()), Color::Red);
        let hurt = CombatantView { hp: 45.0, ..view() };
        assert_eq!(hp_color(&hurt), Color::Yellow);
        let healthy = CombatantView { hp: 100.0, ..view() };
        assert_eq!(hp_color(&healthy), Color::Green);
    }

    #[test]
    fn player_details_include_dps_and_effects() {
        let text: Vec<String> = detail_lines(&view())
            .iter()
            .map(|line| line.to_string())
            .collect();
        assert!(text.iter().any(|l| l.starts_with("DPS 4.2")));
        assert!(text.iter().any(|l| l.contains("Rend [debuff] 2.5s")));

        let opponent = CombatantView {
            is_player: false,
            ..view()
        };
        assert!(!detail_lines(&opponent).iter().any(|l| l.to_string().starts_with("DPS")));
    }
}
