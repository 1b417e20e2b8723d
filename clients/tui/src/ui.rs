use crate::app::App;
use blackjack::{Card, RoundResult, Suit};
use midnight_ace::msg::BetTarget;
use midnight_ace::state::RoundStatus;
use midnight_ace::HandView;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn card_span(card: Option<&Card>) -> Span<'static> {
    let Some(card) = card else {
        return Span::styled("?? ", Style::default().fg(Color::White).bg(Color::DarkGray));
    };
    let color = match card.suit {
        Suit::Hearts => Color::Red,
        Suit::Diamonds => Color::from_u32(0xFF_A5_00), // Orange
        Suit::Clubs => Color::Magenta,
        Suit::Spades => Color::Black,
    };
    Span::styled(
        format!("{} ", card.to_display()),
        Style::default().fg(color).bg(Color::Gray),
    )
}

fn result_style(result: RoundResult) -> Style {
    match result {
        RoundResult::PlayerWin | RoundResult::Blackjack => {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        }
        RoundResult::DealerWin | RoundResult::Bust => {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        }
        RoundResult::Push => Style::default().fg(Color::DarkGray),
    }
}

/// Cards wrapped to the block width and centred vertically.
fn card_lines(spans: Vec<Span<'static>>, area: Rect) -> Vec<Line<'static>> {
    let card_width = 4; // "10♥ " at most
    let per_line = (area.width.saturating_sub(2) / card_width).max(1) as usize;
    let wrapped: Vec<Line> = spans
        .chunks(per_line)
        .map(|chunk| Line::from(chunk.to_vec()))
        .collect();

    let padding_top = area.height.saturating_sub(2).saturating_sub(wrapped.len() as u16) / 2;
    let mut lines = vec![Line::from(""); padding_top as usize];
    lines.extend(wrapped);
    lines
}

pub fn ui(f: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(16),   // Table
            Constraint::Length(4), // Message + keys
        ])
        .split(f.area());

    render_title(f, app, main_chunks[0]);

    let (table_area, log_area) = if app.log_visible {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(main_chunks[1]);
        (horizontal[0], Some(horizontal[1]))
    } else {
        (main_chunks[1], None)
    };

    let table_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35), // Dealer
            Constraint::Percentage(35), // Player hands
            Constraint::Length(3),      // Betting circles
            Constraint::Length(4),      // Side bets and commentary
        ])
        .split(table_area);

    render_dealer(f, app, table_chunks[0]);
    render_player(f, app, table_chunks[1]);
    render_bets(f, app, table_chunks[2]);
    render_banter(f, app, table_chunks[3]);

    if let Some(log_area) = log_area {
        render_log(f, app, log_area);
    }
    render_status(f, app, main_chunks[2]);

    if app.rules_visible {
        render_rules(f, f.area());
    }
}

fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let view = &app.view;
    let title = Line::from(vec![
        Span::styled(
            "Midnight Ace",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "   Bankroll: {}   Round: {}   [{}]",
            view.bankroll, view.round_id, view.status
        )),
    ]);
    let widget = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn render_dealer(f: &mut Frame, app: &App, area: Rect) {
    let view = &app.view;
    let spans: Vec<Span> = view.dealer_cards.iter().map(|c| card_span(c.as_ref())).collect();
    let lines = if spans.is_empty() {
        card_lines(vec![Span::raw("Waiting for the deal")], area)
    } else {
        card_lines(spans, area)
    };

    let title = match view.dealer_value {
        Some(value) if view.hole_card_hidden() => format!(" Dealer ({value} showing) "),
        Some(value) => format!(" Dealer ({value}) "),
        None => " Dealer ".to_string(),
    };
    let widget = Paragraph::new(lines)
        .block(Block::default().title(title).borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

fn hand_title(hand: &HandView, index: usize, split: bool) -> String {
    let mut title = if split {
        format!(" Hand {} ({}) bet {}", index + 1, hand.value, hand.bet)
    } else {
        format!(" You ({}) bet {}", hand.value, hand.bet)
    };
    if hand.doubled {
        title.push_str(" x2");
    }
    if let Some(result) = hand.result {
        title.push_str(&format!(" - {}", result.message()));
    }
    title.push(' ');
    title
}

fn render_player(f: &mut Frame, app: &App, area: Rect) {
    let hands = &app.view.player_hands;
    if hands.is_empty() {
        let widget = Paragraph::new("Place your bets")
            .block(Block::default().title(" You ").borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(widget, area);
        return;
    }

    // Split hands side by side
    let constraints = vec![Constraint::Ratio(1, hands.len() as u32); hands.len()];
    let hand_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, hand) in hands.iter().enumerate() {
        let border_style = if hand.active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if let Some(result) = hand.result {
            result_style(result)
        } else {
            Style::default()
        };

        let spans = hand.cards.iter().map(|c| card_span(Some(c))).collect();
        let widget = Paragraph::new(card_lines(spans, hand_areas[i]))
            .block(
                Block::default()
                    .title(hand_title(hand, i, hands.len() > 1))
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .alignment(Alignment::Center);
        f.render_widget(widget, hand_areas[i]);
    }
}

fn render_bets(f: &mut Frame, app: &App, area: Rect) {
    let circles = [BetTarget::Main, BetTarget::PerfectPairs, BetTarget::PlusThree];
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let betting = app.view.status == RoundStatus::Betting;
    for (target, circle_area) in circles.into_iter().zip(areas.iter()) {
        let style = if betting && target == app.bet_target {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let widget = Paragraph::new(app.view.bets.get(target).to_string())
            .block(
                Block::default()
                    .title(format!(" {} ", target.label()))
                    .borders(Borders::ALL)
                    .border_style(style),
            )
            .alignment(Alignment::Center);
        f.render_widget(widget, *circle_area);
    }
}

fn render_banter(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    if let Some(outcome) = &app.view.side_bet_results {
        let mut spans = vec![Span::styled("Side bets: ", Style::default().fg(Color::DarkGray))];
        let labels = [&outcome.perfect_pairs_label, &outcome.plus_three_label];
        let hits: Vec<&str> = labels.into_iter().flatten().map(String::as_str).collect();
        if hits.is_empty() {
            spans.push(Span::raw("nothing"));
        } else {
            spans.push(Span::styled(hits.join(", "), Style::default().fg(Color::Green)));
            if outcome.total_payout() > 0 {
                spans.push(Span::raw(format!(" (paid {})", outcome.total_payout())));
            }
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(Span::styled(
        format!("Dealer: \"{}\"", app.view.commentary),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
    )));

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}

fn render_log(f: &mut Frame, app: &App, area: Rect) {
    let log_frame_height = area.height.saturating_sub(2) as usize; // Subtract borders
    let log_start_idx = app.logs.len().saturating_sub(log_frame_height);

    let log_lines: Vec<Line> = app
        .logs
        .iter()
        .skip(log_start_idx)
        .map(|log| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::DarkGray)),
                Span::raw(log.clone()),
            ])
        })
        .collect();

    let logs_widget = Paragraph::new(log_lines)
        .block(
            Block::default()
                .title(" Game Log ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    f.render_widget(logs_widget, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let message_style = match app.view.result {
        Some(result) => result_style(result),
        None => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    };
    let lines = vec![
        Line::from(Span::styled(app.view.message.clone(), message_style)),
        Line::from(Span::styled(
            app.key_hints(),
            Style::default().fg(Color::Yellow),
        )),
    ];
    let status_bar = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(status_bar, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_rules(f: &mut Frame, area: Rect) {
    let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("House rules", heading)),
        Line::from("Blackjack pays 3:2, wins pay 1:1, ties push"),
        Line::from("Dealer stands on all 17s"),
        Line::from("Double on any first two cards, once per round"),
        Line::from("Split one pair, once per round"),
        Line::from(""),
        Line::from(Span::styled("Perfect Pairs", heading)),
        Line::from("Perfect Pair (same suit)      25:1"),
        Line::from("Colored Pair (same colour)    12:1"),
        Line::from("Mixed Pair                     6:1"),
        Line::from(""),
        Line::from(Span::styled("21+3 (your two cards + dealer up-card)", heading)),
        Line::from("Suited Trips                 100:1"),
        Line::from("Straight Flush                40:1"),
        Line::from("Three of a Kind               30:1"),
        Line::from("Straight                      10:1"),
        Line::from("Flush                          5:1"),
        Line::from(""),
        Line::from(Span::styled("[r] to close", Style::default().fg(Color::DarkGray))),
    ];

    let popup = centered(area, 48, lines.len() as u16 + 2);
    f.render_widget(Clear, popup);
    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(" Rules & Paytables ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(widget, popup);
}
