use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::warn;
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
};
use std::{io, time::Duration};

use super::poller::ScanPoller;
use wlan_watcher::collectors::wlan::formatting::{COLUMN_HEADERS, format_status, record_columns};
use wlan_watcher::models::AdapterScanResult;

/// Presentation state owned by the dashboard; rebuilt from each cycle
#[derive(Debug, Default)]
struct ViewState {
    results: Vec<AdapterScanResult>,
    selected: usize,
    issues: usize,
    last_error: Option<String>,
    last_update: Option<DateTime<Local>>,
    cycles: u64,
}

impl ViewState {
    fn apply(&mut self, outcome: Result<wlan_watcher::collectors::wlan::ScanCycle>) {
        self.cycles += 1;
        self.last_update = Some(Local::now());

        match outcome {
            Ok(cycle) => {
                // Keep the selection on the last adapter, which is what the
                // single status field reports
                let was_last = self.selected + 1 >= self.results.len();
                self.issues = cycle.issues.len();
                self.results = cycle.results;
                self.last_error = None;
                if was_last || self.selected >= self.results.len() {
                    self.selected = self.results.len().saturating_sub(1);
                }
            }
            Err(err) => {
                warn!("Scan cycle failed: {err:#}");
                self.last_error = Some(format!("{err:#}"));
            }
        }
    }

    fn selected_result(&self) -> Option<&AdapterScanResult> {
        self.results.get(self.selected)
    }

    fn next_adapter(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + 1) % self.results.len();
        }
    }

    fn previous_adapter(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + self.results.len() - 1) % self.results.len();
        }
    }

    fn status_text(&self) -> String {
        if let Some(err) = &self.last_error {
            return format!("Scan failed: {err} (retrying)");
        }

        let status = format_status(self.selected_result().map_or(0, |r| r.total_count));
        if self.issues > 0 {
            format!("{status}  ({} skipped, see log)", self.issues)
        } else {
            status
        }
    }
}

pub struct Dashboard {
    poller: ScanPoller,
    state: ViewState,
}

impl Dashboard {
    pub fn new(poller: ScanPoller) -> Self {
        Self {
            poller,
            state: ViewState::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_app(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        if let Err(err) = res {
            eprintln!("Error: {err:?}");
        }

        Ok(())
    }

    async fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()>
    where
        B::Error: Send + Sync + 'static,
    {
        loop {
            if self.poller.is_due() {
                let outcome = self.poller.run_cycle().await;
                self.state.apply(outcome);
            }

            terminal.draw(|f| self.ui(f))?;

            let wait = self.poller.time_until_due().min(Duration::from_millis(100));
            if event::poll(wait)? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Tab | KeyCode::Right => self.state.next_adapter(),
                        KeyCode::BackTab | KeyCode::Left => self.state.previous_adapter(),
                        KeyCode::Char('r') => {
                            let outcome = self.poller.run_cycle().await;
                            self.state.apply(outcome);
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    fn ui(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(
                [
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Min(6),
                    Constraint::Length(3),
                ]
                .as_ref(),
            )
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_adapters(frame, chunks[1]);
        self.render_access_points(frame, chunks[2]);
        self.render_footer(frame, chunks[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let updated = self
            .state
            .last_update
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());

        let header = vec![Line::from(vec![
            Span::raw("WLAN Watcher - Live Scan"),
            Span::raw("    "),
            Span::styled(updated, Style::default().fg(Color::Yellow)),
            Span::raw(format!(
                "    cycle #{}  every {} ms",
                self.state.cycles,
                self.poller.interval().as_millis()
            )),
        ])];

        let block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::White));

        frame.render_widget(Paragraph::new(header).block(block), area);
    }

    fn render_adapters(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for (i, result) in self.state.results.iter().enumerate() {
            let style = if i == self.state.selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(result.adapter_label.clone(), style));
            spans.push(Span::raw("  "));
        }
        if spans.is_empty() {
            spans.push(Span::raw("No wireless adapters"));
        }

        let block = Block::default().borders(Borders::ALL).title("Adapters");
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_access_points(&self, frame: &mut Frame, area: Rect) {
        let rows: Vec<Row> = self
            .state
            .selected_result()
            .map(|result| {
                result
                    .records
                    .iter()
                    .map(|record| Row::new(record_columns(record)))
                    .collect()
            })
            .unwrap_or_default();

        let header = Row::new(COLUMN_HEADERS).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let widths = [
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(19),
            Constraint::Length(11),
            Constraint::Length(6),
            Constraint::Length(8),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("Access Points"))
            .style(Style::default().fg(Color::White));

        frame.render_widget(table, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let status_style = if self.state.last_error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };

        let footer = Paragraph::new(Line::from(vec![
            Span::styled(self.state.status_text(), status_style),
            Span::styled(
                "    Tab: adapter  r: rescan  q/ESC: quit",
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .block(Block::default().borders(Borders::TOP));

        frame.render_widget(footer, area);
    }
}
