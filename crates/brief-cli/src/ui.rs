//! TUI implementation for brief

use brief_api::Result as ApiResult;
use brief_flow::{
    ConversationMachine, Error as FlowError, Operation, Panel, Reply, Request, Resolved, Transport,
};
use brief_tui::{
    Theme,
    input::{Action, key_to_action},
    widgets::{MessageList, Spinner, SummaryCard, message_list},
};
use crossterm::event::{Event, EventStream, KeyEventKind, MouseEventKind};
use futures::StreamExt;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use std::future::Future;
use std::io::Stdout;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::forms::{Focus, Forms};

/// The reply future for the request currently in flight
type PendingReply = Pin<Box<dyn Future<Output = ApiResult<Reply>>>>;

/// What the loop should do after an action
enum Effect {
    None,
    Send(Request),
    Quit,
}

/// TUI application state
pub struct TuiState {
    machine: ConversationMachine,
    transport: Arc<dyn Transport>,
    forms: Forms,
    /// Transcript scroll position (`usize::MAX` = stick to bottom)
    scroll: usize,
    /// Transcript length and typing flag at the last sync
    seen: (usize, bool),
    /// Last rejected action, shown in the status bar
    status: Option<String>,
    theme: Theme,
    /// Spinner start time for animation
    spinner_start: Instant,
    base_url: String,
}

impl TuiState {
    pub fn new(
        machine: ConversationMachine,
        transport: Arc<dyn Transport>,
        theme: Theme,
        base_url: String,
    ) -> Self {
        Self {
            machine,
            transport,
            forms: Forms::new(),
            scroll: 0,
            seen: (0, false),
            status: None,
            theme,
            spinner_start: Instant::now(),
            base_url,
        }
    }

    fn dispatch(&mut self, request: Request) -> PendingReply {
        self.spinner_start = Instant::now();
        let transport = Arc::clone(&self.transport);
        Box::pin(async move { request.send(transport.as_ref()).await })
    }

    /// Bring the forms and scroll position in line with the machine
    fn sync(&mut self) {
        let notes_form_visible = self
            .machine
            .summary()
            .is_some_and(|s| s.notes_form_visible());
        self.forms.sync(
            self.machine.controls(),
            self.machine.panel(),
            notes_form_visible,
        );
        if let Some(panel) = self.machine.take_reveal() {
            self.forms.focus_panel(panel);
        }

        let transcript = self.machine.transcript();
        let seen = (transcript.len(), transcript.is_typing());
        if seen != self.seen {
            self.seen = seen;
            self.scroll_to_bottom();
        }
    }

    fn scroll_to_bottom(&mut self) {
        // Resolved against the content height during render
        self.scroll = usize::MAX;
    }

    fn handle_action(&mut self, action: Action, width: u16) -> Effect {
        match action {
            Action::Quit => Effect::Quit,
            Action::Retry => self.retry_start(),
            Action::Submit => self.submit(),
            Action::Tab => {
                self.forms.focus_next();
                Effect::None
            }
            Action::BackTab => {
                self.forms.focus_prev();
                Effect::None
            }
            Action::Up => {
                if !self.forms.step_contact_field(-1) {
                    self.scroll = self.scroll.saturating_sub(1);
                }
                Effect::None
            }
            Action::Down => {
                if !self.forms.step_contact_field(1) {
                    self.scroll = self.scroll.saturating_add(1);
                }
                Effect::None
            }
            Action::PageUp => {
                self.scroll = self.scroll.saturating_sub(10);
                Effect::None
            }
            Action::PageDown => {
                self.scroll = self.scroll.saturating_add(10);
                Effect::None
            }
            other => {
                self.forms.handle_edit(&other, width);
                Effect::None
            }
        }
    }

    fn retry_start(&mut self) -> Effect {
        if self.machine.session().is_started() {
            return Effect::None;
        }
        match self.machine.begin_start() {
            Ok(request) => {
                self.status = None;
                Effect::Send(request)
            }
            Err(e) => self.reject(e),
        }
    }

    fn submit(&mut self) -> Effect {
        let now = Instant::now();
        let request = match self.forms.focus() {
            Focus::Chat => {
                let text = self.forms.chat.content().to_string();
                match self.machine.submit_message(&text, now) {
                    Ok(request) => {
                        self.forms.chat.clear();
                        request
                    }
                    Err(e) => return self.reject(e),
                }
            }
            Focus::Contact(_) => {
                let [name, email, phone] = self.forms.contact_values();
                match self.machine.submit_contact(&name, &email, &phone) {
                    Ok(request) => Some(request),
                    Err(e) => return self.reject(e),
                }
            }
            Focus::Notes => {
                let notes = self.forms.notes.content().to_string();
                match self.machine.submit_notes(&notes) {
                    Ok(request) => {
                        self.forms.notes.clear();
                        Some(request)
                    }
                    Err(e) => return self.reject(e),
                }
            }
        };

        self.status = None;
        match request {
            Some(request) => Effect::Send(request),
            None => Effect::None,
        }
    }

    fn reject(&mut self, error: FlowError) -> Effect {
        match &error {
            FlowError::EmptyMessage => return Effect::None,
            FlowError::MissingContactField(field) => self.forms.focus_contact_field(field),
            _ => {}
        }
        self.status = Some(error.to_string());
        Effect::None
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Layout: transcript (flex), panel, status bar (1), chat input (3)
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(self.panel_height()),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(size);

        self.render_messages(frame, chunks[0]);
        self.render_panel(frame, chunks[1]);
        self.render_status(frame, chunks[2]);
        self.forms
            .chat
            .render(chunks[3], frame.buffer_mut(), &self.theme);
    }

    fn panel_height(&self) -> u16 {
        if self.forms.contact_visible() {
            return 3;
        }
        match (self.machine.panel(), self.machine.summary()) {
            (Panel::Summary, Some(summary)) => {
                let notes = if self.forms.notes_visible() { 3 } else { 0 };
                SummaryCard::new(summary, &self.theme).height() + notes
            }
            _ => 0,
        }
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        match (self.machine.panel(), self.machine.summary()) {
            (Panel::Contact, _) => {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Ratio(1, 3); 3])
                    .split(area);
                for (field, column) in self.forms.contact.iter().zip(columns.iter()) {
                    field.render(*column, frame.buffer_mut(), &self.theme);
                }
            }
            (Panel::Summary, Some(summary)) => {
                let card = SummaryCard::new(summary, &self.theme);
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(card.height()), Constraint::Min(0)])
                    .split(area);
                frame.render_widget(card, rows[0]);
                if self.forms.notes_visible() {
                    self.forms
                        .notes
                        .render(rows[1], frame.buffer_mut(), &self.theme);
                }
            }
            _ => {}
        }
    }

    fn render_messages(&mut self, frame: &mut Frame, area: Rect) {
        let title = format!(" brief │ {} ", self.base_url);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(title);

        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        let transcript = self.machine.transcript();
        let typing = transcript.is_typing();
        let content_height = message_list::calculate_message_height(
            transcript.entries(),
            typing,
            inner.width as usize,
        );
        let max_scroll = content_height.saturating_sub(inner.height as usize);
        self.scroll = self.scroll.min(max_scroll);

        let list = MessageList::new(transcript.entries(), &self.theme)
            .typing(typing.then_some(self.spinner_start))
            .scroll(self.scroll);
        frame.render_widget(list, inner);

        if content_height > inner.height as usize {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"))
                .track_symbol(Some("│"))
                .thumb_symbol("█");

            let mut scrollbar_state = ScrollbarState::new(content_height)
                .position(self.scroll)
                .viewport_content_length(inner.height as usize);

            frame.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if let Some(operation) = self.machine.in_flight() {
            let label = match operation {
                Operation::Start => "Connecting...",
                Operation::CollectRequirements => "Sending...",
                Operation::GenerateEstimate => "Generating estimate...",
                Operation::CollectContact => "Submitting contact details...",
                Operation::Complete => "Submitting...",
            };
            let spinner = Spinner::new(label, &self.theme).with_start_time(self.spinner_start);
            frame.render_widget(spinner, area);
            return;
        }

        let (left, left_style) = match &self.status {
            Some(status) => (status.clone(), self.theme.error_style()),
            None if self.machine.is_completed() => {
                ("Completed".to_string(), self.theme.success_style())
            }
            None => (
                self.machine.session().current_step().to_string(),
                self.theme.dim_style(),
            ),
        };
        let right = if !self.machine.session().is_started() {
            "Ctrl+R: retry │ Ctrl+C: quit"
        } else {
            "Tab: switch │ PgUp/Dn: scroll │ Ctrl+C: quit"
        };

        let left_width = left.chars().count();
        let right_width = right.chars().count();
        let available = area.width as usize;

        let line = if left_width + right_width + 2 <= available {
            let spacing = available - left_width - right_width;
            Line::from(vec![
                Span::styled(left, left_style),
                Span::raw(" ".repeat(spacing)),
                Span::styled(right, self.theme.dim_style()),
            ])
        } else {
            Line::from(Span::styled(left, left_style))
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

async fn next_reply(pending: &mut Option<PendingReply>) -> ApiResult<Reply> {
    match pending {
        Some(reply) => reply.await,
        None => std::future::pending().await,
    }
}

/// Run the TUI application
pub async fn run_tui(mut state: TuiState) -> anyhow::Result<()> {
    use crossterm::{
        event::{
            DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        },
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };
    use ratatui::{Terminal, backend::CrosstermBackend};
    use std::io;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut state).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    result
}

async fn event_loop(
    terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<Stdout>>,
    state: &mut TuiState,
) -> anyhow::Result<()> {
    let mut event_stream = EventStream::new();

    // Tick interval for animations and presentation timers
    let mut tick_interval = tokio::time::interval(Duration::from_millis(80));

    let mut pending: Option<PendingReply> = match state.machine.begin_start() {
        Ok(request) => Some(state.dispatch(request)),
        Err(_) => None,
    };

    loop {
        state.machine.tick(Instant::now());
        state.sync();
        terminal.draw(|frame| state.render(frame))?;
        let area_width = terminal.size()?.width;

        tokio::select! {
            result = next_reply(&mut pending) => {
                pending = None;
                if let Resolved::Continue(request) = state.machine.resolve(result, Instant::now()) {
                    pending = Some(state.dispatch(request));
                }
            }

            event = event_stream.next() => {
                match event {
                    Some(Ok(Event::Key(key))) if key.kind != KeyEventKind::Release => {
                        match state.handle_action(key_to_action(key), area_width) {
                            Effect::Quit => break Ok(()),
                            Effect::Send(request) => pending = Some(state.dispatch(request)),
                            Effect::None => {}
                        }
                    }
                    Some(Ok(Event::Paste(text))) => {
                        state.handle_action(Action::Paste(text), area_width);
                    }
                    Some(Ok(Event::Mouse(mouse))) => {
                        match mouse.kind {
                            MouseEventKind::ScrollUp => {
                                state.scroll = state.scroll.saturating_sub(3);
                            }
                            MouseEventKind::ScrollDown => {
                                state.scroll = state.scroll.saturating_add(3);
                            }
                            _ => {}
                        }
                    }
                    Some(Err(e)) => {
                        break Err(anyhow::anyhow!("Event error: {}", e));
                    }
                    None => {
                        break Ok(());
                    }
                    _ => {}
                }
            }

            _ = tick_interval.tick() => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brief_api::{ConversationId, Estimate, EstimateResponse, StartResponse, StepResponse};
    use brief_flow::FlowConfig;
    use ratatui::{Terminal, backend::TestBackend};

    fn state() -> TuiState {
        let client = brief_api::Client::new("http://localhost:8000").unwrap();
        TuiState::new(
            ConversationMachine::new(FlowConfig::default()),
            Arc::new(client),
            Theme::dark(),
            "http://localhost:8000".into(),
        )
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_submit_before_start_reports_status() {
        let mut state = state();
        state.sync();
        assert!(matches!(state.handle_action(Action::Submit, 80), Effect::None));
        assert_eq!(state.status.as_deref(), Some("Conversation has not started"));

        for c in "hi".chars() {
            state.handle_action(Action::Char(c), 80);
        }
        // Chat stays disabled until the conversation starts
        assert_eq!(state.forms.chat.content(), "");
    }

    #[test]
    fn test_retry_sends_start_once() {
        let mut state = state();
        assert!(matches!(
            state.handle_action(Action::Retry, 80),
            Effect::Send(Request::Start)
        ));
        assert!(matches!(state.handle_action(Action::Retry, 80), Effect::None));
        assert_eq!(state.status.as_deref(), Some("Still waiting for the previous request"));
    }

    #[test]
    fn test_contact_reveal_takes_focus_and_space() {
        let now = Instant::now();
        let mut state = state();
        assert_eq!(state.panel_height(), 0);

        let m = &mut state.machine;
        m.begin_start().unwrap();
        m.resolve(
            Ok(Reply::Started(StartResponse {
                conversation_id: ConversationId::new("c1"),
                current_step: "collecting_requirements".into(),
                message: "Hi!".into(),
            })),
            now,
        );
        m.submit_message("A store", now).unwrap();
        m.resolve(
            Ok(Reply::Step(StepResponse {
                current_step: "generating_estimate".into(),
                message: "Estimating".into(),
            })),
            now,
        );
        m.resolve(
            Ok(Reply::Estimate(EstimateResponse {
                current_step: "collecting_contact".into(),
                message: "Here you go".into(),
                estimate: Estimate {
                    timeline: "4 weeks".into(),
                    budget_range: "$5k-10k".into(),
                    complexity: "Medium".into(),
                },
            })),
            now,
        );
        state.sync();
        assert!(!state.forms.contact_visible());

        state.machine.tick(now + Duration::from_secs(1));
        state.sync();
        assert!(state.forms.contact_visible());
        assert_eq!(state.forms.focus(), Focus::Contact(0));
        assert_eq!(state.panel_height(), 3);
    }

    #[test]
    fn test_render_shows_title_and_typing() {
        let mut state = state();
        state.machine.begin_start().unwrap();
        state.sync();

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|frame| state.render(frame)).unwrap();
        let text = screen(&terminal);
        assert!(text.contains("brief │ http://localhost:8000"));
        assert!(text.contains("typing..."));
        assert!(text.contains("Connecting..."));
    }
}
