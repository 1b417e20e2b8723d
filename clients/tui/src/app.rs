use crate::tui_logger::LogBuffer;
use crossterm::event::KeyCode;
use midnight_ace::commentary::{CommentaryRequest, Commentator, PhraseBook, DEFAULT_PHRASE};
use midnight_ace::msg::{BetTarget, Intent};
use midnight_ace::state::RoundStatus;
use midnight_ace::{Table, TableSnapshot};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

const MAX_LOG_LINES: usize = 200;

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(Intent),
    /// Add the n-th chip (1-based) to the selected circle.
    Chip(usize),
    Target(BetTarget),
    ToggleLog,
    ToggleRules,
    Quit,
}

pub fn command_for_key(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char('m') => Command::Target(BetTarget::Main),
        KeyCode::Char('p') => Command::Target(BetTarget::PerfectPairs),
        KeyCode::Char('t') => Command::Target(BetTarget::PlusThree),
        KeyCode::Char(c @ '1'..='5') => Command::Chip(c as usize - '0' as usize),
        KeyCode::Char('c') => Command::Play(Intent::ClearBets),
        KeyCode::Char('d') | KeyCode::Enter => Command::Play(Intent::Deal),
        KeyCode::Char('h') | KeyCode::Up => Command::Play(Intent::Hit),
        KeyCode::Char('s') | KeyCode::Down => Command::Play(Intent::Stand),
        KeyCode::Char('x') | KeyCode::Right => Command::Play(Intent::Double),
        KeyCode::Char('l') | KeyCode::Left => Command::Play(Intent::Split),
        KeyCode::Char('n') => Command::Play(Intent::NewRound),
        KeyCode::Char('g') => Command::ToggleLog,
        KeyCode::Char('r') => Command::ToggleRules,
        _ => return None,
    };
    Some(command)
}

pub struct App {
    pub table: Table,
    /// The frame on screen. Lags behind `table` while dealer draws are paced.
    pub view: TableSnapshot,
    pending_frames: VecDeque<TableSnapshot>,
    next_frame_at: Option<Instant>,
    pace: Duration,
    rng: ChaCha8Rng,
    pub bet_target: BetTarget,
    /// Sent once the last frame of a transition is on screen.
    queued_commentary: Option<CommentaryRequest>,
    commentary_tasks: Vec<JoinHandle<(CommentaryRequest, String)>>,
    commentator: Arc<Mutex<PhraseBook<ChaCha8Rng>>>,
    pub logs: VecDeque<String>,
    log_buffer: LogBuffer,
    pub log_visible: bool,
    pub rules_visible: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        table: Table,
        rng: ChaCha8Rng,
        commentator: PhraseBook<ChaCha8Rng>,
        pace: Duration,
        log_buffer: LogBuffer,
    ) -> App {
        App {
            view: table.snapshot(),
            table,
            pending_frames: VecDeque::new(),
            next_frame_at: None,
            pace,
            rng,
            bet_target: BetTarget::Main,
            queued_commentary: None,
            commentary_tasks: Vec::new(),
            commentator: Arc::new(Mutex::new(commentator)),
            logs: VecDeque::from(vec![
                "Welcome to the Midnight Ace table".to_string(),
                "Pick a circle [m]/[p]/[t], add chips [1]-[5], [d] to deal".to_string(),
            ]),
            log_buffer,
            log_visible: true,
            rules_visible: false,
            should_quit: false,
        }
    }

    pub fn is_animating(&self) -> bool {
        !self.pending_frames.is_empty()
    }

    pub fn sync_logs(&mut self) {
        // Pull any new log messages from the shared buffer
        let messages: Vec<String> = if let Ok(mut buffer) = self.log_buffer.lock() {
            buffer.drain(..).collect()
        } else {
            Vec::new()
        };

        for msg in messages {
            self.add_log(msg);
        }
    }

    pub fn add_log(&mut self, message: String) {
        self.logs.push_back(message);
        if self.logs.len() > MAX_LOG_LINES {
            self.logs.pop_front();
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        let Some(command) = command_for_key(code) else {
            return;
        };

        match command {
            Command::Quit => self.should_quit = true,
            Command::ToggleLog => self.log_visible = !self.log_visible,
            Command::ToggleRules => self.rules_visible = !self.rules_visible,
            Command::Target(target) => {
                self.bet_target = target;
                self.add_log(format!("Betting on {}", target.label()));
            }
            // Transitions are strictly one at a time
            _ if self.is_animating() => {}
            Command::Chip(position) => match self.table.config.chip(position) {
                Some(amount) => self.apply(Intent::PlaceBet {
                    target: self.bet_target,
                    amount,
                }),
                None => self.add_log(format!("No chip on key {position}")),
            },
            Command::Play(intent) => self.apply(intent),
        }
    }

    pub fn apply(&mut self, intent: Intent) {
        let transition = self.table.execute(intent, &mut self.rng);
        if let Some(err) = &transition.rejection {
            self.add_log(format!("{}: {err}", intent.name()));
        }
        self.table = transition.table;
        self.queued_commentary = transition.commentary;
        if log::log_enabled!(log::Level::Trace) {
            match self.table.snapshot().to_json() {
                Ok(json) => log::trace!("{json}"),
                Err(e) => log::warn!("Snapshot not serializable: {e}"),
            }
        }

        let mut frames: VecDeque<_> = transition.frames.into();
        if self.pace.is_zero() {
            if let Some(last) = frames.pop_back() {
                self.view = last;
            }
            self.dispatch_commentary();
            return;
        }

        if let Some(first) = frames.pop_front() {
            self.view = first;
        }
        self.pending_frames = frames;
        if self.pending_frames.is_empty() {
            self.dispatch_commentary();
        } else {
            self.next_frame_at = Some(Instant::now() + self.pace);
        }
    }

    /// Show the next paced frame once its time has come.
    pub fn advance_frames(&mut self, now: Instant) {
        let Some(due) = self.next_frame_at else {
            return;
        };
        if now < due {
            return;
        }

        if let Some(frame) = self.pending_frames.pop_front() {
            self.view = frame;
        }
        if self.pending_frames.is_empty() {
            self.next_frame_at = None;
            self.dispatch_commentary();
        } else {
            self.next_frame_at = Some(now + self.pace);
        }
    }

    fn dispatch_commentary(&mut self) {
        let Some(request) = self.queued_commentary.take() else {
            return;
        };
        let commentator = Arc::clone(&self.commentator);
        let handle = tokio::task::spawn_blocking(move || {
            let text = match commentator.lock() {
                Ok(mut book) => book.comment(&request),
                Err(_) => DEFAULT_PHRASE.to_string(),
            };
            (request, text)
        });
        self.commentary_tasks.push(handle);
    }

    /// Collect finished commentary. Answers the table has moved past are dropped.
    pub async fn poll_commentary(&mut self) {
        let (finished, running): (Vec<_>, Vec<_>) = self
            .commentary_tasks
            .drain(..)
            .partition(|task| task.is_finished());
        self.commentary_tasks = running;

        for task in finished {
            match task.await {
                Ok((request, text)) => {
                    if self.table.accept_commentary(&request, text.clone()) {
                        self.view.commentary = text;
                    }
                }
                Err(e) => log::warn!("Commentary task failed: {e}"),
            }
        }
    }

    pub fn abort_tasks(&mut self) {
        for task in self.commentary_tasks.drain(..) {
            task.abort();
        }
    }

    /// Keys that do something right now, for the status bar.
    pub fn key_hints(&self) -> &'static str {
        if self.is_animating() {
            return "Dealer is playing...  [g] Log  [r] Rules  [q] Quit";
        }
        match self.view.status {
            RoundStatus::Betting => {
                "[m/p/t] Circle  [1-5] Chip  [c] Clear  [d] Deal  [g] Log  [r] Rules  [q] Quit"
            }
            RoundStatus::Playing => "[↑] Hit  [↓] Stand  [→] Double  [←] Split  [q] Quit",
            RoundStatus::DealerTurn => "Dealer is playing...",
            RoundStatus::GameOver => "[n] New round  [g] Log  [r] Rules  [q] Quit",
        }
    }
}
