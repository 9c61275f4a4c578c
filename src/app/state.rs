//! The TUI's mutable state and its key/message handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use super::messages::AppMessage;
use super::worker;
use crate::auth::Session;
use crate::chat::ConversationEvent;
use crate::models::{
    ChatMessage, CrisisResource, Exercise, MessageRole, MoodEntry, NewExerciseSession,
    NewMoodEntry, Therapist,
};
use crate::store::StoreClient;
use crate::traits::SessionProvider;

const TOAST_DURATION: Duration = Duration::from_secs(4);

/// The five top-level screens, cycled with Tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Chat,
    Mood,
    Exercises,
    Resources,
    Therapy,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Chat,
        Screen::Mood,
        Screen::Exercises,
        Screen::Resources,
        Screen::Therapy,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Chat => "Chat",
            Screen::Mood => "Mood",
            Screen::Exercises => "Exercises",
            Screen::Resources => "Resources",
            Screen::Therapy => "Therapy",
        }
    }

    fn next(self) -> Screen {
        let idx = Screen::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Screen::ALL[(idx + 1) % Screen::ALL.len()]
    }

    fn previous(self) -> Screen {
        let idx = Screen::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Screen::ALL[(idx + Screen::ALL.len() - 1) % Screen::ALL.len()]
    }
}

/// A transient status line shown at the bottom of every screen.
#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    expires_at: Instant,
}

/// Render state plus the channels that drive it.
///
/// The chat worker owns the authoritative conversation; `chat_log` is the
/// render copy, kept in sync from [`ConversationEvent`]s.
pub struct App {
    pub screen: Screen,
    pub input: String,
    pub chat_log: Vec<ChatMessage>,
    pub streaming: bool,
    pub mood_score: Option<i32>,
    pub mood_entries: Vec<MoodEntry>,
    pub exercises: Vec<Exercise>,
    pub crisis_resources: Vec<CrisisResource>,
    pub therapists: Vec<Therapist>,
    /// List cursor for the current screen; reset on screen change.
    pub selected: usize,
    pub toast: Option<Toast>,
    pub should_quit: bool,
    pub needs_redraw: bool,
    chat_tx: mpsc::UnboundedSender<String>,
    msg_tx: mpsc::UnboundedSender<AppMessage>,
    store: StoreClient,
    session: Session,
}

impl App {
    pub fn new(
        chat_tx: mpsc::UnboundedSender<String>,
        msg_tx: mpsc::UnboundedSender<AppMessage>,
        store: StoreClient,
        session: Session,
    ) -> Self {
        Self {
            screen: Screen::Chat,
            input: String::new(),
            chat_log: Vec::new(),
            streaming: false,
            mood_score: None,
            mood_entries: Vec::new(),
            exercises: Vec::new(),
            crisis_resources: Vec::new(),
            therapists: Vec::new(),
            selected: 0,
            toast: None,
            should_quit: false,
            needs_redraw: true,
            chat_tx,
            msg_tx,
            store,
            session,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_signed_in()
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    fn toast(&mut self, text: impl Into<String>) {
        self.toast = Some(Toast {
            text: text.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
        self.mark_dirty();
    }

    /// Called on every timer tick; expires the toast.
    pub fn tick(&mut self) {
        if let Some(toast) = &self.toast {
            if Instant::now() >= toast.expires_at {
                self.toast = None;
                self.mark_dirty();
            }
        }
    }

    /// Length of the list shown on the current screen, for cursor clamping.
    fn current_list_len(&self) -> usize {
        match self.screen {
            Screen::Chat => 0,
            Screen::Mood => self.mood_entries.len(),
            Screen::Exercises => self.exercises.len(),
            Screen::Resources => self.crisis_resources.len(),
            Screen::Therapy => self.therapists.len(),
        }
    }

    fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.selected = 0;
        self.input.clear();
        self.request_screen_data();
        self.mark_dirty();
    }

    /// Kick off the fetch backing the current screen. Results come back as
    /// [`AppMessage`]s; the screen renders whatever it has meanwhile.
    fn request_screen_data(&mut self) {
        match self.screen {
            Screen::Chat => {}
            Screen::Mood => {
                if let Some(user_id) = self.session.user_id() {
                    worker::fetch_mood_entries(
                        self.store.clone(),
                        self.session.clone(),
                        user_id,
                        self.msg_tx.clone(),
                    );
                } else {
                    self.toast("Sign in to track your mood.");
                }
            }
            Screen::Exercises => {
                worker::fetch_exercises(self.store.clone(), self.session.clone(), self.msg_tx.clone());
            }
            Screen::Resources => {
                worker::fetch_crisis_resources(self.store.clone(), self.msg_tx.clone());
            }
            Screen::Therapy => {
                worker::fetch_therapists(self.store.clone(), self.msg_tx.clone());
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();

        // Global bindings first.
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                self.switch_screen(self.screen.next());
                return;
            }
            KeyCode::BackTab => {
                self.switch_screen(self.screen.previous());
                return;
            }
            KeyCode::Esc => {
                self.input.clear();
                self.mood_score = None;
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Chat => self.handle_chat_key(key),
            Screen::Mood => self.handle_mood_key(key),
            Screen::Exercises => self.handle_exercises_key(key),
            Screen::Resources => self.handle_list_key(key),
            Screen::Therapy => self.handle_therapy_key(key),
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_chat(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn submit_chat(&mut self) {
        if self.streaming || self.input.trim().is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.input);
        // Block further sends now; the echo of the user message arrives
        // back as a ConversationEvent.
        self.streaming = true;
        if self.chat_tx.send(text).is_err() {
            self.streaming = false;
            self.toast("Something went wrong. Please try again.");
        }
    }

    fn handle_mood_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c @ '1'..='5') => {
                self.mood_score = Some(c as i32 - '0' as i32);
            }
            KeyCode::Enter => self.submit_mood(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up | KeyCode::Down => self.move_cursor(key.code),
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn submit_mood(&mut self) {
        let Some(user_id) = self.session.user_id() else {
            self.toast("Sign in to track your mood.");
            return;
        };
        let Some(score) = self.mood_score else {
            self.toast("Pick a mood (1-5) first.");
            return;
        };

        let note = std::mem::take(&mut self.input);
        let entry = NewMoodEntry::from_score(&user_id, score, Some(note));
        self.mood_score = None;
        worker::save_mood(
            self.store.clone(),
            self.session.clone(),
            entry,
            self.msg_tx.clone(),
        );
    }

    fn handle_exercises_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_exercise(),
            KeyCode::Up | KeyCode::Down => self.move_cursor(key.code),
            _ => {}
        }
    }

    fn submit_exercise(&mut self) {
        let Some(user_id) = self.session.user_id() else {
            self.toast("Sign in to log exercises.");
            return;
        };
        let Some(exercise) = self.exercises.get(self.selected) else {
            return;
        };

        let row = NewExerciseSession::completed(&user_id, exercise);
        worker::log_exercise(
            self.store.clone(),
            self.session.clone(),
            row,
            exercise.title.clone(),
            self.msg_tx.clone(),
        );
    }

    fn handle_therapy_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if self.therapists.get(self.selected).is_some() {
                    self.toast("Booking is not available yet.");
                }
            }
            KeyCode::Up | KeyCode::Down => self.move_cursor(key.code),
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Up | KeyCode::Down) {
            self.move_cursor(key.code);
        }
    }

    fn move_cursor(&mut self, code: KeyCode) {
        let len = self.current_list_len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        match code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = (self.selected + 1).min(len - 1),
            _ => {}
        }
    }

    pub fn handle_message(&mut self, message: AppMessage) {
        self.mark_dirty();
        match message {
            AppMessage::Conversation(event) => self.apply_conversation_event(event),
            AppMessage::TurnFinished => {
                self.streaming = false;
            }
            AppMessage::TurnFailed { message, retryable } => {
                self.streaming = false;
                // A dangling empty assistant message is possible after a
                // transport drop; drop it from the render copy.
                if let Some(last) = self.chat_log.last() {
                    if last.role == MessageRole::Assistant && last.content.is_empty() {
                        self.chat_log.pop();
                    }
                }
                let text = if retryable {
                    format!("{} (press Enter to retry)", message)
                } else {
                    message
                };
                self.toast(text);
            }
            AppMessage::MoodEntriesLoaded(rows) => {
                self.mood_entries = rows;
                self.selected = self.selected.min(self.mood_entries.len().saturating_sub(1));
            }
            AppMessage::MoodSaved => {
                self.toast("Mood logged.");
                if let Some(user_id) = self.session.user_id() {
                    worker::fetch_mood_entries(
                        self.store.clone(),
                        self.session.clone(),
                        user_id,
                        self.msg_tx.clone(),
                    );
                }
            }
            AppMessage::ExercisesLoaded(rows) => {
                self.exercises = rows;
                self.selected = self.selected.min(self.exercises.len().saturating_sub(1));
            }
            AppMessage::ExerciseLogged { title } => {
                self.toast(format!("Logged: {}", title));
            }
            AppMessage::CrisisResourcesLoaded(rows) => {
                self.crisis_resources = rows;
                self.selected = self
                    .selected
                    .min(self.crisis_resources.len().saturating_sub(1));
            }
            AppMessage::TherapistsLoaded(rows) => {
                self.therapists = rows;
                self.selected = self.selected.min(self.therapists.len().saturating_sub(1));
            }
            AppMessage::StoreFailed(message) => {
                self.toast(message);
            }
        }
    }

    fn apply_conversation_event(&mut self, event: ConversationEvent) {
        match event {
            ConversationEvent::MessageAppended(message) => {
                self.chat_log.push(message);
            }
            ConversationEvent::AssistantTurnStarted => {
                self.chat_log.push(ChatMessage::assistant_placeholder());
            }
            ConversationEvent::FragmentAppended(fragment) => {
                if let Some(last) = self.chat_log.last_mut() {
                    last.content.push_str(&fragment);
                }
            }
        }
    }
}
