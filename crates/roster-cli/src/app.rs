//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
  client::ApiClient,
  form::{self, Form},
  home::Home,
};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Overview of all students, courses and subjects.
  Home,
  CreateCourse,
  CreateStudent,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// Lists shown on the Home screen.
  pub home: Home,

  /// The open form on the Create screens.
  pub form: Option<Form>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      screen:     Screen::Home,
      home:       Home::default(),
      form:       None,
      status_msg: String::new(),
      client:     Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Refetch the Home lists.
  pub async fn load_home(&mut self) {
    self.status_msg = "Loading…".into();
    self.home = Home::load(&self.client).await;
    self.status_msg = String::new();
  }

  async fn open_course_form(&mut self) {
    let defaults = match self.client.list_default_subjects().await {
      Ok(subjects) => subjects,
      Err(e) => {
        tracing::warn!(error = %e, "loading default subjects failed");
        self.status_msg = "Failed to fetch default subjects".into();
        Vec::new()
      }
    };
    self.form = Some(form::course_form(&defaults));
    self.screen = Screen::CreateCourse;
  }

  async fn open_student_form(&mut self) {
    let courses = match self.client.list_courses().await {
      Ok(courses) => courses,
      Err(e) => {
        tracing::warn!(error = %e, "loading courses failed");
        self.status_msg = "Failed to fetch courses".into();
        Vec::new()
      }
    };
    self.form = Some(form::student_form(&courses));
    self.screen = Screen::CreateStudent;
  }

  fn close_form(&mut self) {
    self.form = None;
    self.screen = Screen::Home;
    self.status_msg = String::new();
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    match self.screen {
      Screen::Home => Ok(self.handle_home_key(key).await),
      Screen::CreateCourse | Screen::CreateStudent => {
        self.handle_form_key(key).await;
        Ok(true)
      }
    }
  }

  async fn handle_home_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Char('r') => self.load_home().await,
      KeyCode::Char('c') => self.open_course_form().await,
      KeyCode::Char('s') => self.open_student_form().await,
      _ => {}
    }
    true
  }

  async fn handle_form_key(&mut self, key: KeyEvent) {
    let Some(form) = self.form.as_mut() else {
      self.screen = Screen::Home;
      return;
    };

    match key.code {
      KeyCode::Esc => self.close_form(),
      KeyCode::Enter => self.submit().await,
      KeyCode::Tab | KeyCode::Down => form.focus_next(),
      KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
      KeyCode::Left => form.cycle(-1),
      KeyCode::Right => form.cycle(1),
      KeyCode::Backspace => form.backspace(),
      KeyCode::Char(c) => form.insert(c),
      _ => {}
    }
  }

  /// Validate the open form and send it. On success, return to a freshly
  /// loaded Home; otherwise leave the error on the form.
  async fn submit(&mut self) {
    let Some(form) = self.form.as_ref() else { return };

    let result = match self.screen {
      Screen::CreateCourse => match form::course_request(form) {
        Ok(req) => self
          .client
          .create_course(&req)
          .await
          .map(|c| format!("Created course {}", c.course.code)),
        Err(msg) => Err(anyhow::anyhow!(msg)),
      },
      Screen::CreateStudent => match form::student_request(form) {
        Ok(req) => self
          .client
          .create_student(&req)
          .await
          .map(|s| format!("Created student {}", s.student.email)),
        Err(msg) => Err(anyhow::anyhow!(msg)),
      },
      Screen::Home => return,
    };

    match result {
      Ok(done) => {
        self.close_form();
        self.load_home().await;
        self.status_msg = done;
      }
      Err(e) => {
        if let Some(form) = self.form.as_mut() {
          form.error = Some(describe(&e));
        }
      }
    }
  }
}

/// An error with its whole cause chain, so a transport failure reads
/// `POST /students failed: <cause>` rather than just the outer context.
fn describe(err: &anyhow::Error) -> String { format!("{err:#}") }
