//! Quiz view: one page that renders whatever phase the viewer's machine is in.

use askama::Template;
use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::{QuizError, QuizRequest};
use crate::logging::LogOnError;
use crate::quiz::{Phase, QuizMachine, Summary};
use crate::state::AppState;
use crate::viewer::Viewer;

/// One answer button.
pub struct OptionView {
  /// A, B, C...
  pub letter: char,
  pub value: String,
}

pub struct QuestionView {
  pub text: String,
  pub options: Vec<OptionView>,
}

#[derive(Template)]
#[template(path = "quiz.html")]
pub struct QuizTemplate {
  pub phase: &'static str,
  /// Base URL of this quiz page; forms post below it
  pub quiz_url: String,
  pub error_message: Option<String>,
  pub question: Option<QuestionView>,
  /// 1-based number of the question on screen
  pub position: usize,
  pub total: usize,
  pub summary: Option<Summary>,
}

impl QuizTemplate {
  fn empty(phase: Phase, quiz_url: String) -> Self {
    Self {
      phase: phase.as_str(),
      quiz_url,
      error_message: None,
      question: None,
      position: 0,
      total: 0,
      summary: None,
    }
  }

  fn error(err: &QuizError, quiz_url: String) -> Self {
    Self {
      error_message: Some(err.user_message()),
      ..Self::empty(Phase::Error, quiz_url)
    }
  }

  /// Snapshot the machine for rendering.
  ///
  /// A machine holding some other request (another tab moved on) renders as
  /// loading; the refresh mounts this page's request again.
  fn from_machine(machine: &QuizMachine, request: &QuizRequest, quiz_url: String) -> Self {
    if machine.request() != Some(request) {
      return Self::empty(Phase::Loading, quiz_url);
    }

    let phase = machine.phase();
    let mut template = Self::empty(phase, quiz_url);

    if let Some(err) = machine.error() {
      template.error_message = Some(err.user_message());
    }

    if let Some(session) = machine.session() {
      template.total = session.total();
      template.position = (session.current_index() + 1).min(session.total());
      template.question = session.current_question().map(|q| QuestionView {
        text: q.text().to_string(),
        options: q
          .options()
          .iter()
          .zip('A'..='Z')
          .map(|(value, letter)| OptionView {
            letter,
            value: value.clone(),
          })
          .collect(),
      });
      template.summary = machine.summary();
    }

    template
  }
}

/// Page URL for a quiz, with path segments percent-encoded
fn quiz_url(class_id: &str, topic_id: &str) -> String {
  format!(
    "/quiz/{}/{}",
    urlencoding::encode(class_id),
    urlencoding::encode(topic_id)
  )
}

/// GET /quiz/{class_id}/{topic_id}
///
/// Mounting a different topic discards the viewer's previous session. The
/// fetch runs without holding the session lock; its result is applied only
/// if no newer load started meanwhile.
pub async fn quiz_page(
  State(state): State<AppState>,
  viewer: Viewer,
  Path((class_id, topic_id)): Path<(String, String)>,
) -> Response {
  let url = quiz_url(&class_id, &topic_id);

  let request = match QuizRequest::parse(&class_id, &topic_id) {
    Ok(request) => request,
    Err(err) => {
      tracing::debug!("Rejected quiz route {}: {}", url, err);
      let template = QuizTemplate::error(&err, url);
      return (viewer.into_jar(), Html(template.render().unwrap_or_default())).into_response();
    }
  };

  let ticket = state
    .sessions
    .with_machine(&viewer.id, |machine| machine.mount(request.clone()));

  // Spawned so a dropped connection cannot strand the machine in Loading.
  if let Some(ticket) = ticket {
    let gateway = state.gateway.clone();
    let sessions = Arc::clone(&state.sessions);
    let viewer_id = viewer.id.clone();
    let load = tokio::spawn(async move {
      let result = gateway.fetch_quiz_set(ticket.request()).await;
      sessions.with_machine(&viewer_id, |machine| machine.complete_load(ticket, result));
    });
    load.await.log_warn("Quiz load task failed");
  }

  let template = state
    .sessions
    .with_machine(&viewer.id, |machine| QuizTemplate::from_machine(machine, &request, url));

  (viewer.into_jar(), Html(template.render().unwrap_or_default())).into_response()
}

/// Form data for answering the current question.
#[derive(Deserialize)]
pub struct AnswerForm {
  pub option: String,
}

/// Run `f` on the viewer's machine only if it holds the quiz named in the route.
fn with_matching_machine(
  state: &AppState,
  viewer: &Viewer,
  class_id: &str,
  topic_id: &str,
  f: impl FnOnce(&mut QuizMachine),
) {
  let Ok(request) = QuizRequest::parse(class_id, topic_id) else {
    return;
  };

  state.sessions.with_machine(&viewer.id, |machine| {
    if machine.request() == Some(&request) {
      f(machine);
    } else {
      tracing::warn!(
        "Ignoring action for {}/{}: viewer holds a different quiz",
        class_id,
        topic_id
      );
    }
  });
}

/// POST /quiz/{class_id}/{topic_id}/answer
pub async fn submit_answer(
  State(state): State<AppState>,
  viewer: Viewer,
  Path((class_id, topic_id)): Path<(String, String)>,
  Form(form): Form<AnswerForm>,
) -> Response {
  with_matching_machine(&state, &viewer, &class_id, &topic_id, |machine| {
    if let Ok(outcome) = machine.submit_answer(&form.option) {
      tracing::debug!(
        "Answer for {}/{}: correct={} completed={}",
        class_id,
        topic_id,
        outcome.correct,
        outcome.completed
      );
    }
  });

  let url = quiz_url(&class_id, &topic_id);
  (viewer.into_jar(), Redirect::to(&url)).into_response()
}

/// POST /quiz/{class_id}/{topic_id}/restart
///
/// Only a completed quiz restarts; mid-quiz posts keep the current progress.
pub async fn restart_quiz(
  State(state): State<AppState>,
  viewer: Viewer,
  Path((class_id, topic_id)): Path<(String, String)>,
) -> Response {
  with_matching_machine(&state, &viewer, &class_id, &topic_id, |machine| {
    if let Err(e) = machine.restart() {
      tracing::debug!("Restart for {}/{} not applied: {}", class_id, topic_id, e);
    }
  });

  let url = quiz_url(&class_id, &topic_id);
  (viewer.into_jar(), Redirect::to(&url)).into_response()
}
