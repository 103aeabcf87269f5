//! Server-rendered question page.

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Html,
};
use chrono::Datelike;
use florakg_core::StoreBackend;
use serde::Deserialize;
use tera::Context;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub question: String,
}

/// GET / - Serve the question page.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, (StatusCode, String)> {
    render(&state, None, None).await
}

/// POST /ask - Answer a question from the form and re-render the page.
pub async fn ask(
    State(state): State<AppState>,
    Form(form): Form<AskForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    let answer = state.qa.answer(&form.question).await;
    render(&state, Some(form.question.trim()), Some(answer)).await
}

async fn render(
    state: &AppState,
    question: Option<&str>,
    answer: Option<String>,
) -> Result<Html<String>, (StatusCode, String)> {
    let names = state.qa.list_entities();
    let day = chrono::Local::now().ordinal();
    let featured = match state.qa.featured(day) {
        Some(name) => state.qa.get_entity_detail(name).await.ok(),
        None => None,
    };

    let mut ctx = Context::new();
    ctx.insert("plants", names);
    ctx.insert("plant_count", &names.len());
    ctx.insert("featured", &featured);
    ctx.insert("question", &question.unwrap_or(""));
    ctx.insert("answer", &answer);
    ctx.insert("offline", &(state.qa.backend() == StoreBackend::Fixture));

    state
        .templates
        .render("index.html", &ctx)
        .map(Html)
        .map_err(|e| {
            tracing::error!(error = ?e, "Failed to render page");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page".to_string())
        })
}
