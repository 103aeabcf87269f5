//! Application state.

use std::sync::Arc;

use florakg_core::QaService;
use tera::Tera;

/// Page template, embedded at compile time.
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub qa: Arc<QaService>,
    pub templates: Arc<Tera>,
}

impl AppState {
    pub fn new(qa: Arc<QaService>) -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template("index.html", INDEX_TEMPLATE)?;
        Ok(Self {
            qa,
            templates: Arc::new(tera),
        })
    }
}
