//! Browser client for the catalog: a tera-rendered index page plus the
//! static stylesheet and script it references.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Html, routing::get, Router};
use tera::{Context, Tera};
use tower_http::services::ServeDir;
use tracing::warn;

#[derive(Clone)]
pub struct SiteState {
    templates: Arc<Tera>,
}

/// Initialize the tera template engine with the site templates.
fn init_templates() -> Arc<Tera> {
    let mut tera = match Tera::new("templates/site/**/*") {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "Failed to load site templates from filesystem, using empty Tera instance");
            Tera::default()
        }
    };

    // Built-in fallback template in case filesystem templates are not available
    tera.add_raw_template("index.html", include_str!("../../../templates/site/index.html")).ok();

    Arc::new(tera)
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index_page))
        .nest_service("/static", ServeDir::new("public"))
        .with_state(SiteState { templates: init_templates() })
}

/// Render the catalog browser page.
async fn index_page(
    State(state): State<SiteState>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let mut context = Context::new();
    context.insert("branding", &serde_json::json!({ "company_name": "Shopfront" }));
    context.insert("api_base", "/api/v1");

    let html = state.templates.render("index.html", &context).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("<h1>Template Error</h1><pre>{:?}</pre>", e)),
        )
    })?;

    Ok(Html(html))
}
