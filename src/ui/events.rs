//! Application event handling.
//!
//! Applies background fetch results to `App` and chains follow-up fetches
//! (a category response starts the first category's article load).

use crate::app::{App, AppEvent, TASK_ARTICLES};
use crate::view::ListState;
use tokio::sync::mpsc;

use super::helpers::load_articles;

/// Handle an event from a background task.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent, event_tx: &mpsc::Sender<AppEvent>) {
    match event {
        AppEvent::CategoriesLoaded { generation, result } => {
            app.category_handle = None;
            let request = app.on_categories_loaded(generation, result);
            load_articles(app, request, event_tx);
        }
        AppEvent::ArticlesLoaded {
            category_id,
            generation,
            result,
        } => {
            if app.apply_articles(&category_id, generation, result) {
                app.article_handle = None;
            }
        }
        AppEvent::DetailLoaded {
            article_id,
            generation,
            result,
        } => {
            if app.apply_detail(&article_id, generation, result) {
                app.detail_handle = None;
            }
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error = %error, "Background task panicked");
            // The list would otherwise sit on "Loading..." with nothing in flight.
            if task == TASK_ARTICLES && app.list_state == ListState::Loading {
                app.list_state = ListState::Error;
            }
            app.set_status(format!("Internal error in {} task", task));
        }
    }
}
