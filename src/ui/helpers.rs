//! Background fetch tasks.
//!
//! Each `load_*` function takes a request descriptor issued by `App`, aborts
//! the previous task of the same kind and spawns the fetch. Results come back
//! on the event channel tagged with the request's generation.

use crate::app::{
    App, AppEvent, ArticleRequest, DetailRequest, TASK_ARTICLES, TASK_CATEGORIES, TASK_DETAIL,
};
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Wraps a future to catch panics and convert them to errors.
///
/// A panicking fetch would otherwise vanish inside the runtime and leave the
/// UI waiting forever. With this wrapper the panic message comes back as
/// `Err(String)` and is reported as `AppEvent::TaskPanicked`.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

/// Spawn `fetch`, forward its event, and report a panic as `TaskPanicked`.
fn spawn_guarded<F>(task: &'static str, tx: mpsc::Sender<AppEvent>, fetch: F) -> JoinHandle<()>
where
    F: Future<Output = AppEvent> + Send + 'static,
{
    tokio::spawn(async move {
        let event = match catch_task_panic(fetch).await {
            Ok(event) => event,
            Err(panic_msg) => {
                tracing::error!(task, error = %panic_msg, "Background task panicked");
                AppEvent::TaskPanicked {
                    task,
                    error: panic_msg,
                }
            }
        };

        if let Err(e) = tx.send(event).await {
            tracing::warn!(task, error = %e, "Channel send failed (receiver dropped)");
        }
    })
}

/// Start a category fetch. Used for bootstrap and for manual reloads.
pub fn load_categories(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    if let Some(handle) = app.category_handle.take() {
        handle.abort();
        tracing::debug!("Aborted previous category load");
    }

    let request = app.request_categories();
    let client = app.client.clone();
    let generation = request.generation;

    app.category_handle = Some(spawn_guarded(
        TASK_CATEGORIES,
        event_tx.clone(),
        async move {
            let result = client.fetch_categories().await;
            AppEvent::CategoriesLoaded { generation, result }
        },
    ));
}

/// Start an article-list fetch for `request`, if there is one.
pub(super) fn load_articles(
    app: &mut App,
    request: Option<ArticleRequest>,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    let Some(ArticleRequest {
        category_id,
        generation,
    }) = request
    else {
        return;
    };

    if let Some(handle) = app.article_handle.take() {
        handle.abort();
        tracing::debug!("Aborted previous article load");
    }

    let client = app.client.clone();
    app.article_handle = Some(spawn_guarded(TASK_ARTICLES, event_tx.clone(), async move {
        let result = client.fetch_articles(&category_id).await;
        AppEvent::ArticlesLoaded {
            category_id,
            generation,
            result,
        }
    }));
}

/// Start a detail fetch for `request`, if there is one.
pub(super) fn load_detail(
    app: &mut App,
    request: Option<DetailRequest>,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    let Some(DetailRequest {
        article_id,
        generation,
    }) = request
    else {
        return;
    };

    if let Some(handle) = app.detail_handle.take() {
        handle.abort();
    }

    let client = app.client.clone();
    app.detail_handle = Some(spawn_guarded(TASK_DETAIL, event_tx.clone(), async move {
        let result = client.fetch_article_detail(&article_id).await;
        AppEvent::DetailLoaded {
            article_id,
            generation,
            result,
        }
    }));
}
