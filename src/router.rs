use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::db::repository::DartsRepository;
use crate::handlers::darts::{
    create_darts, delete_darts, get_darts, list_darts, patch_darts, replace_darts,
};

#[derive(Clone)]
pub struct DartsState<R> {
    pub repo: R,
}

impl<R: DartsRepository> DartsState<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }
}

/// Darts routes mounted under `api_prefix` (e.g. `/api/v1`); an empty
/// prefix or `/` mounts them at the root.
pub fn darts_router<R: DartsRepository>(state: DartsState<R>, api_prefix: &str) -> Router {
    let darts = Router::new()
        .route("/darts", get(list_darts::<R>).post(create_darts::<R>))
        .route(
            "/darts/{id}",
            get(get_darts::<R>)
                .put(replace_darts::<R>)
                .patch(patch_darts::<R>)
                .delete(delete_darts::<R>),
        );

    let prefix = api_prefix.trim_matches('/');
    let app = if prefix.is_empty() {
        darts
    } else {
        Router::new().nest(&format!("/{prefix}"), darts)
    };

    app.layer(TraceLayer::new_for_http()).with_state(state)
}
