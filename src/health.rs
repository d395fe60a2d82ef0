//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? |
//! | **Readiness** | `/readyz` | Can it serve news right now? |

use std::sync::Arc;

use tracing::warn;

use crate::app::AppState;
use crate::{Request, Response, Status};

/// Always `200 OK` with body `"ok"`. If the process can answer HTTP at all,
/// it is alive, so this handler has no dependencies.
pub async fn liveness<S>(_req: Request, _state: S) -> Response {
    Response::text("ok")
}

/// `200 OK` with body `"ready"` once the news store answers a listing,
/// otherwise `503 Service Unavailable`.
pub async fn readiness(_req: Request, state: Arc<AppState>) -> Response {
    match state.news.list_all().await {
        Ok(_) => Response::text("ready"),
        Err(e) => {
            warn!("readiness check failed: {e}");
            Response::builder()
                .status(Status::ServiceUnavailable)
                .text("not ready")
        }
    }
}
