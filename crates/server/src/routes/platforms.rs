use axum::Json;

use common::types::Envelope;
use models::platform::{PlatformInfo, CATALOG};

/// Static catalog of platforms the dashboard knows how to link.
#[utoipa::path(get, path = "/api/platforms", tag = "platforms", responses((status = 200, description = "Supported platforms")))]
pub async fn list() -> Json<Envelope<Vec<PlatformInfo>>> {
    Json(Envelope::ok(CATALOG.clone()))
}
