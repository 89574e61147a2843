//! Service info handler

use axum::Json;
use phishguard_core::constants::APP_NAME;
use serde_json::{json, Value};

pub async fn info() -> Json<Value> {
    Json(json!({
        "message": format!("{} API is running!", APP_NAME),
        "endpoints": {
            "GET /health": "Check server status",
            "GET /test": "Test endpoint",
            "POST /predict": "Predict URL risk (send JSON with 'url' field)"
        }
    }))
}
