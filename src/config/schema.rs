use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "store": {
                "type": "object",
                "properties": {
                    "path": { "type": "string" }
                }
            },
            "queue": {
                "type": "object",
                "properties": {
                    "visibility_timeout_secs": { "type": "integer", "minimum": 0 },
                    "poll_interval_secs": { "type": "integer", "minimum": 1 },
                    "batch_size": { "type": "integer", "minimum": 1 }
                }
            },
            "engine": {
                "type": "object",
                "properties": {
                    "provider": { "type": "string", "enum": ["anthropic", "local", "offline"] },
                    "model": { "type": "string" },
                    "api_key": { "type": "string" },
                    "base_url": { "type": "string" }
                }
            },
            "inspector": {
                "type": "object",
                "properties": {
                    "mode": { "type": "string", "enum": ["http", "fixture"] },
                    "base_url": { "type": "string" },
                    "fixture_path": { "type": "string" }
                }
            },
            "review": {
                "type": "object",
                "properties": {
                    "default_region": { "type": "string" }
                }
            }
        }
    })
});
