/// Liveness probe; the process answering is the whole check
pub async fn health_handler() -> &'static str {
    "ok"
}
