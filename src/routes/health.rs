/// Root liveness probe
///
/// Used for manual health checking only; not part of the functional
/// contract.
pub async fn handler() -> &'static str {
    "Hello World!"
}
