//! Debug logging for operation parsing, validation and execution.
//!
//! Enabled with `SEQGEN_OPERATION_DEBUG` in debug builds; compiled out of
//! release builds.

#[cfg(debug_assertions)]
fn operation_debug_enabled() -> bool {
    use std::sync::OnceLock;
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| std::env::var("SEQGEN_OPERATION_DEBUG").is_ok())
}

/// Emit one debug line to stderr without relying on `eprintln!`.
#[cfg(debug_assertions)]
pub(crate) fn operation_debug_log(args: std::fmt::Arguments<'_>) {
    if operation_debug_enabled() {
        use std::io::Write;
        let _ = writeln!(std::io::stderr(), "[seqgen] {args}");
    }
}

#[cfg(not(debug_assertions))]
#[inline(always)]
pub(crate) fn operation_debug_log(_args: std::fmt::Arguments<'_>) {}
