use env_logger::{Env, Target};

/// Log to stderr (stdout carries action results). Respects RUST_LOG, defaults to info.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .try_init();
}
