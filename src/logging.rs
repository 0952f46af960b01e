use tracing::{Level, debug};

/// Installs a global `fmt` subscriber. Unknown levels fall back to `info`.
/// If a global subscriber is already installed it is kept and the attempt is
/// logged through it.
pub fn init_tracing(level: &str) {
    let level = level.parse::<Level>().unwrap_or(Level::INFO);
    if let Err(err) = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
    {
        debug!(%err, "tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_keeps_the_first_subscriber() {
        init_tracing("debug");
        init_tracing("not-a-level");
        assert!(tracing::dispatcher::has_been_set());
    }
}
