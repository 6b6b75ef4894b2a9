//! CLI command implementations

pub mod build;
pub mod build_all;
pub mod inspect;

use log::LevelFilter;

/// Install the `env_logger` backend for the `log` facade.
///
/// `verbose` counts `-v` flags; `RUST_LOG` takes precedence when set.
pub fn init_logging(verbose: u8) {
    let _ = env_logger::Builder::new()
        .filter_level(level_for(verbose))
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(1), LevelFilter::Info);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(9), LevelFilter::Trace);
    }
}
