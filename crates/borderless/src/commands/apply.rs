use clap::Args;

use borderless_core::config::ConfigPaths;

use super::parse_handle;

/// Arguments for the `apply` subcommand.
#[derive(Args)]
#[cfg_attr(not(windows), allow(dead_code))]
pub struct ApplyArgs {
    /// Window handle (decimal or hex with 0x prefix), see `borderless list`
    #[arg(value_parser = parse_handle)]
    handle: usize,
    /// Fill the rectangle spanning every monitor instead of one
    #[arg(long, conflicts_with = "monitor")]
    span: bool,
    /// Fill this monitor (e.g. DISPLAY2) instead of the window's own
    #[arg(long, value_name = "DEVICE")]
    monitor: Option<String>,
}

/// Applies the window's favorite (or the default rule) once.
///
/// A hidden cursor comes back when this process exits; a hidden
/// taskbar stays hidden until `borderless taskbar show`.
#[cfg(windows)]
pub fn execute(paths: &ConfigPaths, args: &ApplyArgs) {
    use borderless_core::transform::SkipReason;
    use borderless_core::{Engine, FavoriteStore, TransformResult, config};
    use borderless_windows::Win32Desktop;

    super::init_quiet_logging(paths);
    let config = config::load(&paths.config_file());
    let favorites = FavoriteStore::open(paths.favorites_file());
    let mut engine = Engine::new(
        Win32Desktop,
        favorites,
        &config.engine,
        Some(paths.taskbar_journal()),
    );

    let target = if args.span {
        match engine.spanning_frame() {
            Some(frame) => Some(frame),
            None => super::fail("could not read monitor layout"),
        }
    } else if let Some(name) = &args.monitor {
        match engine.monitor_frame(name) {
            Some(frame) => Some(frame),
            None => {
                let known: Vec<String> = engine.monitors().into_iter().map(|m| m.device).collect();
                super::fail(format!(
                    "no monitor named {name:?} (attached: {})",
                    known.join(", ")
                ))
            }
        }
    } else {
        None
    };

    match engine.apply(args.handle, target) {
        Some(TransformResult::Applied { .. }) => println!("Window 0x{:X} is borderless.", args.handle),
        Some(TransformResult::Skipped(SkipReason::NotTargetable)) => {
            println!("Window 0x{:X} is already borderless.", args.handle)
        }
        Some(other) => println!("Window 0x{:X} left unchanged: {other:?}", args.handle),
        None => super::fail(format!("0x{:X} is not a candidate window", args.handle)),
    }
}

#[cfg(not(windows))]
pub fn execute(_paths: &ConfigPaths, _args: &ApplyArgs) {
    super::requires_windows("apply");
}
