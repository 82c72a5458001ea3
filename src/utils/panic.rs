use std::panic::{self, PanicHookInfo};
use std::process;

use color_eyre::config::{HookBuilder, PanicHook};
use color_eyre::eyre::Result;

use crate::infrastructure::tui::real::restore_terminal;

/// Install color-eyre hooks and a panic hook that hands the terminal back
/// before anything is printed.
pub fn initialize_panic_handler() -> Result<()> {
    let (panic_hook, eyre_hook) = HookBuilder::default()
        .panic_section(format!(
            "This is a bug in {}. Consider reporting it at {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_REPOSITORY")
        ))
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;

    panic::set_hook(Box::new(move |info| {
        if let Err(r) = restore_terminal() {
            tracing::error!("Unable to restore terminal: {r:?}");
        }
        report(&panic_hook, info);
        process::exit(libc::EXIT_FAILURE);
    }));
    Ok(())
}

fn report(panic_hook: &PanicHook, info: &PanicHookInfo<'_>) {
    let plain = strip_ansi_escapes::strip_str(panic_hook.panic_report(info).to_string());
    log::error!("panic: {plain}");

    #[cfg(not(debug_assertions))]
    {
        let meta = human_panic::Metadata::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
            .authors(env!("CARGO_PKG_AUTHORS").replace(':', ", "))
            .homepage(env!("CARGO_PKG_HOMEPAGE"));
        let dump = human_panic::handle_dump(&meta, info);
        if human_panic::print_msg(dump, &meta).is_err() {
            eprintln!("{}", panic_hook.panic_report(info));
        }
    }

    // full backtrace while developing
    #[cfg(debug_assertions)]
    {
        better_panic::Settings::auto()
            .most_recent_first(false)
            .lineno_suffix(true)
            .verbosity(better_panic::Verbosity::Full)
            .create_panic_handler()(info);
    }
}
