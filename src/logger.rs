/// Initializes `env_logger` on stderr. `verbose` shows the pipeline's debug
/// messages; otherwise only warnings and errors are printed.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .format_timestamp(None)
        .init();
}
