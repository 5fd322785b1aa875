//! yaml-gen's entry point: an example generator that embeds its template and
//! turns a YAML document into a Go source file.

use std::io::{self, IsTerminal};

use yaml_gen::{
    cli::{get_args, print_help},
    config::Config,
    error::{default_error_handler, Error},
    generator::Generator,
    logger::init_logger,
};

const TEMPLATE: &str = include_str!("../templates/example.go.j2");

const USAGE: &str = "Renders a Go source file from a YAML or JSON document.

Reads --in, or standard input when it is piped, and writes next to the input
(data.yaml becomes data.go) or to standard output. The package name comes from
--package, the sibling .go files, or the input directory name.";

/// Main application entry point.
fn main() {
    let config = Config {
        template: TEMPLATE.to_string(),
        long_about: Some(USAGE.to_string()),
        ..Config::default()
    };
    let args = get_args(&config);
    init_logger(args.verbose);

    let flags = args.into_flags(&config);
    let stdin = io::stdin();
    let stdin_is_terminal = stdin.is_terminal();

    let generator = Generator::new(&config);
    match generator.generate(&flags, stdin.lock(), stdin_is_terminal, io::stdout().lock()) {
        Ok(target) => log::debug!("Generated {:?}", target),
        Err(Error::MissingInput) => {
            print_help(&config, io::stdout().lock());
            std::process::exit(1);
        }
        Err(err) => default_error_handler(err),
    }
}
