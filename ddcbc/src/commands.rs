use crate::CLAP_STYLING;
use clap::{arg, command};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("ddcbc")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("ddcbc")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("serve")
                .about("Run the DDCBC relay server")
                .arg(
                    arg!(-p --"port" <PORT>)
                        .required(false)
                        .help("Port to listen on (default: $PORT, then 3000)")
                        .value_parser(clap::value_parser!(u16)),
                )
                .arg(
                    arg!(--"upstream" <URL>)
                        .required(false)
                        .help("Upstream origin to relay")
                        .value_parser(clap::value_parser!(Url))
                        .default_value("https://www.cbc.ca"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Upstream fetch timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("8"),
                )
                .arg(
                    arg!(--"missing-ua-bot")
                        .required(false)
                        .help(
                            "Serve the embed page to requests without a User-Agent header \
                        (default: redirect them like browsers)",
                        )
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
