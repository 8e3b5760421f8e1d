use clap::{crate_description, crate_name, crate_version, App, Arg, ArgMatches};

use crate::passthrough::DEFAULT_OUTPUT_FILE;

pub const ARG_DNS_PERMITTED: &str = "DnsPermitted";
pub const ARG_DNS_EXCLUDED: &str = "DnsExcluded";
pub const ARG_URI_PERMITTED: &str = "UriPermitted";
pub const ARG_URI_EXCLUDED: &str = "UriExcluded";
pub const ARG_OUTPUT: &str = "output";

pub const ARG_LOGGING: &str = "logging";
pub const ARG_LOGGING_TRACE: &str = "trace";
pub const ARG_LOGGING_DEBUG: &str = "debug";
pub const ARG_LOGGING_INFO: &str = "info";
pub const ARG_LOGGING_WARN: &str = "warn";
pub const ARG_LOGGING_ERR: &str = "err";

pub fn config() -> ArgMatches<'static> {
    App::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::with_name(ARG_DNS_PERMITTED)
                .short("p")
                .long(ARG_DNS_PERMITTED)
                .value_name("SUBTREES")
                .help("Comma-separated DNS subtrees to permit (e.g. `.dev.example.com,.test.example.com`)")
                .takes_value(true)
                .display_order(0),
        )
        .arg(
            Arg::with_name(ARG_DNS_EXCLUDED)
                .short("e")
                .long(ARG_DNS_EXCLUDED)
                .value_name("SUBTREES")
                .help("Comma-separated DNS subtrees to exclude")
                .takes_value(true)
                .display_order(1),
        )
        .arg(
            Arg::with_name(ARG_URI_PERMITTED)
                .short("u")
                .long(ARG_URI_PERMITTED)
                .value_name("SUBTREES")
                .help("Comma-separated URI subtrees to permit")
                .takes_value(true)
                .display_order(2),
        )
        .arg(
            Arg::with_name(ARG_URI_EXCLUDED)
                .short("v")
                .long(ARG_URI_EXCLUDED)
                .value_name("SUBTREES")
                .help("Comma-separated URI subtrees to exclude")
                .takes_value(true)
                .display_order(3),
        )
        .arg(
            Arg::with_name(ARG_OUTPUT)
                .short("o")
                .long(ARG_OUTPUT)
                .value_name("FILE")
                .help("Path of the API passthrough file to write")
                .takes_value(true)
                .default_value(DEFAULT_OUTPUT_FILE)
                .display_order(4),
        )
        .arg(
            Arg::with_name(ARG_LOGGING)
                .short("l")
                .long(ARG_LOGGING)
                .value_name("LEVEL")
                .help("Turn on logging with the specified level")
                .takes_value(true)
                .possible_values(&[
                    ARG_LOGGING_TRACE,
                    ARG_LOGGING_DEBUG,
                    ARG_LOGGING_INFO,
                    ARG_LOGGING_WARN,
                    ARG_LOGGING_ERR,
                ])
                .display_order(5),
        )
        .set_term_width(190)
        .get_matches()
}
