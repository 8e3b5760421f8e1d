use std::path::PathBuf;

use anyhow::Context;
use log::{info, LevelFilter};

use name_constraints_encoder::config::{
    config, ARG_DNS_EXCLUDED, ARG_DNS_PERMITTED, ARG_LOGGING, ARG_LOGGING_DEBUG, ARG_LOGGING_ERR,
    ARG_LOGGING_INFO, ARG_LOGGING_TRACE, ARG_LOGGING_WARN, ARG_OUTPUT, ARG_URI_EXCLUDED,
    ARG_URI_PERMITTED,
};
use name_constraints_encoder::constraints::NameConstraintsSet;
use name_constraints_encoder::logging::init_logs;
use name_constraints_encoder::passthrough::EncodedExtension;

fn main() -> anyhow::Result<()> {
    let matches = config();

    if let Some(log_level) = matches.value_of(ARG_LOGGING) {
        let log_level = match log_level {
            ARG_LOGGING_TRACE => LevelFilter::Trace,
            ARG_LOGGING_DEBUG => LevelFilter::Debug,
            ARG_LOGGING_INFO => LevelFilter::Info,
            ARG_LOGGING_WARN => LevelFilter::Warn,
            ARG_LOGGING_ERR => LevelFilter::Error,
            _ => unreachable!("Unexpected log level value"),
        };
        init_logs(log_level);
    }

    let constraints = NameConstraintsSet::build(
        matches.value_of(ARG_DNS_PERMITTED),
        matches.value_of(ARG_DNS_EXCLUDED),
        matches.value_of(ARG_URI_PERMITTED),
        matches.value_of(ARG_URI_EXCLUDED),
    )
    .context("Failed to build the name constraints set")?;

    info!("Permitted subtrees: {:?}", constraints.permitted());
    info!("Excluded subtrees: {:?}", constraints.excluded());

    let extension = EncodedExtension::encode(&constraints)
        .context("Failed to encode the Name Constraints extension")?;

    info!("Successfully encoded Name Constraints extension: {}", extension.value());

    let output_path = matches
        .value_of(ARG_OUTPUT)
        .map(PathBuf::from)
        .context("Output file path is required")?;

    extension
        .write_to_file(&output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!("API passthrough file created: {}", output_path.display());

    Ok(())
}
