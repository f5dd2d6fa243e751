use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use webdav_property::{XmlWriteOptions, is_valid_prefix};

/// Prints the property names requested by a PROPFIND body
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// XML body to read, standard input when omitted
    pub input: Option<PathBuf>,

    /// Prefix bound to the DAV: namespace in the output
    #[arg(long, default_value = "D", value_parser = parse_prefix)]
    pub dav_prefix: String,

    /// Omit the XML declaration from the output
    #[arg(long)]
    pub no_declaration: bool,

    /// List the names in Clark notation instead of writing XML
    #[arg(short, long)]
    pub list: bool,

    /// Verbose logging (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_prefix(value: &str) -> Result<String, String> {
    if is_valid_prefix(value) {
        Ok(value.to_string())
    } else {
        Err(format!("'{value}' is not a valid XML namespace prefix"))
    }
}

impl Args {
    pub fn write_options(&self) -> XmlWriteOptions {
        XmlWriteOptions::builder()
            .include_declaration(!self.no_declaration)
            .dav_prefix(self.dav_prefix.as_str())
            .build()
    }
}

/// Logs go to stderr so stdout only carries the result.
pub fn init_logging(verbose_level: u8) {
    let log_level = match verbose_level {
        0 => "webdav_props=warn,webdav_property=warn,webdav_xml=warn",
        1 => "webdav_props=debug,webdav_property=debug,webdav_xml=info",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dav_prefix_is_validated() {
        let args = Args::try_parse_from(["webdav-props", "--dav-prefix", "dav"]).unwrap();
        assert_eq!(args.write_options().dav_prefix, "dav");

        assert!(Args::try_parse_from(["webdav-props", "--dav-prefix", ""]).is_err());
        assert!(Args::try_parse_from(["webdav-props", "--dav-prefix", "a:b"]).is_err());
    }
}
