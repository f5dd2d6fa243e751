mod config;

use std::io::Read;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info, instrument};
use webdav_property::{DAV_NAMESPACE_URI, DavPropertyNameSet, PropContainer, XML_PROP};
use webdav_xml::parser::{Node, matches};

use config::{Args, init_logging};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let body = read_body(&args)?;
    let document = webdav_xml::parser::parse(&body).context("request body is not valid XML")?;
    let prop = find_prop(document.root_element())
        .context("no DAV:prop element in the request body")?;

    let set = DavPropertyNameSet::from_prop_element(prop)?;
    info!(size = set.len(), "collected property names");

    if args.list {
        let mut names: Vec<String> = set.iter().map(ToString::to_string).collect();
        names.sort();
        for name in names {
            println!("{name}");
        }
    } else {
        println!("{}", set.to_xml_string(&args.write_options())?);
    }

    Ok(())
}

#[instrument(skip_all)]
fn read_body(args: &Args) -> anyhow::Result<String> {
    match &args.input {
        Some(path) => {
            debug!(path = %path.display(), "reading body from file");
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            debug!("reading body from stdin");
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("failed to read stdin")?;
            Ok(body)
        }
    }
}

/// The first `DAV:prop` element in document order, the root included.
fn find_prop<'a, 'input>(root: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    root.descendants()
        .find(|node| matches(*node, XML_PROP, DAV_NAMESPACE_URI))
}
