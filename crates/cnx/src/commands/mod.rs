//! CLI command implementations.

pub(crate) mod info;
pub(crate) mod render;

pub(crate) use info::InfoArgs;
pub(crate) use render::RenderArgs;

use std::path::Path;

use cnx_cnxml::{CnxmlParser, Metadata, Module};

use crate::error::CliError;

/// Read and parse a CNXML file into a module with its metadata.
///
/// The module id defaults to the file stem.
pub(crate) fn load_module(
    path: &Path,
    module_id: Option<&str>,
    cnxml_namespace: &str,
) -> Result<Module, CliError> {
    let id = match module_id {
        Some(id) => id.to_owned(),
        None => path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_owned)
            .ok_or_else(|| {
                CliError::Validation(format!(
                    "Cannot derive a module id from {}, pass --module-id",
                    path.display()
                ))
            })?,
    };
    if id.is_empty() {
        return Err(CliError::Validation("Module id cannot be empty".to_owned()));
    }

    let xml = std::fs::read_to_string(path)?;
    let document = CnxmlParser::new().parse(&xml)?;
    let metadata = Metadata::from_document(&document, cnxml_namespace);

    Ok(Module::new(id, document)
        .with_cnxml_namespace(cnxml_namespace)
        .with_metadata(metadata))
}
