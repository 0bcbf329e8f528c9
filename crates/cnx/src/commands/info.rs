//! `cnx info` command implementation.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use cnx_cnxml::{Actor, Module};
use cnx_config::Config;
use serde::Serialize;

use super::load_module;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the info command.
#[derive(Args)]
pub(crate) struct InfoArgs {
    /// CNXML file to inspect.
    file: PathBuf,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Path to configuration file (default: auto-discover cnx.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Module summary printed by `cnx info`.
#[derive(Debug, Serialize)]
struct ModuleInfo<'a> {
    id: &'a str,
    title: Option<String>,
    #[serde(rename = "abstract")]
    summary: Option<&'a str>,
    authors: &'a [Actor],
}

impl<'a> ModuleInfo<'a> {
    /// Metadata title wins over the document title.
    fn of(module: &'a Module) -> Self {
        let metadata = module.metadata();
        Self {
            id: module.id(),
            title: metadata
                .and_then(|m| m.title.clone())
                .or_else(|| module.title()),
            summary: metadata.and_then(|m| m.summary.as_deref()),
            authors: metadata
                .map(|m| m.authors.as_slice())
                .unwrap_or_default(),
        }
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Module: {}", self.id)];
        if let Some(title) = &self.title {
            lines.push(format!("Title: {title}"));
        }
        if let Some(summary) = self.summary {
            lines.push(format!("Abstract: {}", summary.trim()));
        }
        if !self.authors.is_empty() {
            let names: Vec<&str> = self
                .authors
                .iter()
                .map(|actor| actor.full_name().unwrap_or("(unnamed)"))
                .collect();
            lines.push(format!("Authors: {}", names.join(", ")));
        }
        lines
    }
}

impl InfoArgs {
    /// Execute the info command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or parsing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let module = load_module(&self.file, None, &config.render.cnxml_namespace)?;

        if module.metadata().is_none() {
            output.warning("No metadata block found");
        }

        let info = ModuleInfo::of(&module);
        let text = if self.json {
            serde_json::to_string_pretty(&info)?
        } else {
            info.lines().join("\n")
        };

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{text}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use cnx_cnxml::{CNXML_NAMESPACE, CnxmlParser};

    const WITH_METADATA: &str = r#"<document xmlns="http://cnx.rice.edu/cnxml" xmlns:md="http://cnx.rice.edu/mdml">
  <title>Document Title</title>
  <metadata>
    <md:title>Waves and Optics</md:title>
    <md:abstract> Light as a wave. </md:abstract>
    <md:actors>
      <md:person userid="ada"><md:fullname>Ada Lovelace</md:fullname></md:person>
      <md:organization userid="rice"><md:fullname>Rice University</md:fullname></md:organization>
    </md:actors>
    <md:roles><md:role type="author">ada rice</md:role></md:roles>
  </metadata>
  <content/>
</document>"#;

    fn module(xml: &str) -> Module {
        let doc = CnxmlParser::new().parse(xml).unwrap();
        let metadata = cnx_cnxml::Metadata::from_document(&doc, CNXML_NAMESPACE);
        Module::new("m1", doc).with_metadata(metadata)
    }

    #[test]
    fn test_lines_with_metadata() {
        let module = module(WITH_METADATA);
        assert_eq!(
            ModuleInfo::of(&module).lines(),
            vec![
                "Module: m1",
                "Title: Waves and Optics",
                "Abstract: Light as a wave.",
                "Authors: Ada Lovelace, Rice University",
            ]
        );
    }

    #[test]
    fn test_lines_without_metadata_uses_document_title() {
        let module = module(
            r#"<document xmlns="http://cnx.rice.edu/cnxml"><title>Plain</title><content/></document>"#,
        );
        assert_eq!(
            ModuleInfo::of(&module).lines(),
            vec!["Module: m1", "Title: Plain"]
        );
    }

    #[test]
    fn test_json() {
        let module = module(WITH_METADATA);
        let value = serde_json::to_value(ModuleInfo::of(&module)).unwrap();
        assert_eq!(value["id"], "m1");
        assert_eq!(value["title"], "Waves and Optics");
        assert_eq!(value["abstract"], " Light as a wave. ");
        assert_eq!(value["authors"][0]["kind"], "person");
        assert_eq!(value["authors"][0]["full_name"], "Ada Lovelace");
        assert_eq!(value["authors"][1]["kind"], "organization");
    }
}
