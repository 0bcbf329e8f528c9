//! `cnx render` command implementation.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use cnx_cnxml::{
    LinkResolver, LinkTemplates, ProcessorChain, Renderer, Resources, TemplateResolver,
};
use cnx_config::{CliSettings, Config, LinksConfig};

use super::load_module;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// CNXML file to render.
    file: PathBuf,

    /// Module id used for link resolution (default: file stem).
    #[arg(short, long)]
    module_id: Option<String>,

    /// Directory whose files are the module's resources (overrides config).
    #[arg(short, long)]
    resources: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover cnx.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prefix for generated link URLs (overrides config).
    #[arg(long, env = "CNX_BASE_URL")]
    base_url: Option<String>,

    /// Comma-separated processors to run, in order (overrides config).
    #[arg(long, value_delimiter = ',')]
    processors: Option<Vec<String>>,

    /// Enable verbose output (timing logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, parsing, link resolution or writing
    /// the output fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            processors: self.processors,
            resources_dir: self.resources,
            base_url: self.base_url,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let resources = match &config.resources_resolved.dir {
            Some(dir) => Resources::from_dir(dir)?,
            None => Resources::new(),
        };
        let module = load_module(
            &self.file,
            self.module_id.as_deref(),
            &config.render.cnxml_namespace,
        )?
        .with_resources(resources);

        tracing::info!(
            module = module.id(),
            resources = module.resources().len(),
            processors = ?config.render.processors,
            "Rendering module"
        );

        let resolver: Arc<dyn LinkResolver> = Arc::new(TemplateResolver::new(
            link_templates(&config.links),
            module.id(),
            module.resources().clone(),
        ));
        let chain = ProcessorChain::from_names(&config.render.processors, &resolver)?;
        let html = Renderer::new(chain).render(module)?;

        if let Some(path) = &self.output {
            std::fs::write(path, &html)?;
            output.success(&format!("Wrote {}", path.display()));
        } else {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.write_all(b"\n")?;
            stdout.flush()?;
        }

        Ok(())
    }
}

fn link_templates(links: &LinksConfig) -> LinkTemplates {
    LinkTemplates {
        document: links.document_template.clone(),
        latest: links.latest_template.clone(),
        resource: links.resource_template.clone(),
        base_url: links.base_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(file: PathBuf, output: PathBuf, config: PathBuf) -> RenderArgs {
        RenderArgs {
            file,
            module_id: None,
            resources: None,
            output: Some(output),
            config: Some(config),
            base_url: None,
            processors: None,
            verbose: false,
        }
    }

    #[test]
    fn test_link_templates_from_config() {
        let links = LinksConfig {
            base_url: "https://archive.example.org".to_owned(),
            ..LinksConfig::default()
        };
        assert_eq!(
            link_templates(&links),
            LinkTemplates {
                base_url: "https://archive.example.org".to_owned(),
                ..LinkTemplates::default()
            }
        );
    }

    #[test]
    fn test_render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("cnx.toml");
        std::fs::write(&config, "[links]\nbase_url = \"https://archive.example.org\"\n").unwrap();
        let file = dir.path().join("m1.cnxml");
        std::fs::write(
            &file,
            concat!(
                r#"<document xmlns="http://cnx.rice.edu/cnxml"><content>"#,
                r#"<para id="p1">See <link document="m2">m2</link>.</para>"#,
                "</content></document>"
            ),
        )
        .unwrap();
        let out = dir.path().join("m1.html");

        args(file, out.clone(), config).execute().unwrap();

        assert_eq!(
            std::fs::read_to_string(out).unwrap(),
            r#"<p id="p1">See <a href="https://archive.example.org/content/m2/latest/">m2</a>.</p>"#
        );
    }

    #[test]
    fn test_render_with_resources_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("cnx.toml");
        std::fs::write(&config, "[resources]\ndir = \"media\"\n").unwrap();
        std::fs::create_dir(dir.path().join("media")).unwrap();
        std::fs::write(dir.path().join("media").join("chart 1.png"), b"png").unwrap();
        let file = dir.path().join("m1.cnxml");
        std::fs::write(
            &file,
            concat!(
                r#"<document xmlns="http://cnx.rice.edu/cnxml"><content>"#,
                r#"<link resource="chart 1.png">chart</link>"#,
                "</content></document>"
            ),
        )
        .unwrap();
        let out = dir.path().join("m1.html");

        args(file, out.clone(), config).execute().unwrap();

        assert_eq!(
            std::fs::read_to_string(out).unwrap(),
            r#"<a href="chart%201.png">chart</a>"#
        );
    }

    #[test]
    fn test_render_unknown_resource_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("cnx.toml");
        std::fs::write(&config, "").unwrap();
        let file = dir.path().join("m1.cnxml");
        std::fs::write(
            &file,
            r#"<document xmlns="http://cnx.rice.edu/cnxml"><content><link resource="gone.png"/></content></document>"#,
        )
        .unwrap();
        let out = dir.path().join("m1.html");

        let err = args(file, out.clone(), config).execute().unwrap_err();

        assert!(matches!(err, CliError::Render(_)), "{err:?}");
        assert!(!out.exists());
    }
}
