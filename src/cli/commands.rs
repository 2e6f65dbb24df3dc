use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::app::{AppContext, Result};
use crate::config::PipelineConfig;
use crate::network::AdapterRegistry;
use crate::render::{JsonRenderer, Renderer, TemplateRenderer};
use crate::{request, template};

pub async fn fetch(
    ctx: &AppContext,
    config: &PipelineConfig,
    json: bool,
    seed: Option<u64>,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let items = ctx.pipeline.run(config, &mut rng).await?;

    let renderer: Box<dyn Renderer> = if json {
        Box::new(JsonRenderer)
    } else {
        Box::new(TemplateRenderer::new(config.template.as_deref()))
    };

    let output = renderer.render(&items)?;
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}

pub fn print_urls(registry: &AdapterRegistry, config: &PipelineConfig) {
    if config.networks.is_empty() {
        println!("No networks configured");
        return;
    }

    for network in &config.networks {
        let built = registry
            .resolve(&network.name)
            .and_then(|adapter| request::build(adapter, network, config.secure));
        match built {
            Ok(request) => println!("{:<10} {}", network.name, request.url),
            Err(e) => println!("{:<10} error: {}", network.name, e),
        }
    }
}

pub fn list_networks(registry: &AdapterRegistry) {
    for adapter in registry.adapters() {
        let params: Vec<&str> = template::placeholders(adapter.url_template)
            .into_iter()
            .filter(|p| *p != "protocol")
            .collect();

        println!("{} ({})", adapter.kind, adapter.kind.label());
        println!("  required: {}", adapter.required.join(", "));
        println!("  params:   {}", params.join(", "));
    }
}

pub fn init(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => PipelineConfig::default_config_path()?,
    };

    if PipelineConfig::create_default_config(&path)? {
        println!("Wrote default config to {}", path.display());
    } else {
        println!("Config already exists: {}", path.display());
    }

    Ok(())
}
