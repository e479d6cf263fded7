use clap::{Parser, Subcommand, ValueEnum};
use pseo::config::{self, PseoConfig};
use pseo::page::{GenerationConfig, PageGenerator};
use pseo::template::TemplateRegistry;
use pseo::{head, output, validate};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Selects a template and how its pages are addressed.
#[derive(clap::Args, Clone)]
struct TemplateArgs {
    /// Template name
    #[arg(short, long)]
    template: String,

    /// URL pattern with {variable} tokens (defaults to the template's url_pattern)
    #[arg(long)]
    url_pattern: Option<String>,

    /// Override the configured base URL
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Html,
}

#[derive(Parser)]
#[command(name = "pseo")]
#[command(about = "Programmatic SEO page generator")]
#[command(long_about = "\
Programmatic SEO page generator

Templates declare a title and description with {variable} tokens and a list
of values per variable. Every combination becomes a page with a slug,
canonical URL, keywords and optional JSON-LD structured data.

  pseo.toml
  ├── base_url                     # Canonical URL prefix
  ├── [site]                       # Publisher identity for JSON-LD
  ├── [generation]                 # Default cap, generic keywords
  ├── [limits]                     # Title/description length bounds
  └── [[templates]]                # name, title, description, url_pattern
      └── [templates.variables]    # device1 = [\"iPhone\", \"Android\"]

Run 'pseo gen-config' to print a documented pseo.toml.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = "pseo.toml", global = true)]
    config: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate pages for a template and print them
    Pages {
        #[command(flatten)]
        target: TemplateArgs,

        /// Attach JSON-LD structured data
        #[arg(long)]
        structured_data: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Article publish date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        published: Option<String>,
    },
    /// Generate pages for a template and validate the batch
    Validate {
        #[command(flatten)]
        target: TemplateArgs,
    },
    /// Show combination counts for a template
    Stats {
        /// Template name
        #[arg(short, long)]
        template: String,
    },
    /// Check every configured template for configuration errors
    Check,
    /// Print a stock pseo.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let site_config = config::load_config(&cli.config)?;
    let registry = site_config.registry()?;

    match cli.command {
        Command::Pages {
            target,
            structured_data,
            format,
            published,
        } => {
            let include = structured_data || site_config.generation.include_structured_data;
            let mut request = generation_request(&registry, &target)?.with_structured_data(include);
            if let Some(date) = published {
                request = request.published_on(date);
            }
            let pages = PageGenerator::from_config(&registry, &site_config).generate_pages(&request);
            match format {
                Format::Text => output::print_pages_output(&pages),
                Format::Json => println!("{}", serde_json::to_string_pretty(&pages)?),
                Format::Html => {
                    for page in &pages {
                        println!("{}", head::render_head(page).into_string());
                    }
                }
            }
        }
        Command::Validate { target } => {
            let request = generation_request(&registry, &target)?
                .with_structured_data(site_config.generation.include_structured_data);
            let report = PageGenerator::from_config(&registry, &site_config).generate_report(&request);
            println!(
                "==> Validating {} pages from {}",
                report.pages.len(),
                target.template
            );
            let mut result = validate::validate_pages_with(&report.pages, &site_config.limits);
            if let Some(warning) = output::skipped_warning(&report) {
                result.warnings.push(warning);
            }
            output::print_validation_output(&result);
            if !result.is_valid {
                std::process::exit(1);
            }
        }
        Command::Stats { template } => {
            let stats = registry
                .template_stats(&template)
                .ok_or_else(|| unknown_template(&template))?;
            output::print_stats_output(&template, &stats);
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let all_valid = check_templates(&registry, &site_config);
            if !all_valid {
                std::process::exit(1);
            }
            println!("==> {} templates are valid", registry.len());
        }
        Command::GenConfig => unreachable!("handled before config loading"),
    }

    Ok(())
}

/// Install the stderr log subscriber.
///
/// `--verbose` forces `debug`; otherwise `RUST_LOG` applies, defaulting to `warn`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolve template, URL pattern and base URL for a generation run.
fn generation_request(
    registry: &TemplateRegistry,
    target: &TemplateArgs,
) -> Result<GenerationConfig, Box<dyn std::error::Error>> {
    let template = registry
        .get(&target.template)
        .ok_or_else(|| unknown_template(&target.template))?;
    let pattern = target
        .url_pattern
        .clone()
        .or_else(|| template.url_pattern.clone())
        .ok_or_else(|| {
            format!(
                "template '{}' has no url_pattern; pass --url-pattern",
                target.template
            )
        })?;
    let mut request = GenerationConfig::new(&target.template, pattern);
    if let Some(base_url) = &target.base_url {
        request = request.base_url(base_url);
    }
    Ok(request)
}

fn check_templates(registry: &TemplateRegistry, site_config: &PseoConfig) -> bool {
    let mut all_valid = true;
    for (i, name) in registry.names().enumerate() {
        if let Some(result) = registry.validate(name, &site_config.limits) {
            all_valid &= result.is_valid;
            output::print_template_check(i + 1, name, &result);
        }
    }
    all_valid
}

fn unknown_template(name: &str) -> String {
    format!("unknown template '{name}'")
}
