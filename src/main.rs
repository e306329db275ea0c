use breakwater::{config, content::Site, generate, output, serve};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "breakwater")]
#[command(about = "Bilingual portfolio site generator with a contact relay")]
#[command(long_about = "\
Bilingual portfolio site generator with a contact relay

Your filesystem is the data source. Message trees hold every piece of copy
in both languages, a slug registry maps URLs to project records, and
gallery directories hold the images.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── assets/                      # Static assets (favicon, logos) → copied to output root
  ├── messages/
  │   ├── tr.json                  # Turkish message tree
  │   └── en.json                  # English message tree
  └── projects/
      ├── projects.toml            # Slug ↔ id registry, hand-maintained
      ├── bagfas/
      │   ├── image-1.png          # Gallery images, ordered by number
      │   └── image-2.png
      └── kemerkoy/                # Missing gallery = 'coming soon' page

Every project page is generated for every locale; the registry is the
single source of which projects are live. The serve command hosts the
generated site with locale-prefix enforcement and POST /api/contact.

Run 'breakwater gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    content: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the static site from the content directory
    Build,
    /// Validate content without building (registry ↔ message cross-checks)
    Check,
    /// Serve the generated site with the locale middleware and contact relay
    Serve(ServeArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(clap::Args, Clone)]
struct ServeArgs {
    /// Override the bind address from config.toml
    #[arg(long)]
    addr: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!("==> Building {}", cli.content.display());
            let site = Site::load(&cli.content)?;
            let summary = generate::generate(&site, &cli.output)?;
            output::print_build_output(&summary);
            println!("==> Site generated at {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.content.display());
            let site = Site::load(&cli.content)?;
            output::print_check_output(&site);
            let problems = site.validate();
            if !problems.is_empty() {
                for problem in &problems {
                    eprintln!("error: {problem}");
                }
                return Err(format!("{} content problem(s) found", problems.len()).into());
            }
            println!("==> Content is valid");
        }
        Command::Serve(args) => {
            init_tracing();
            let mut site_config = config::load_config(&cli.content)?;
            if let Some(addr) = args.addr {
                site_config.server.bind = addr;
            }
            if !cli.output.join("index.html").is_file() {
                return Err(format!(
                    "no generated site at {} — run 'breakwater build' first",
                    cli.output.display()
                )
                .into());
            }
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(serve::serve(site_config, cli.output.clone()))?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("breakwater=info")),
        )
        .init();
}
