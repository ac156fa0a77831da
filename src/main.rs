use clap::{Parser, Subcommand};
use collage::collage::{Collage, LayoutEvent};
use collage::config::{self, CollageConfig};
use collage::geometry::Size;
use collage::placement::PlacementSet;
use collage::random::{choose_seed, source_for};
use collage::scene::Scene;
use collage::{output, render, scan};
use std::path::{Path, PathBuf};

/// Container size overrides for a single run.
#[derive(clap::Args, Clone, Default)]
struct ContainerArgs {
    /// Collage area width (overrides the scene's container)
    #[arg(long)]
    width: Option<f64>,
    /// Collage area height (overrides the scene's container)
    #[arg(long)]
    height: Option<f64>,
}

impl ContainerArgs {
    fn is_set(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }

    fn apply(&self, container: Size) -> Size {
        Size::new(
            self.width.unwrap_or(container.width),
            self.height.unwrap_or(container.height),
        )
    }
}

#[derive(Parser)]
#[command(name = "collage")]
#[command(about = "Random non-overlapping image collages")]
#[command(long_about = "\
Random non-overlapping image collages

Images are scattered at random inside a fixed area so that no two come
closer than a margin, then rendered as a static page where each image
fades in after its own random delay.

Pipeline:

  collage scan photos/      # photos/ → scene.json (measured images)
  collage layout            # scene.json → placements.json
  collage render            # scene.json → collage.html

Image order follows numeric prefixes (010-harbour.jpg before 020-pier.jpg);
earlier images are placed first and never moved.

Run 'collage gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Random seed (overrides config; omit for a fresh layout)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Measure a directory of images into a scene file
    Scan {
        /// Directory of images
        dir: PathBuf,
        /// Scene file to write
        #[arg(long, default_value = "scene.json")]
        out: PathBuf,
        #[command(flatten)]
        container: ContainerArgs,
    },
    /// Compute placements for a scene
    Layout {
        #[arg(long, default_value = "scene.json")]
        scene: PathBuf,
        /// Placements file to write
        #[arg(long, default_value = "placements.json")]
        out: PathBuf,
        #[command(flatten)]
        container: ContainerArgs,
    },
    /// Render a scene as an HTML collage page
    Render {
        #[arg(long, default_value = "scene.json")]
        scene: PathBuf,
        /// Use an existing placements file instead of laying out afresh
        #[arg(long)]
        placements: Option<PathBuf>,
        /// Page to write
        #[arg(long, default_value = "collage.html")]
        out: PathBuf,
        /// Page title
        #[arg(long, default_value = "Collage")]
        title: String,
        #[command(flatten)]
        container: ContainerArgs,
    },
    /// Validate a scene without laying it out
    Check {
        #[arg(long, default_value = "scene.json")]
        scene: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            dir,
            out,
            container,
        } => {
            let config = config::load_config(&cli.config)?;
            init_thread_pool(&config.processing);
            println!("==> Scanning {}", dir.display());
            let scene = scan::scan(&dir, &config.scan, container.apply(config.container.size()))?;
            scene.save(&out)?;
            output::print_scan_output(&scene);
            println!("==> Wrote {}", out.display());
        }
        Command::Layout {
            scene,
            out,
            container,
        } => {
            let config = config::load_config(&cli.config)?;
            let scene = Scene::load(&scene)?;
            let set = lay_out(&scene, &config, cli.seed, &container)?;
            write_json(&out, &set)?;
            output::print_layout_output(&scene, &set);
            println!("==> Wrote {}", out.display());
        }
        Command::Render {
            scene,
            placements,
            out,
            title,
            container,
        } => {
            if placements.is_some() && container.is_set() {
                return Err("--width/--height cannot be combined with --placements; \
                            the placements file fixes the container"
                    .into());
            }
            let config = config::load_config(&cli.config)?;
            let scene = Scene::load(&scene)?;
            let set = match placements {
                Some(path) => read_json::<PlacementSet>(&path)?,
                None => lay_out(&scene, &config, cli.seed, &container)?,
            };
            let page = render::render_page(&title, &scene, &set, &config.reveal)?;
            render::write_page(&out, page)?;
            output::print_layout_output(&scene, &set);
            println!("==> Rendered {}", out.display());
        }
        Command::Check { scene } => {
            let scene = Scene::load(&scene)?;
            output::print_check_output(&scene);
            println!("==> Scene is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Lay out a scene once, as the page would on its first ready signal.
fn lay_out(
    scene: &Scene,
    config: &CollageConfig,
    cli_seed: Option<u64>,
    container: &ContainerArgs,
) -> Result<PlacementSet, Box<dyn std::error::Error>> {
    let seed = choose_seed(cli_seed.or(config.seed), config.layout.stable, scene.ids());
    let mut rng = source_for(seed);
    let mut collage = Collage::new(scene.item_sizes(), config.layout.params());
    let container = container.apply(scene.container);
    if !container.is_valid() {
        return Err(format!("invalid container size {} x {}", container.width, container.height).into());
    }
    collage
        .handle(LayoutEvent::Ready(container), &mut rng)
        .cloned()
        .ok_or_else(|| "layout produced no placements".into())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. Config can lower the count, never raise it.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
