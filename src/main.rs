use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::{info, warn};
use mediaseed::settings::{Settings, init_logger};
use mediaseed::{scan_unlisted, seed_from_config, verify_uniform_digest, yield_files_from_config};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mediaseed",
    version,
    about = "CSV-manifest media fixture tool for local sync test runs"
)]
struct Cli {
    /// Override the MEDIASEED_LOG_LEVEL setting (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate the media files a manifest describes under a root folder
    List {
        config: PathBuf,

        /// Root folder; defaults to MEDIASEED_ROOT_FOLDER or "."
        root: Option<PathBuf>,

        /// Stamp each file's path into its EXIF UserComment before yielding
        #[arg(long, default_value_t = false)]
        annotate: bool,
    },

    /// Seed the fixture tree: copy a template file to every manifest path
    Seed {
        config: PathBuf,
        root: PathBuf,
        template: PathBuf,

        /// Stamp each seeded copy's path into its EXIF UserComment
        #[arg(long, default_value_t = false)]
        annotate: bool,
    },

    /// Check that every enumerated file shares one content digest
    Verify {
        config: PathBuf,

        /// Root folder; defaults to MEDIASEED_ROOT_FOLDER or "."
        root: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::from_env()?;
    if let Some(level) = cli.log_level {
        settings.log_level = level;
    }
    init_logger(settings.level_filter());

    match cli.cmd {
        Commands::List {
            config,
            root,
            annotate,
        } => {
            let root = root.unwrap_or_else(|| settings.root_folder.clone());
            let mut files = yield_files_from_config(&config, &root)
                .context("failed to open the manifest")?;
            if annotate {
                files = files.annotated();
            }
            let mut count = 0usize;
            for media in files {
                println!("{}", media.abs_path.display());
                count += 1;
            }
            info!("yielded {} media files from {:?}", count, config);
        }

        Commands::Seed {
            config,
            root,
            template,
            annotate,
        } => {
            let seeded = seed_from_config(&config, &root, &template, annotate)
                .context("failed to seed fixture tree")?;
            info!("seeded {} media files under {:?}", seeded.len(), root);
        }

        Commands::Verify { config, root } => {
            let root = root.unwrap_or_else(|| settings.root_folder.clone());
            let files: Vec<_> = yield_files_from_config(&config, &root)
                .context("failed to open the manifest")?
                .collect();

            for stray in scan_unlisted(&root, &files) {
                warn!("media file on disk but not in manifest: {:?}", stray);
            }

            let report = verify_uniform_digest(&files).context("digest verification failed")?;
            match report.digest {
                Some(digest) if report.is_uniform() => {
                    info!("{} files, uniform digest {}", report.files, digest);
                }
                Some(digest) => {
                    for (rel, got) in &report.mismatches {
                        warn!("digest mismatch for {:?}: {} (expected {})", rel, got, digest);
                    }
                    bail!(
                        "{} of {} files differ from the expected digest",
                        report.mismatches.len(),
                        report.files
                    );
                }
                None => info!("no files to verify"),
            }
        }
    }

    Ok(())
}
