// Command-line front end for batch stamping.
// The lib.rs file serves as the public API for external consumers.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use image_stamper::{
    InputImage, NativeEngineLoader, OutputFormat, StampOptions, StampingService,
};

#[derive(Parser, Debug)]
#[command(name = "image-stamper", about = "Apply a watermark stamp to a batch of images")]
struct Args {
    /// Watermark image file
    #[arg(long)]
    stamp: PathBuf,

    /// Output directory
    #[arg(long, default_value = "stamped")]
    out: PathBuf,

    /// Encoding quality, 1-100 (default 75)
    #[arg(long)]
    quality: Option<u8>,

    /// Output format: jpg or webp (default jpg)
    #[arg(long)]
    format: Option<String>,

    /// Stamp opacity, 1-100 (default 50)
    #[arg(long)]
    opacity: Option<u8>,

    /// Skip drawing the filename label
    #[arg(long)]
    no_filename: bool,

    /// TTF/OTF font used for the filename label
    #[arg(long)]
    font: Option<PathBuf>,

    /// Export a single ZIP archive instead of writing individual files
    #[arg(long)]
    zip: bool,

    /// Images to stamp
    #[arg(required = true)]
    images: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .with_writer(std::io::stdout)
        .compact();
    subscriber.init();

    let args = Args::parse();

    let mut loader = NativeEngineLoader::new();
    if let Some(font_path) = &args.font {
        let font_bytes = tokio::fs::read(font_path)
            .await
            .with_context(|| format!("Failed to read font {}", font_path.display()))?;
        loader = loader.with_font(font_bytes);
    }

    let mut service = StampingService::new(&args.out).with_engine_loader(loader);
    service.initialize().await?;

    let stamp_bytes = tokio::fs::read(&args.stamp)
        .await
        .with_context(|| format!("Failed to read stamp {}", args.stamp.display()))?;
    service.set_stamp(&stamp_bytes).await?;

    let mut images = Vec::with_capacity(args.images.len());
    for path in &args.images {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Invalid file name: {}", path.display()))?
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        images.push(Some(InputImage::new(name, bytes)));
    }

    let options = StampOptions {
        quality: args.quality,
        format: args
            .format
            .as_deref()
            .map(str::parse::<OutputFormat>)
            .transpose()?,
        opacity: args.opacity,
        add_filename: args.no_filename.then_some(false),
    };

    let results = service
        .apply_stamp_to_images(&images, &options, |progress| {
            info!(
                "[{}/{}] {}",
                progress.current, progress.total, progress.current_file_name
            );
        })
        .await?;

    if args.zip {
        service.download_stamped_images(&results).await?;
    } else {
        service
            .save_stamped_images_to_specific_directory(&results, &args.out)
            .await?;
    }

    info!("Done: {} images stamped", results.len());
    Ok(())
}
