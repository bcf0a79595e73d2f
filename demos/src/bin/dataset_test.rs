//! Dataset Testing Demo
//!
//! This demo exercises ISIC2018 dataset loading end to end. It's useful for
//! debugging dataset issues and understanding data formats.
//!
//! ## Usage
//!
//! ```bash
//! # Test dataset loading
//! cargo run --bin dataset_test -- --dataset-path datasets/isic2018
//!
//! # Test with resizing disabled
//! cargo run --bin dataset_test -- --dataset-path datasets/isic2018 --no-resize
//!
//! # Test with synthetic input corruption
//! cargo run --bin dataset_test -- --dataset-path datasets/isic2018 --damage-degree 0.3
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use burn::data::{dataloader::DataLoaderBuilder, dataset::Dataset};
use clap::Parser;
use isic2018_demos::{get_backend_name, DatasetTestConfig, SelectedBackend};

use isic2018_burn::{
    DamageConfig, DamageMethod, DamageSource, IsicBatcher, IsicDataset, IsicDatasetConfig,
    IsicItem, TensorImage,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to dataset root directory
    #[arg(long, default_value = "datasets/isic2018")]
    dataset_path: PathBuf,

    /// Number of samples to test
    #[arg(long, default_value = "10")]
    num_samples: usize,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Resize target (square), applied to inputs and masks
    #[arg(long, default_value = "512")]
    image_size: u32,

    /// Disable resizing, keeping original image sizes
    #[arg(long)]
    no_resize: bool,

    /// Damage degree in (0, 1) for synthetic input corruption
    #[arg(long)]
    damage_degree: Option<f64>,

    /// Damage method name
    #[arg(long, default_value = "random-corrupt")]
    damage_method: String,

    /// Corrupt the in-memory transformed input instead of re-reading the file
    #[arg(long)]
    damage_from_transformed: bool,

    /// Batch size for testing
    #[arg(long, default_value = "4")]
    batch_size: usize,

    /// Number of workers for data loading
    #[arg(long, default_value = "2")]
    num_workers: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &args.config {
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        serde_json::from_str::<DatasetTestConfig>(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?
    } else {
        DatasetTestConfig::default()
    };

    // Apply command line overrides
    config.dataset_path = args.dataset_path.clone();
    config.num_samples = args.num_samples;
    config.image_size = if args.no_resize {
        None
    } else {
        Some(args.image_size)
    };
    if args.damage_degree.is_some() {
        config.damage_degree = args.damage_degree;
    }

    // Validate inputs
    if !config.dataset_path.exists() {
        anyhow::bail!(
            "Dataset path does not exist: {}",
            config.dataset_path.display()
        );
    }

    println!("Using backend: {}", get_backend_name());

    println!("Testing dataset loading...");
    println!("Dataset path: {}", config.dataset_path.display());
    println!("Number of samples to test: {}", config.num_samples);

    // Create dataset
    let dataset = create_dataset(&config, &args)?;

    // Test individual samples
    test_individual_samples(&dataset, &config)?;

    // Test data statistics
    test_data_statistics(&dataset, &config)?;

    // Test batch loading
    test_batch_loading(dataset, args.batch_size, args.num_workers)?;

    println!("Dataset testing completed successfully!");
    Ok(())
}

/// Create the dataset
fn create_dataset(config: &DatasetTestConfig, args: &Args) -> Result<IsicDataset> {
    let mut dataset_config = IsicDatasetConfig::new(config.dataset_path.clone())
        .with_input_path(config.input_subdir.clone())
        .with_target_path(config.target_subdir.clone())
        .with_transform(true);

    if let Some(size) = config.image_size {
        dataset_config = dataset_config
            .with_image_width(size)
            .with_image_height(size);
    }

    if let Some(degree) = config.damage_degree {
        let method: DamageMethod = args
            .damage_method
            .parse()
            .with_context(|| format!("Invalid damage method: {}", args.damage_method))?;
        let source = if args.damage_from_transformed {
            DamageSource::TransformedImage
        } else {
            DamageSource::OriginalFile
        };
        dataset_config =
            dataset_config.with_damage(Some(DamageConfig::new(method, degree).with_source(source)));
    }

    let dataset = IsicDataset::new(dataset_config).context("Failed to create dataset")?;

    let len = dataset
        .checked_len()
        .context("Dataset length check failed")?;
    println!("Dataset created successfully with {len} samples");
    Ok(dataset)
}

/// Test individual samples
fn test_individual_samples(dataset: &IsicDataset, config: &DatasetTestConfig) -> Result<()> {
    println!("\n=== Testing Individual Samples ===");

    let num_samples = config.num_samples.min(dataset.len());

    for i in 0..num_samples {
        let sample: IsicItem = dataset.get(i).context("Failed to get sample")?;

        println!("Sample {i}:");
        println!("  Image shape: {:?}", sample.image.dims());
        println!("  Mask shape: {:?}", sample.mask.dims());

        // Check data ranges
        let image_stats = calculate_array_stats(&sample.image);
        let mask_stats = calculate_array_stats(&sample.mask);

        println!(
            "  Image stats: min={:.4}, max={:.4}, mean={:.4}",
            image_stats.0, image_stats.1, image_stats.2
        );
        println!(
            "  Mask stats: min={:.4}, max={:.4}, mean={:.4}",
            mask_stats.0, mask_stats.1, mask_stats.2
        );

        // Validate data ranges
        if image_stats.0 < 0.0 || image_stats.1 > 1.0 {
            println!("  WARNING: Image values outside expected range [0, 1]");
        }

        if mask_stats.0 < 0.0 || mask_stats.1 > 1.0 {
            println!("  WARNING: Mask values outside expected range [0, 1]");
        }
    }

    Ok(())
}

/// Test data statistics
fn test_data_statistics(dataset: &IsicDataset, config: &DatasetTestConfig) -> Result<()> {
    println!("\n=== Testing Data Statistics ===");

    let mut image_stats = StatisticsAccumulator::new();
    let mut mask_stats = StatisticsAccumulator::new();

    let num_samples = config.num_samples.min(dataset.len());

    for i in 0..num_samples {
        let sample = dataset.get(i).context("Failed to get sample")?;

        let (img_min, img_max, img_mean) = calculate_array_stats(&sample.image);
        let (mask_min, mask_max, mask_mean) = calculate_array_stats(&sample.mask);

        image_stats.add(img_min, img_max, img_mean);
        mask_stats.add(mask_min, mask_max, mask_mean);
    }

    println!("Image statistics across {num_samples} samples:");
    println!(
        "  Min: {:.4} (avg: {:.4})",
        image_stats.min_val,
        image_stats.avg_min()
    );
    println!(
        "  Max: {:.4} (avg: {:.4})",
        image_stats.max_val,
        image_stats.avg_max()
    );
    println!("  Mean: avg={:.4}", image_stats.avg_mean());

    println!("Mask statistics across {num_samples} samples:");
    println!(
        "  Min: {:.4} (avg: {:.4})",
        mask_stats.min_val,
        mask_stats.avg_min()
    );
    println!(
        "  Max: {:.4} (avg: {:.4})",
        mask_stats.max_val,
        mask_stats.avg_max()
    );
    println!("  Mean: avg={:.4}", mask_stats.avg_mean());

    Ok(())
}

/// Test batch loading
fn test_batch_loading(dataset: IsicDataset, batch_size: usize, num_workers: usize) -> Result<()> {
    println!("\n=== Testing Batch Loading ===");

    let dataloader = DataLoaderBuilder::new(IsicBatcher::<SelectedBackend>::new())
        .batch_size(batch_size)
        .shuffle(42)
        .num_workers(num_workers)
        .build(dataset);

    let mut batch_count = 0;
    let max_batches = 3; // Test first 3 batches

    for batch in dataloader.iter() {
        batch_count += 1;

        println!("Batch {batch_count}:");
        println!("  Images shape: {:?}", batch.images.dims());
        println!("  Masks shape: {:?}", batch.masks.dims());

        // Validate batch dimensions
        let [batch_images, channels, _height, _width] = batch.images.dims();
        let [batch_masks, mask_channels, _mask_height, _mask_width] = batch.masks.dims();

        if batch_images != batch_masks {
            println!("  ERROR: Batch size mismatch between images and masks");
        }

        if channels != 3 {
            println!("  WARNING: Expected 3 channels for images, got {channels}");
        }

        if mask_channels != 1 {
            println!("  WARNING: Expected 1 channel for masks, got {mask_channels}");
        }

        if batch_count >= max_batches {
            break;
        }
    }

    println!("Batch loading test completed ({batch_count} batches tested)");
    Ok(())
}

/// Calculate min/max/mean over a raw data plane
fn calculate_array_stats(image: &TensorImage) -> (f32, f32, f32) {
    let mut min_val = f32::INFINITY;
    let mut max_val = f32::NEG_INFINITY;
    let mut sum = 0.0f64;

    for &value in &image.data {
        min_val = min_val.min(value);
        max_val = max_val.max(value);
        sum += f64::from(value);
    }

    let mean = if image.data.is_empty() {
        0.0
    } else {
        (sum / image.data.len() as f64) as f32
    };

    (min_val, max_val, mean)
}

/// Statistics accumulator for aggregating across samples
struct StatisticsAccumulator {
    min_val: f32,
    max_val: f32,
    min_sum: f32,
    max_sum: f32,
    mean_sum: f32,
    count: usize,
}

impl StatisticsAccumulator {
    const fn new() -> Self {
        Self {
            min_val: f32::INFINITY,
            max_val: f32::NEG_INFINITY,
            min_sum: 0.0,
            max_sum: 0.0,
            mean_sum: 0.0,
            count: 0,
        }
    }

    fn add(&mut self, min: f32, max: f32, mean: f32) {
        self.min_val = self.min_val.min(min);
        self.max_val = self.max_val.max(max);
        self.min_sum += min;
        self.max_sum += max;
        self.mean_sum += mean;
        self.count += 1;
    }

    fn avg_min(&self) -> f32 {
        if self.count > 0 {
            self.min_sum / self.count as f32
        } else {
            0.0
        }
    }

    fn avg_max(&self) -> f32 {
        if self.count > 0 {
            self.max_sum / self.count as f32
        } else {
            0.0
        }
    }

    fn avg_mean(&self) -> f32 {
        if self.count > 0 {
            self.mean_sum / self.count as f32
        } else {
            0.0
        }
    }
}
