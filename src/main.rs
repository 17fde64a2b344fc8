// SPDX-License-Identifier: MIT
//
// n-chroma — a color-science toolkit for the command line.
//
// This is the main binary that wires together the library crates:
//
//   n-color  → color model, conversions, parsing, blending, conversion cache
//   n-access → WCAG compliance, contrast repair, accessible palettes/themes
//
// Each invocation flows through:
//
//   argv → clap → Settings (optional TOML) → Context (cache + output mode)
//        → command → report → stdout (text or JSON)
//
// Diagnostics are written to stderr via tracing.

mod commands;
mod config;
mod logging;

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use n_color::ConversionCache;
use tracing::debug;

use commands::Context;
use config::Settings;

#[derive(Parser)]
#[command(name = "n-chroma")]
#[command(about = "Color conversions, WCAG contrast checks, accessible palettes and themes")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML settings file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a color in every supported representation
    Convert(commands::ConvertArgs),

    /// Contrast ratio and WCAG levels of a foreground/background pair
    Contrast(commands::ContrastArgs),

    /// Suggest a compliant replacement for a color on a base color
    Suggest(commands::SuggestArgs),

    /// Adjust a color until it is readable on a background
    Enhance(commands::EnhanceArgs),

    /// Several distinct readable variants of a color
    Variants(commands::VariantsArgs),

    /// Generate an accessible palette around a seed color
    Palette(commands::PaletteArgs),

    /// Generate a five-role theme from a seed color
    Theme(commands::ThemeArgs),

    /// Composite one color over another with a blend mode
    Blend(commands::BlendArgs),

    /// Interpolate between two colors
    Mix(commands::MixArgs),
}

fn build_cache(capacity: Option<NonZeroUsize>) -> Arc<ConversionCache> {
    capacity.map_or_else(ConversionCache::shared, |capacity| {
        Arc::new(ConversionCache::with_capacity(capacity))
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    let settings = Settings::load(cli.config.as_deref())?;
    let cache = build_cache(settings.cache_capacity);
    let ctx = Context {
        settings,
        cache,
        json: cli.json,
    };

    match &cli.command {
        Commands::Convert(args) => commands::convert(args, &ctx),
        Commands::Contrast(args) => commands::contrast(args, &ctx),
        Commands::Suggest(args) => commands::suggest(args, &ctx),
        Commands::Enhance(args) => commands::enhance(args, &ctx),
        Commands::Variants(args) => commands::variants(args, &ctx),
        Commands::Palette(args) => commands::palette(args, &ctx),
        Commands::Theme(args) => commands::theme(args, &ctx),
        Commands::Blend(args) => commands::blend(args, &ctx),
        Commands::Mix(args) => commands::mix(args, &ctx),
    }?;

    debug!(stats = ?ctx.cache.stats(), "conversion cache");
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────
