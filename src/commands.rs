// SPDX-License-Identifier: MIT
//
// Subcommand arguments, execution, and report rendering.
//
// Every command builds a report value that is both `Serialize` (for
// `--json`) and `Display` (for the default human-readable output), so the
// two output modes can never drift apart.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use n_access::{
    AccessibilityEnhancer, AccessiblePaletteGenerator, AdjustmentStrategy, ColorTheme,
    ComplianceResult, ContrastChecker, EnhancerConfig, PaletteConfig, SuggestionEngine,
    WcagLevel,
};
use n_color::{BlendMode, Color, ColorComponents, ConversionCache, InterpolationSpace};
use serde::Serialize;
use tracing::info;

use crate::config::Settings;

/// Everything a command needs besides its own arguments.
pub struct Context {
    pub settings: Settings,
    pub cache: Arc<ConversionCache>,
    pub json: bool,
}

impl Context {
    fn checker(&self) -> ContrastChecker {
        ContrastChecker::new(Arc::clone(&self.cache))
    }

    fn emit<T: Serialize + fmt::Display>(&self, report: &T) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(report)?);
        } else {
            println!("{report}");
        }
        Ok(())
    }
}

// ─── Value Parsers ──────────────────────────────────────────────────────────

fn parse_level(s: &str) -> Result<WcagLevel, String> {
    WcagLevel::from_name(s)
        .ok_or_else(|| format!("unknown level `{s}` (expected aa-large, aa, aaa-large or aaa)"))
}

fn parse_strategy(s: &str) -> Result<AdjustmentStrategy, String> {
    AdjustmentStrategy::from_name(s).ok_or_else(|| {
        format!(
            "unknown strategy `{s}` (expected preserve-hue, preserve-saturation, \
             preserve-lightness or minimum-change)"
        )
    })
}

fn parse_mode(s: &str) -> Result<BlendMode, String> {
    BlendMode::from_name(s).ok_or_else(|| format!("unknown blend mode `{s}`"))
}

fn parse_space(s: &str) -> Result<InterpolationSpace, String> {
    InterpolationSpace::from_name(s)
        .ok_or_else(|| format!("unknown color space `{s}` (expected rgb, hsl or lab)"))
}

// ─── convert ────────────────────────────────────────────────────────────────

#[derive(Args)]
pub struct ConvertArgs {
    /// Color in any supported notation (hex, rgb(), hsl(), lab(), cmyk(), name)
    #[arg(value_name = "COLOR")]
    color: Color,
}

#[derive(Debug, Serialize)]
pub struct ConvertReport {
    #[serde(flatten)]
    components: ColorComponents,
}

impl fmt::Display for ConvertReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.components;
        let [r, g, b, a] = c.rgba;
        writeln!(f, "hex        {}", c.hex)?;
        writeln!(f, "rgba       {r:.4}, {g:.4}, {b:.4}, {a:.4}")?;
        writeln!(
            f,
            "hsl        {:.1}°, {:.1}%, {:.1}%",
            c.hsl.hue * 360.0,
            c.hsl.saturation * 100.0,
            c.hsl.lightness * 100.0
        )?;
        writeln!(
            f,
            "hsb        {:.1}°, {:.1}%, {:.1}%",
            c.hsb.hue * 360.0,
            c.hsb.saturation * 100.0,
            c.hsb.brightness * 100.0
        )?;
        writeln!(f, "lab        {:.2}, {:.2}, {:.2}", c.lab.l, c.lab.a, c.lab.b)?;
        writeln!(f, "xyz        {:.3}, {:.3}, {:.3}", c.xyz.x, c.xyz.y, c.xyz.z)?;
        writeln!(
            f,
            "cmyk       {:.1}%, {:.1}%, {:.1}%, {:.1}%",
            c.cmyk.cyan * 100.0,
            c.cmyk.magenta * 100.0,
            c.cmyk.yellow * 100.0,
            c.cmyk.key * 100.0
        )?;
        write!(f, "luminance  {:.4}", c.luminance)
    }
}

pub fn convert(args: &ConvertArgs, ctx: &Context) -> Result<()> {
    ctx.emit(&ConvertReport {
        components: args.color.components(),
    })
}

// ─── contrast ───────────────────────────────────────────────────────────────

#[derive(Args)]
pub struct ContrastArgs {
    /// Foreground (text) color
    foreground: Color,

    /// Background color
    background: Color,
}

#[derive(Debug, Serialize)]
pub struct ContrastReport {
    foreground: Color,
    background: Color,
    result: ComplianceResult,
    highest_level: Option<WcagLevel>,
}

impl ContrastReport {
    fn build(checker: &ContrastChecker, foreground: Color, background: Color) -> Self {
        let result = checker.evaluate(foreground, background);
        Self {
            foreground,
            background,
            result,
            highest_level: result.highest_level(),
        }
    }
}

impl fmt::Display for ContrastReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} on {}: {:.2}:1",
            self.foreground,
            self.background,
            self.result.contrast_ratio()
        )?;
        for level in WcagLevel::ALL {
            let mark = if self.result.passes_level(level) {
                "pass"
            } else {
                "fail"
            };
            writeln!(f, "  {:<10} {mark}", level.name())?;
        }
        match self.highest_level {
            Some(level) => write!(f, "highest    {level}"),
            None => write!(f, "highest    none"),
        }
    }
}

pub fn contrast(args: &ContrastArgs, ctx: &Context) -> Result<()> {
    ctx.emit(&ContrastReport::build(
        &ctx.checker(),
        args.foreground,
        args.background,
    ))
}

// ─── suggest ────────────────────────────────────────────────────────────────

#[derive(Args)]
pub struct SuggestArgs {
    /// Base (background) color
    base: Color,

    /// Color to repair
    target: Color,

    /// WCAG level to reach [default: from config, else aa]
    #[arg(short, long, value_parser = parse_level)]
    level: Option<WcagLevel>,

    /// Allow the hue to change
    #[arg(long)]
    no_preserve_hue: bool,
}

#[derive(Debug, Serialize)]
pub struct SuggestReport {
    base: Color,
    target: Color,
    level: WcagLevel,
    suggestions: Vec<Suggestion>,
}

#[derive(Debug, Serialize)]
struct Suggestion {
    color: Color,
    contrast_ratio: f64,
}

impl fmt::Display for SuggestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {} at {}:", self.target, self.base, self.level)?;
        for s in &self.suggestions {
            write!(f, "\n  {}  {:.2}:1", s.color, s.contrast_ratio)?;
        }
        Ok(())
    }
}

pub fn suggest(args: &SuggestArgs, ctx: &Context) -> Result<()> {
    let checker = ctx.checker();
    let level = args.level.unwrap_or(ctx.settings.enhancer.target_level);
    let engine = SuggestionEngine::new(checker.clone());

    let suggestions = engine
        .suggest(args.base, args.target, level, !args.no_preserve_hue)
        .into_iter()
        .map(|color| Suggestion {
            color,
            contrast_ratio: checker.contrast_ratio(color, args.base),
        })
        .collect();

    ctx.emit(&SuggestReport {
        base: args.base,
        target: args.target,
        level,
        suggestions,
    })
}

// ─── enhance ────────────────────────────────────────────────────────────────

#[derive(Args)]
pub struct EnhanceArgs {
    /// Color to enhance
    color: Color,

    /// Background it must be readable on
    background: Color,

    /// WCAG level to reach [default: from config, else aa]
    #[arg(short, long, value_parser = parse_level)]
    level: Option<WcagLevel>,

    /// Adjustment strategy [default: from config, else preserve-hue]
    #[arg(short, long, value_parser = parse_strategy)]
    strategy: Option<AdjustmentStrategy>,

    /// Prefer darker results where the search allows it
    #[arg(long)]
    prefer_darker: bool,
}

impl EnhanceArgs {
    fn config(&self, base: &EnhancerConfig) -> EnhancerConfig {
        EnhancerConfig {
            target_level: self.level.unwrap_or(base.target_level),
            strategy: self.strategy.unwrap_or(base.strategy),
            prefer_darker: self.prefer_darker || base.prefer_darker,
            ..*base
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EnhanceReport {
    color: Color,
    background: Color,
    level: WcagLevel,
    strategy: AdjustmentStrategy,
    result: Color,
    contrast_ratio: f64,
    delta_e: f64,
}

impl fmt::Display for EnhanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {} on {} ({}, {}): {:.2}:1, ΔE {:.1}",
            self.color,
            self.result,
            self.background,
            self.strategy,
            self.level,
            self.contrast_ratio,
            self.delta_e
        )
    }
}

pub fn enhance(args: &EnhanceArgs, ctx: &Context) -> Result<()> {
    let config = args.config(&ctx.settings.enhancer);
    let checker = ctx.checker();
    let enhancer = AccessibilityEnhancer::new(config)?.with_checker(checker.clone());
    let result = enhancer.enhance(args.color, args.background);

    ctx.emit(&EnhanceReport {
        color: args.color,
        background: args.background,
        level: config.target_level,
        strategy: config.strategy,
        result,
        contrast_ratio: checker.contrast_ratio(result, args.background),
        delta_e: checker.lab(args.color).delta_e(checker.lab(result)),
    })
}

// ─── variants ───────────────────────────────────────────────────────────────

#[derive(Args)]
pub struct VariantsArgs {
    /// Color to enhance
    color: Color,

    /// Background the variants must be readable on
    background: Color,

    /// Maximum number of variants
    #[arg(short = 'n', long, default_value_t = 4)]
    count: usize,

    /// WCAG level to reach [default: from config, else aa]
    #[arg(short, long, value_parser = parse_level)]
    level: Option<WcagLevel>,
}

#[derive(Debug, Serialize)]
pub struct VariantsReport {
    color: Color,
    background: Color,
    level: WcagLevel,
    variants: Vec<Suggestion>,
}

impl fmt::Display for VariantsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} variant(s) of {} on {} at {}:",
            self.variants.len(),
            self.color,
            self.background,
            self.level
        )?;
        for v in &self.variants {
            write!(f, "\n  {}  {:.2}:1", v.color, v.contrast_ratio)?;
        }
        Ok(())
    }
}

pub fn variants(args: &VariantsArgs, ctx: &Context) -> Result<()> {
    let config = EnhancerConfig {
        target_level: args.level.unwrap_or(ctx.settings.enhancer.target_level),
        ..ctx.settings.enhancer
    };
    let checker = ctx.checker();
    let enhancer = AccessibilityEnhancer::new(config)?.with_checker(checker.clone());

    let variants = enhancer
        .suggest_variants(args.color, args.background, args.count)
        .into_iter()
        .map(|color| Suggestion {
            color,
            contrast_ratio: checker.contrast_ratio(color, args.background),
        })
        .collect();

    ctx.emit(&VariantsReport {
        color: args.color,
        background: args.background,
        level: config.target_level,
        variants,
    })
}

// ─── palette ────────────────────────────────────────────────────────────────

#[derive(Args)]
pub struct PaletteArgs {
    /// Seed color the palette is built around
    #[arg(value_name = "COLOR")]
    color: Color,

    /// Number of colors, seed included [default: from config, else 5]
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// Contrast level candidates aim for against the seed
    #[arg(short, long, value_parser = parse_level)]
    level: Option<WcagLevel>,

    /// Leave black and white out of the palette
    #[arg(long)]
    no_black_white: bool,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

impl PaletteArgs {
    fn config(&self, base: &PaletteConfig) -> PaletteConfig {
        PaletteConfig {
            target_level: self.level.unwrap_or(base.target_level),
            palette_size: self.size.unwrap_or(base.palette_size),
            include_black_and_white: base.include_black_and_white && !self.no_black_white,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaletteReport {
    seed: Color,
    requested: usize,
    colors: Vec<PaletteEntry>,
}

#[derive(Debug, Serialize)]
struct PaletteEntry {
    color: Color,
    contrast_with_seed: f64,
}

impl fmt::Display for PaletteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "palette for {} ({} of {}):",
            self.seed,
            self.colors.len(),
            self.requested
        )?;
        for entry in &self.colors {
            write!(f, "\n  {}  {:.2}:1", entry.color, entry.contrast_with_seed)?;
        }
        Ok(())
    }
}

pub fn palette(args: &PaletteArgs, ctx: &Context) -> Result<()> {
    let config = args.config(&ctx.settings.palette);
    let checker = ctx.checker();
    let generator = AccessiblePaletteGenerator::new(config)?.with_checker(checker.clone());

    let colors = match args.seed {
        Some(seed) => generator.generate_palette_seeded(args.color, seed),
        None => generator.generate_palette(args.color),
    };
    info!(requested = config.palette_size, achieved = colors.len(), "palette generated");

    ctx.emit(&PaletteReport {
        seed: args.color,
        requested: config.palette_size,
        colors: colors
            .into_iter()
            .map(|color| PaletteEntry {
                color,
                contrast_with_seed: checker.contrast_ratio(color, args.color),
            })
            .collect(),
    })
}

// ─── theme ──────────────────────────────────────────────────────────────────

#[derive(Args)]
pub struct ThemeArgs {
    /// Seed color (becomes the primary role)
    #[arg(value_name = "COLOR")]
    color: Color,

    /// Theme name
    #[arg(long, default_value = "Untitled")]
    name: String,

    /// Repair secondary and accent against the background
    #[arg(long)]
    verify: bool,
}

#[derive(Debug, Serialize)]
pub struct ThemeReport {
    verified: bool,
    #[serde(flatten)]
    theme: ColorTheme,
}

impl fmt::Display for ThemeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.verified { " (verified)" } else { "" };
        write!(f, "{}{suffix}", self.theme.name)?;
        for (role, variant) in self.theme.roles() {
            write!(
                f,
                "\n  {role:<11}{}  light {}  dark {}",
                variant.base, variant.light, variant.dark
            )?;
        }
        Ok(())
    }
}

pub fn theme(args: &ThemeArgs, ctx: &Context) -> Result<()> {
    let generator =
        AccessiblePaletteGenerator::new(ctx.settings.palette)?.with_checker(ctx.checker());
    let theme = if args.verify {
        generator.generate_verified_theme(args.color, &args.name)
    } else {
        generator.generate_theme(args.color, &args.name)
    };

    ctx.emit(&ThemeReport {
        verified: args.verify,
        theme,
    })
}

// ─── blend / mix ────────────────────────────────────────────────────────────

#[derive(Args)]
pub struct BlendArgs {
    /// Backdrop color
    base: Color,

    /// Source color composited over the backdrop
    top: Color,

    /// Blend mode
    #[arg(short, long, value_parser = parse_mode, default_value = "normal")]
    mode: BlendMode,
}

#[derive(Debug, Serialize)]
pub struct BlendReport {
    base: Color,
    top: Color,
    mode: BlendMode,
    result: Color,
}

impl fmt::Display for BlendReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = {}", self.base, self.mode, self.top, self.result)
    }
}

pub fn blend(args: &BlendArgs, ctx: &Context) -> Result<()> {
    ctx.emit(&BlendReport {
        base: args.base,
        top: args.top,
        mode: args.mode,
        result: ctx.cache.blend(args.base, args.top, args.mode),
    })
}

#[derive(Args)]
pub struct MixArgs {
    /// Start color (amount 0)
    from: Color,

    /// End color (amount 1)
    to: Color,

    /// Position between the two colors, in [0, 1]
    #[arg(short, long, default_value_t = 0.5)]
    amount: f64,

    /// Interpolation space
    #[arg(short, long, value_parser = parse_space, default_value = "rgb")]
    space: InterpolationSpace,
}

#[derive(Debug, Serialize)]
pub struct MixReport {
    from: Color,
    to: Color,
    amount: f64,
    space: InterpolationSpace,
    result: Color,
}

impl fmt::Display for MixReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {} at {:.3} in {} = {}",
            self.from, self.to, self.amount, self.space, self.result
        )
    }
}

pub fn mix(args: &MixArgs, ctx: &Context) -> Result<()> {
    ctx.emit(&MixReport {
        from: args.from,
        to: args.to,
        amount: args.amount,
        space: args.space,
        result: ctx.cache.interpolate(args.from, args.to, args.amount, args.space),
    })
}

// ─── Tests ──────────────────────────────────────────────────────────────────
