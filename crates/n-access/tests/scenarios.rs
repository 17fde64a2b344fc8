//! End-to-end scenarios through the public API of n-color and n-access.

use std::sync::Arc;

use n_access::{
    AccessibilityEnhancer, AccessiblePaletteGenerator, AdjustmentStrategy, ContrastChecker,
    EnhancerConfig, PaletteConfig, SuggestionEngine, WcagLevel, evaluate, is_similar_hsl,
};
use n_color::{Cmyk, Color, ConversionCache};
use pretty_assertions::assert_eq;

fn isolated_checker() -> ContrastChecker {
    ContrastChecker::new(Arc::new(ConversionCache::new()))
}

fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

/// A coarse grid over the RGB cube, including both extremes.
fn sample_colors() -> Vec<Color> {
    let steps = [0u8, 51, 119, 180, 255];
    let mut colors = Vec::new();
    for r in steps {
        for g in steps {
            for b in steps {
                colors.push(Color::rgb8(r, g, b));
            }
        }
    }
    colors
}

// ── Concrete scenarios ──────────────────────────────────────────────

#[test]
fn test_black_on_white_is_maximum_contrast() {
    let result = evaluate(Color::rgb8(0, 0, 0), Color::rgb8(255, 255, 255));
    assert!(approx_eq(result.contrast_ratio(), 21.0, 0.01));
    assert!(result.passes_aaa());
}

#[test]
fn test_blue_hex_to_hsl() {
    let hsl = Color::hex("#0000FF").unwrap().to_hsl();
    assert!(approx_eq(hsl.hue, 2.0 / 3.0, 1e-3));
    assert!(approx_eq(hsl.saturation, 1.0, 1e-9));
    assert!(approx_eq(hsl.lightness, 0.5, 1e-9));
}

#[test]
fn test_suggest_darker_gray_on_white() {
    let engine = SuggestionEngine::new(isolated_checker());
    let target = Color::rgb8(200, 200, 200);
    let out = engine.suggest(Color::WHITE, target, WcagLevel::Aa, true);

    assert_eq!(out.len(), 1);
    let gray = out[0];
    let [r, g, b, _] = gray.to_rgba();
    assert!(approx_eq(r, g, 1e-9) && approx_eq(g, b, 1e-9), "not gray: {gray}");
    assert!(gray.luminance() < target.luminance());
    assert!(gray.contrast_ratio(Color::WHITE) >= 4.5);
}

#[test]
fn test_blue_palette_of_five() {
    let generator = AccessiblePaletteGenerator::new(PaletteConfig::default())
        .unwrap()
        .with_checker(isolated_checker());

    for rng_seed in 0..20 {
        let palette = generator.generate_palette_seeded(Color::BLUE, rng_seed);
        assert_eq!(palette.len(), 5, "seed {rng_seed}: {palette:?}");
        assert!(palette.contains(&Color::BLUE));
        assert!(palette.contains(&Color::BLACK));
        assert!(palette.contains(&Color::WHITE));
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert!(!is_similar_hsl(*a, *b), "{a} ~ {b}");
            }
        }
    }
}

#[test]
fn test_cmyk_round_trip_for_red() {
    let cmyk = Color::rgb8(255, 0, 0).to_cmyk();
    assert!(approx_eq(cmyk.cyan, 0.0, 1e-9));
    assert!(approx_eq(cmyk.magenta, 1.0, 1e-9));
    assert!(approx_eq(cmyk.yellow, 1.0, 1e-9));
    assert!(approx_eq(cmyk.key, 0.0, 1e-9));

    let back = Color::from_cmyk(Cmyk::new(0.0, 1.0, 1.0, 0.0));
    assert_eq!(back.to_rgb8(), (255, 0, 0));
}

#[test]
fn test_ocean_theme_accent_is_complementary() {
    let generator = AccessiblePaletteGenerator::default().with_checker(isolated_checker());
    let theme = generator.generate_theme(Color::BLUE, "Ocean");
    let expected = (Color::BLUE.to_hsl().hue + 0.5).rem_euclid(1.0);
    assert!(approx_eq(theme.accent.base.to_hsl().hue, expected, 1e-3));
    assert_eq!(theme.name, "Ocean");
}

// ── Properties ──────────────────────────────────────────────────────

#[test]
fn test_hsl_and_lab_round_trip() {
    for c in sample_colors() {
        let via_hsl = Color::from_hsl(c.to_hsl());
        let via_lab = Color::from_lab(c.to_lab());
        for ((x, h), l) in c.to_rgba().iter().zip(via_hsl.to_rgba()).zip(via_lab.to_rgba()) {
            assert!(approx_eq(*x, h, 1e-2), "hsl {c} -> {via_hsl}");
            assert!(approx_eq(*x, l, 1e-2), "lab {c} -> {via_lab}");
        }
    }
}

#[test]
fn test_contrast_symmetric_and_bounded() {
    let checker = isolated_checker();
    let colors = sample_colors();
    for &a in colors.iter().step_by(7) {
        for &b in colors.iter().step_by(5) {
            let ab = checker.contrast_ratio(a, b);
            assert!(approx_eq(ab, checker.contrast_ratio(b, a), 1e-12));
            assert!((1.0..=21.0 + 1e-9).contains(&ab), "{a} / {b}: {ab}");
        }
        assert!(approx_eq(checker.contrast_ratio(a, a), 1.0, 1e-12));
    }
}

#[test]
fn test_suggest_is_idempotent_on_compliant_pairs() {
    let engine = SuggestionEngine::new(isolated_checker());
    let colors = sample_colors();
    for &base in colors.iter().step_by(11) {
        for &target in colors.iter().step_by(3) {
            for level in WcagLevel::ALL {
                if evaluate(base, target).passes_level(level) {
                    for preserve in [true, false] {
                        assert_eq!(engine.suggest(base, target, level, preserve), vec![target]);
                    }
                }
            }
        }
    }
}

#[test]
fn test_enhancer_result_is_always_safe() {
    let checker = isolated_checker();
    let colors = sample_colors();
    for level in WcagLevel::ALL {
        for strategy in AdjustmentStrategy::ALL {
            let enhancer = AccessibilityEnhancer::new(EnhancerConfig {
                target_level: level,
                strategy,
                ..EnhancerConfig::default()
            })
            .unwrap()
            .with_checker(checker.clone());

            for &background in colors.iter().step_by(13) {
                for &color in colors.iter().step_by(9) {
                    let out = enhancer.enhance(color, background);
                    let ok = evaluate(background, out).passes_level(level)
                        || out == Color::BLACK
                        || out == Color::WHITE;
                    assert!(ok, "{strategy} {color} on {background} at {level} gave {out}");
                }
            }
        }
    }
}

#[test]
fn test_hex_round_trip_uppercases() {
    for input in ["#1a2b3c", "#ABCDEF", "#00ff7f80", "#FFFFFFFF"] {
        let color = Color::hex(input).unwrap();
        let mut expected = input.to_uppercase();
        if expected.len() == 7 {
            expected.push_str("FF");
        }
        assert_eq!(color.to_hex(), expected);
    }
}

#[test]
fn test_malformed_hex_is_none() {
    for input in ["", "#12345", "#1234567", "#GGGGGG", "red"] {
        assert!(Color::hex(input).is_none(), "{input}");
    }
}

// ── Shared state ────────────────────────────────────────────────────

#[test]
fn test_injected_cache_is_isolated() {
    let cache = Arc::new(ConversionCache::new());
    let checker = ContrastChecker::new(Arc::clone(&cache));
    let _ = checker.evaluate(Color::RED, Color::WHITE);
    let _ = checker.evaluate(Color::WHITE, Color::RED);

    // First pair: the ratio and both luminances miss. Reversed pair: one hit.
    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 3);
    assert_eq!(ConversionCache::shared().capacity(), cache.capacity());
}

#[test]
fn test_palettes_from_many_threads() {
    let generator = AccessiblePaletteGenerator::default();
    std::thread::scope(|scope| {
        for t in 0..4u64 {
            let generator = &generator;
            scope.spawn(move || {
                for i in 0..10 {
                    let seed = Color::rgb8(30, 90, 160);
                    let palette = generator.generate_palette_seeded(seed, t * 10 + i);
                    assert!(!palette.is_empty());
                }
            });
        }
    });
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_configs_deserialize_with_defaults() {
    let enhancer: EnhancerConfig =
        serde_json::from_str(r#"{"target_level": "aaa-large", "strategy": "minimum-change"}"#)
            .unwrap();
    assert_eq!(enhancer.target_level, WcagLevel::AaaLarge);
    assert_eq!(enhancer.strategy, AdjustmentStrategy::MinimumChange);
    assert_eq!(enhancer.max_perceptual_distance, 30.0);

    let palette: PaletteConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(palette, PaletteConfig::default());
}

#[test]
fn test_color_serializes_as_hex() {
    let json = serde_json::to_string(&Color::RED).unwrap();
    assert_eq!(json, r##""#FF0000FF""##);
    let back: Color = serde_json::from_str(r#""rgb(255, 0, 0)""#).unwrap();
    assert_eq!(back, Color::RED);
}
