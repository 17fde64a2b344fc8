// SPDX-License-Identifier: MIT
//
// Memoization for the expensive color conversions.
//
// The cache is purely a performance layer: a miss always falls through to
// the real computation in `space`/`blend`, and querying twice with the
// same quantized inputs returns the same value. Each sub-cache is an
// independent LRU behind its own mutex, so concurrent callers never
// corrupt state. Two threads racing on the same key may both compute and
// both insert, which is harmless.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex};

use lru::LruCache;
use tracing::trace;

use crate::blend::{self, BlendMode, InterpolationSpace};
use crate::color::Color;
use crate::space::{Hsl, Lab};

/// Default capacity of each sub-cache.
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(n) => n,
    None => unreachable!(),
};

static SHARED: LazyLock<Arc<ConversionCache>> =
    LazyLock::new(|| Arc::new(ConversionCache::new()));

/// Hit/miss counters and current entry count across all sub-caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Thread-safe memo tables for HSL, LAB, luminance, contrast, blend and
/// interpolation results.
///
/// Construct one explicitly and share it with `Arc`, or use
/// [`ConversionCache::shared`] for the lazily created process-wide instance.
pub struct ConversionCache {
    hsl: Mutex<LruCache<String, Hsl>>,
    lab: Mutex<LruCache<String, Lab>>,
    luminance: Mutex<LruCache<String, f64>>,
    contrast: Mutex<LruCache<String, f64>>,
    blend: Mutex<LruCache<String, Color>>,
    interpolate: Mutex<LruCache<String, Color>>,
    capacity: NonZeroUsize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ConversionCache {
    /// A cache with [`DEFAULT_CAPACITY`] entries per sub-cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A cache with `capacity` entries per sub-cache.
    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            hsl: table(capacity),
            lab: table(capacity),
            luminance: table(capacity),
            contrast: table(capacity),
            blend: table(capacity),
            interpolate: table(capacity),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// The process-wide instance, created on first use.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Per-sub-cache capacity.
    #[must_use]
    pub const fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    // ─── Memoized Operations ─────────────────────────────────────────────

    /// Memoized [`Color::to_hsl`].
    pub fn hsl(&self, color: Color) -> Hsl {
        memoize(&self.hsl, "hsl", color_key(color), &self.hits, &self.misses, || {
            color.to_hsl()
        })
    }

    /// Memoized [`Color::to_lab`].
    pub fn lab(&self, color: Color) -> Lab {
        memoize(&self.lab, "lab", color_key(color), &self.hits, &self.misses, || {
            color.to_lab()
        })
    }

    /// Memoized [`Color::luminance`].
    pub fn luminance(&self, color: Color) -> f64 {
        memoize(
            &self.luminance,
            "luminance",
            color_key(color),
            &self.hits,
            &self.misses,
            || color.luminance(),
        )
    }

    /// Memoized [`Color::contrast_ratio`]. The key is order-independent.
    pub fn contrast_ratio(&self, a: Color, b: Color) -> f64 {
        let (ka, kb) = (color_key(a), color_key(b));
        let key = if ka <= kb {
            format!("{ka}|{kb}")
        } else {
            format!("{kb}|{ka}")
        };
        memoize(&self.contrast, "contrast", key, &self.hits, &self.misses, || {
            crate::space::contrast_ratio(self.luminance(a), self.luminance(b))
        })
    }

    /// Memoized [`blend::blend`]. The key is order-dependent.
    pub fn blend(&self, base: Color, top: Color, mode: BlendMode) -> Color {
        let key = format!("{}|{}|{}", color_key(base), color_key(top), mode.name());
        memoize(&self.blend, "blend", key, &self.hits, &self.misses, || {
            blend::blend(base, top, mode)
        })
    }

    /// Memoized [`blend::interpolate`].
    ///
    /// `amount` is rounded to three decimals before keying, and the rounded
    /// value is what gets computed, so equal keys always map to equal colors.
    pub fn interpolate(
        &self,
        a: Color,
        b: Color,
        amount: f64,
        space: InterpolationSpace,
    ) -> Color {
        let amount = (amount * 1000.0).round() / 1000.0;
        let key = format!(
            "{}|{}|{amount:.3}|{}",
            color_key(a),
            color_key(b),
            space.name()
        );
        memoize(&self.interpolate, "interpolate", key, &self.hits, &self.misses, || {
            blend::interpolate(a, b, amount, space)
        })
    }

    // ─── Maintenance ─────────────────────────────────────────────────────

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        clear_table(&self.hsl);
        clear_table(&self.lab);
        clear_table(&self.luminance);
        clear_table(&self.contrast);
        clear_table(&self.blend);
        clear_table(&self.interpolate);
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Current counters and total entry count.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: table_len(&self.hsl)
                + table_len(&self.lab)
                + table_len(&self.luminance)
                + table_len(&self.contrast)
                + table_len(&self.blend)
                + table_len(&self.interpolate),
        }
    }
}

impl Default for ConversionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConversionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionCache")
            .field("capacity", &self.capacity)
            .field("stats", &self.stats())
            .finish()
    }
}

// ─── Internals ───────────────────────────────────────────────────────────────

/// An empty table bounded at `capacity`. Storage grows on insert.
fn table<V>(capacity: NonZeroUsize) -> Mutex<LruCache<String, V>> {
    let mut cache = LruCache::unbounded();
    cache.resize(capacity);
    Mutex::new(cache)
}

/// Canonical key: every channel rounded to six decimals.
fn color_key(color: Color) -> String {
    let [r, g, b, a] = color.to_rgba();
    format!("{r:.6},{g:.6},{b:.6},{a:.6}")
}

/// Look up `key`, computing and inserting on a miss.
///
/// The lock is not held while computing. A poisoned lock is treated as a
/// miss so a panic elsewhere never takes the color math down with it.
fn memoize<V: Copy>(
    table: &Mutex<LruCache<String, V>>,
    name: &'static str,
    key: String,
    hits: &AtomicU64,
    misses: &AtomicU64,
    compute: impl FnOnce() -> V,
) -> V {
    if let Ok(mut table) = table.lock() {
        if let Some(value) = table.get(key.as_str()) {
            hits.fetch_add(1, Ordering::Relaxed);
            return *value;
        }
    }

    misses.fetch_add(1, Ordering::Relaxed);
    let value = compute();

    if let Ok(mut table) = table.lock() {
        if let Some((displaced, _)) = table.push(key, value) {
            trace!(cache = name, key = %displaced, "conversion cache: displaced entry");
        }
    }

    value
}

fn clear_table<V>(table: &Mutex<LruCache<String, V>>) {
    if let Ok(mut table) = table.lock() {
        table.clear();
    }
}

fn table_len<V>(table: &Mutex<LruCache<String, V>>) -> usize {
    table.lock().map_or(0, |t| t.len())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
