//! Category color families and period-based shading.
//!
//! Each category owns one hue. Within it, a discipline's shade encodes when it is taught: the
//! later the semester mentioned in its period, the lighter the shade.

use regex::Regex;
use rpdgraph_core::Category;

pub const SHADE_COUNT: usize = 7;
pub const DEFAULT_SHADE_DIVISOR: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorFamily {
    pub primary: &'static str,
    pub light: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    /// Darkest to lightest.
    pub shades: [&'static str; SHADE_COUNT],
}

impl ColorFamily {
    /// The shade at `index`, clamped to the lightest one.
    pub fn shade(&self, index: usize) -> &'static str {
        self.shades[index.min(SHADE_COUNT - 1)]
    }

    /// Text color readable on top of `shade(index)`.
    pub fn text_on_shade(&self, index: usize) -> &'static str {
        if index >= SHADE_COUNT - 2 {
            self.text
        } else {
            "#ffffff"
        }
    }
}

pub const TECHNICAL: ColorFamily = ColorFamily {
    primary: "#2563eb",
    light: "#eff6ff",
    border: "#93c5fd",
    text: "#1e3a8a",
    shades: [
        "#1e3a8a", "#1e40af", "#1d4ed8", "#2563eb", "#3b82f6", "#60a5fa", "#93c5fd",
    ],
};

pub const HUMANITARIAN: ColorFamily = ColorFamily {
    primary: "#ea580c",
    light: "#fff7ed",
    border: "#fdba74",
    text: "#7c2d12",
    shades: [
        "#7c2d12", "#9a3412", "#c2410c", "#ea580c", "#f97316", "#fb923c", "#fdba74",
    ],
};

pub const NATURAL_SCIENCE: ColorFamily = ColorFamily {
    primary: "#16a34a",
    light: "#f0fdf4",
    border: "#86efac",
    text: "#14532d",
    shades: [
        "#14532d", "#166534", "#15803d", "#16a34a", "#22c55e", "#4ade80", "#86efac",
    ],
};

pub fn colors_for(category: Category) -> &'static ColorFamily {
    match category {
        Category::Technical => &TECHNICAL,
        Category::Humanitarian => &HUMANITARIAN,
        Category::NaturalScience => &NATURAL_SCIENCE,
    }
}

/// Like [`colors_for`], for a raw category tag. Unknown tags get the technical family.
pub fn colors_for_tag(tag: Option<&str>) -> &'static ColorFamily {
    colors_for(tag.map(Category::from_tag).unwrap_or_default())
}

fn digits_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+").expect("valid regex"))
}

/// Largest integer mentioned in `period`, if any.
pub fn latest_semester(period: &str) -> Option<u64> {
    digits_regex()
        .find_iter(period)
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .max()
}

/// Shade index for a discipline taught in `period`, using the default divisor.
pub fn shade_index_for(period: &str, shade_count: usize) -> usize {
    shade_index_with_divisor(period, shade_count, DEFAULT_SHADE_DIVISOR)
}

/// Maps the latest semester `m` found in `period` to
/// `clamp(shade_count - 1 - floor((m - 1) / divisor), 0, shade_count - 1)`.
///
/// Periods without digits get the middle index `shade_count / 2`. A zero `shade_count` yields 0,
/// and a non-positive or non-finite divisor falls back to the default.
pub fn shade_index_with_divisor(period: &str, shade_count: usize, divisor: f64) -> usize {
    if shade_count == 0 {
        return 0;
    }
    let last = shade_count - 1;
    let Some(latest) = latest_semester(period) else {
        return shade_count / 2;
    };
    let divisor = if divisor.is_finite() && divisor > 0.0 {
        divisor
    } else {
        DEFAULT_SHADE_DIVISOR
    };
    let step = ((latest as f64 - 1.0) / divisor).floor();
    let index = last as f64 - step;
    index.clamp(0.0, last as f64) as usize
}
