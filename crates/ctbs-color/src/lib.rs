// SPDX-License-Identifier: MIT
//
// ctbs-color — the color primitives every other ctbs crate builds on.
//
// Colors live as 8-bit sRGB triplets because that is what ends up in the
// stylesheet: a `#rrggbb` value and its `r, g, b` companion. Every
// adjustment the theme engine makes (lighten, darken, desaturate, hue
// shift) happens in HSL and is rounded straight back to 8-bit, so what the
// engine measures is exactly what the browser renders.
//
// Conversion pipeline:
//
//   #rrggbb ↔ Color (u8 × 3) ↔ Hsl (degrees, percent, percent)
//                 │
//                 └──→ linear sRGB (for WCAG luminance, see ctbs-theme)

pub mod color;
pub mod hsl;

pub use color::Color;
pub use hsl::Hsl;
