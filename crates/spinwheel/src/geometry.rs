//! Sector geometry for the wheel.
//!
//! The wheel is split into `N` equal sectors, one per participant. Sector `i`
//! covers `[i * 360/N, (i + 1) * 360/N)` degrees measured from the pointer
//! axis. The same [`SectorLayout`] is used to draw the wheel and to resolve
//! the winner, so what is drawn and what is resolved cannot drift apart.
//!
//! # Example
//!
//! ```rust
//! use spinwheel::{Palette, SectorLayout, DEFAULT_DARKEN};
//!
//! let layout = SectorLayout::new(4);
//! assert_eq!(layout.span(), 90.0);
//! assert_eq!(layout.index_at(180.0), Some(2));
//! assert_eq!(layout.index_at(-90.0), Some(3));
//!
//! let sectors = layout.sectors(&Palette::default(), DEFAULT_DARKEN);
//! assert_eq!(sectors.len(), 4);
//! assert_eq!(sectors[1].start_deg, 90.0);
//! ```

use std::fmt;

use crate::error::GeometryError;

/// Degrees in a full turn.
pub const FULL_TURN: f64 = 360.0;

/// Amount each palette channel is darkened by before drawing.
pub const DEFAULT_DARKEN: u8 = 30;

/// The reference palette, cycled when there are more sectors than colors.
const DEFAULT_PALETTE: [Rgb; 23] = [
    Rgb::new(0xCC, 0x46, 0x29),
    Rgb::new(0xCC, 0x9A, 0x29),
    Rgb::new(0xB2, 0xCC, 0x29),
    Rgb::new(0x5E, 0xCC, 0x29),
    Rgb::new(0x29, 0xCC, 0x46),
    Rgb::new(0x29, 0xCC, 0x99),
    Rgb::new(0x29, 0x85, 0xCC),
    Rgb::new(0x29, 0x3F, 0xCC),
    Rgb::new(0x46, 0x29, 0xCC),
    Rgb::new(0x99, 0x29, 0xCC),
    Rgb::new(0xCC, 0x29, 0x81),
    Rgb::new(0xCC, 0x29, 0x29),
    Rgb::new(0xCC, 0x59, 0x29),
    Rgb::new(0xCC, 0x95, 0x29),
    Rgb::new(0xB2, 0xCC, 0x29),
    Rgb::new(0x66, 0xCC, 0x29),
    Rgb::new(0x29, 0xCC, 0x5F),
    Rgb::new(0x29, 0xCC, 0x91),
    Rgb::new(0x29, 0x8E, 0xCC),
    Rgb::new(0x4A, 0x29, 0xCC),
    Rgb::new(0x84, 0x29, 0xCC),
    Rgb::new(0xCC, 0x29, 0x8F),
    Rgb::new(0xCC, 0x29, 0x4F),
];

/// Normalizes an angle in degrees into `[0, 360)`.
///
/// Equivalent to `((a mod 360) + 360) mod 360`. Tiny negative inputs can round
/// up to exactly `360.0` in floating point; those are folded back to `0.0`.
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let norm = degrees.rem_euclid(FULL_TURN);
    if norm >= FULL_TURN { 0.0 } else { norm }
}

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` or `#RGB` (the leading `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidColor`] if the string is not a hex color.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spinwheel::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#CC4629").unwrap(), Rgb::new(0xCC, 0x46, 0x29));
    /// assert_eq!(Rgb::from_hex("fff").unwrap(), Rgb::new(255, 255, 255));
    /// assert!(Rgb::from_hex("#12345").is_err());
    /// ```
    pub fn from_hex(s: &str) -> Result<Self, GeometryError> {
        let raw = s.trim();
        let hex = raw.strip_prefix('#').unwrap_or(raw);
        let invalid = || GeometryError::InvalidColor(raw.to_string());

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };

        match hex.len() {
            6 => Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            3 => Ok(Self::new(
                channel(0..1)? * 17,
                channel(1..2)? * 17,
                channel(2..3)? * 17,
            )),
            _ => Err(invalid()),
        }
    }

    /// Formats the color as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Subtracts `amount` from every channel, clamping at zero.
    pub const fn darken(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A non-empty list of colors assigned to sectors cyclically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Creates a palette from a list of colors.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyPalette`] if `colors` is empty.
    pub fn new(colors: Vec<Rgb>) -> Result<Self, GeometryError> {
        if colors.is_empty() {
            return Err(GeometryError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Parses a palette from hex strings.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry is not a hex color or the list is empty.
    pub fn from_hex_list<S: AsRef<str>>(list: &[S]) -> Result<Self, GeometryError> {
        let colors = list
            .iter()
            .map(|s| Rgb::from_hex(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Color for sector `index`, cycling through the palette.
    pub fn color(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; a palette holds at least one color.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The palette entries in order.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.to_vec(),
        }
    }
}

/// One drawn slice of the wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sector {
    /// Position in the participant list.
    pub index: usize,
    /// Inclusive start angle in degrees.
    pub start_deg: f64,
    /// Exclusive end angle in degrees.
    pub end_deg: f64,
    /// Fill color, already darkened.
    pub color: Rgb,
}

impl Sector {
    /// Angle halfway through the sector, where renderers anchor the label.
    pub fn mid_deg(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }

    /// Whether the (normalized) angle falls inside this sector.
    pub fn contains(&self, degrees: f64) -> bool {
        let norm = normalize_degrees(degrees);
        norm >= self.start_deg && norm < self.end_deg
    }
}

/// Equal partition of the wheel into `count` sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorLayout {
    count: usize,
}

impl SectorLayout {
    /// Creates a layout for `count` sectors. A zero count is allowed and has
    /// no sectors.
    pub const fn new(count: usize) -> Self {
        Self { count }
    }

    /// Number of sectors.
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Whether the layout has no sectors.
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Angular width of one sector in degrees (`0.0` when empty).
    #[allow(clippy::cast_precision_loss)]
    pub fn span(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            FULL_TURN / self.count as f64
        }
    }

    /// `(start, end)` angles of sector `index`.
    #[allow(clippy::cast_precision_loss)]
    pub fn bounds(&self, index: usize) -> Option<(f64, f64)> {
        if index >= self.count {
            return None;
        }
        let span = self.span();
        Some((index as f64 * span, (index + 1) as f64 * span))
    }

    /// Index of the sector under the pointer when the wheel sits at `degrees`.
    ///
    /// The angle is normalized into `[0, 360)` first and the result is clamped
    /// to `[0, N-1]` so exact boundaries never fall off the end.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn index_at(&self, degrees: f64) -> Option<usize> {
        if self.count == 0 || !degrees.is_finite() {
            return None;
        }
        let norm = normalize_degrees(degrees);
        let raw = (norm / self.span()).floor().max(0.0) as usize;
        Some(raw.min(self.count - 1))
    }

    /// Builds every sector with its palette color darkened by `darken`.
    pub fn sectors(&self, palette: &Palette, darken: u8) -> Vec<Sector> {
        (0..self.count)
            .filter_map(|index| {
                let (start_deg, end_deg) = self.bounds(index)?;
                Some(Sector {
                    index,
                    start_deg,
                    end_deg,
                    color: palette.color(index).darken(darken),
                })
            })
            .collect()
    }
}
