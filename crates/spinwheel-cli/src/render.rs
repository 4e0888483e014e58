//! Plain-text rendering of the wheel.
//!
//! The terminal cannot draw a disk, so the wheel is shown as a sector table
//! and, while spinning, a single status line naming the sector under the
//! pointer. Sector names are painted in their (darkened) sector color.

use colored::Colorize;
use roster::capitalize;
use spinwheel::{Palette, Rgb, Sector, SectorLayout, SpinEngine, Winner};

/// Width of the progress bar in the status line.
const BAR_WIDTH: usize = 20;

/// Renders wheel state as text.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    palette: Palette,
    darken: u8,
    color: bool,
}

impl TextRenderer {
    /// Creates a renderer. With `color` off every string is plain.
    #[must_use]
    pub const fn new(palette: Palette, darken: u8, color: bool) -> Self {
        Self {
            palette,
            darken,
            color,
        }
    }

    /// The sectors for `count` participants, as drawn.
    #[must_use]
    pub fn sectors(&self, count: usize) -> Vec<Sector> {
        SectorLayout::new(count).sectors(&self.palette, self.darken)
    }

    fn paint(&self, text: &str, rgb: Rgb) -> String {
        if self.color {
            text.truecolor(rgb.r, rgb.g, rgb.b).bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// One line per sector: index, angular span, color, name.
    #[must_use]
    pub fn sector_table(&self, names: &[String]) -> String {
        if names.is_empty() {
            return "(no participants)".to_string();
        }
        self.sectors(names.len())
            .iter()
            .zip(names)
            .map(|(sector, name)| {
                format!(
                    "{:>3}  {:>7.2}° – {:>7.2}°  {}  {}",
                    sector.index,
                    sector.start_deg,
                    sector.end_deg,
                    sector.color,
                    self.paint(&capitalize(name), sector.color),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The live line shown while the wheel turns.
    #[must_use]
    pub fn status_line<R>(&self, engine: &SpinEngine<R>, names: &[String]) -> String {
        let progress = engine.progress();
        let pointer = engine
            .sector_under_pointer(names.len())
            .map_or_else(String::new, |index| {
                let name = capitalize(&names[index]);
                self.paint(&name, self.palette.color(index).darken(self.darken))
            });

        format!(
            "▶ {pointer:<20} {:>9.1}°  [{}]  {:>3.0}%",
            engine.rotation(),
            progress_bar(progress),
            progress * 100.0,
        )
    }

    /// The winner announcement.
    #[must_use]
    pub fn announcement(&self, winner: &Winner) -> String {
        let color = self.palette.color(winner.index).darken(self.darken);
        format!(
            "Congratulations! {} is the winner!",
            self.paint(&capitalize(&winner.name), color)
        )
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn progress_bar(progress: f64) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinwheel::SpinConfig;

    fn names() -> Vec<String> {
        ["ann", "bo", "cat", "dee"].map(String::from).to_vec()
    }

    fn plain() -> TextRenderer {
        TextRenderer::new(Palette::default(), 30, false)
    }

    #[test]
    fn sector_table_lists_every_sector() {
        let table = plain().sector_table(&names());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("0.00°"));
        assert!(lines[0].contains("#ae280b"));
        assert!(lines[2].ends_with("Cat"));
    }

    #[test]
    fn empty_table() {
        assert_eq!(plain().sector_table(&[]), "(no participants)");
    }

    #[test]
    fn announcement_capitalizes() {
        let winner = Winner {
            index: 1,
            name: "bo".into(),
        };
        assert_eq!(
            plain().announcement(&winner),
            "Congratulations! Bo is the winner!"
        );
    }

    #[test]
    fn status_line_shows_pointer_and_progress() {
        let mut engine = SpinEngine::with_seed(SpinConfig::default(), 5).unwrap();
        let names = names();
        engine.start_spin_with_turns(&names, 5.5).unwrap();
        engine.tick(std::time::Duration::from_secs(6));

        let line = plain().status_line(&engine, &names);
        assert!(line.contains("Cat"));
        assert!(line.contains("-1980.0°"));
        assert!(line.contains("100%"));
        assert!(line.contains(&"#".repeat(BAR_WIDTH)));
    }

    #[test]
    fn progress_bar_bounds() {
        assert_eq!(progress_bar(0.0), ".".repeat(BAR_WIDTH));
        assert_eq!(progress_bar(2.0), "#".repeat(BAR_WIDTH));
        assert_eq!(progress_bar(0.5).matches('#').count(), BAR_WIDTH / 2);
    }
}
