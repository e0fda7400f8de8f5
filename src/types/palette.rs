//! Palette type and nearest-colour lookup.

use crate::error::{PixelateError, Result};

use super::Colour;

/// An ordered set of representative colours.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colours: Vec<Colour>,
}

impl Palette {
    pub fn new(colours: Vec<Colour>) -> Self {
        Self { colours }
    }

    /// Parse a comma-separated hex list into a fixed palette.
    pub fn from_hex_list(s: &str) -> Result<Self> {
        let colours = Colour::parse_list(s)?;
        if colours.is_empty() {
            return Err(PixelateError::Parse {
                message: "Palette must contain at least one colour".to_string(),
                help: Some("Pass a list like \"#000000,#ffffff\"".to_string()),
            });
        }
        Ok(Self::new(colours))
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Colour> {
        self.colours.iter()
    }

    pub fn contains(&self, colour: Colour) -> bool {
        self.colours.contains(&colour)
    }

    /// Index of the nearest palette entry by Euclidean RGB distance.
    ///
    /// Scans in order and only replaces on a strictly smaller distance, so
    /// ties resolve to the lowest index.
    pub fn nearest_index(&self, colour: Colour) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (i, candidate) in self.colours.iter().enumerate() {
            let dist = colour.distance_squared(*candidate);
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((i, dist)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Nearest palette entry; an empty palette leaves the colour unchanged.
    pub fn nearest(&self, colour: Colour) -> Colour {
        self.nearest_index(colour)
            .map_or(colour, |i| self.colours[i])
    }
}

impl From<Vec<Colour>> for Palette {
    fn from(colours: Vec<Colour>) -> Self {
        Self::new(colours)
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Colour;
    type IntoIter = std::slice::Iter<'a, Colour>;

    fn into_iter(self) -> Self::IntoIter {
        self.colours.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_exact_match() {
        let palette = Palette::new(vec![Colour::BLACK, Colour::WHITE]);
        assert_eq!(palette.nearest(Colour::WHITE), Colour::WHITE);
        assert_eq!(palette.nearest(Colour::rgb(10, 10, 10)), Colour::BLACK);
        assert_eq!(palette.nearest(Colour::rgb(200, 180, 250)), Colour::WHITE);
    }

    #[test]
    fn test_nearest_tie_prefers_first() {
        let palette = Palette::new(vec![Colour::rgb(0, 0, 0), Colour::rgb(20, 0, 0)]);
        assert_eq!(palette.nearest_index(Colour::rgb(10, 0, 0)), Some(0));

        let reversed = Palette::new(vec![Colour::rgb(20, 0, 0), Colour::rgb(0, 0, 0)]);
        assert_eq!(reversed.nearest_index(Colour::rgb(10, 0, 0)), Some(0));
    }

    #[test]
    fn test_nearest_empty_palette() {
        let palette = Palette::default();
        assert_eq!(palette.nearest_index(Colour::WHITE), None);
        assert_eq!(palette.nearest(Colour::rgb(1, 2, 3)), Colour::rgb(1, 2, 3));
    }

    #[test]
    fn test_from_hex_list() {
        let palette = Palette::from_hex_list("#000, #fff").unwrap();
        assert_eq!(palette.colours(), &[Colour::BLACK, Colour::WHITE]);
        assert!(Palette::from_hex_list(" , ").is_err());
    }
}
