//! Texture catalog used to seed endpoint colors.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{GradientError, Result};

/// A texture with its precomputed average CIE LCH color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureEntry {
    pub id: String,
    #[serde(rename = "averageColor", alias = "average_color")]
    pub average_color: [f64; 3],
}

impl TextureEntry {
    pub fn color(&self) -> Color {
        let [l, c, h] = self.average_color;
        Color::from_lch(l, c, h)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureCatalog {
    entries: Vec<TextureEntry>,
}

impl TextureCatalog {
    pub fn new(entries: Vec<TextureEntry>) -> Self {
        Self { entries }
    }

    /// Parse a JSON array of `{ "id": ..., "averageColor": [l, c, h] }`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GradientError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&text)?;
        tracing::debug!("Loaded {} textures from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pick two distinct entries uniformly at random.
    pub fn pick_random_pair<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(&TextureEntry, &TextureEntry)> {
        let count = self.entries.len();
        if count < 2 {
            return Err(GradientError::NotEnoughTextures { count });
        }
        let first = rng.gen_range(0..count);
        let mut second = rng.gen_range(0..count - 1);
        if second >= first {
            second += 1;
        }
        Ok((&self.entries[first], &self.entries[second]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const CATALOG: &str = r#"[
        {"id": "block/stone.png", "averageColor": [52.0, 0.5, 90.0]},
        {"id": "block/grass.png", "averageColor": [48.0, 40.0, 130.0]},
        {"id": "block/brick.png", "average_color": [40.0, 30.0, 35.0]}
    ]"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = TextureCatalog::from_json_str(CATALOG).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.entries()[2].average_color, [40.0, 30.0, 35.0]);
    }

    #[test]
    fn test_pairs_are_distinct() {
        let catalog = TextureCatalog::from_json_str(CATALOG).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let (a, z) = catalog.pick_random_pair(&mut rng).unwrap();
            assert_ne!(a.id, z.id);
        }
    }

    #[test]
    fn test_too_small_catalog() {
        let catalog = TextureCatalog::new(vec![TextureEntry {
            id: "only".into(),
            average_color: [50.0, 0.0, 0.0],
        }]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            catalog.pick_random_pair(&mut rng),
            Err(GradientError::NotEnoughTextures { count: 1 })
        ));
    }

    #[test]
    fn test_malformed_catalog() {
        assert!(matches!(
            TextureCatalog::from_json_str("{not json"),
            Err(GradientError::Json(_))
        ));
    }
}
