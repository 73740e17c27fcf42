//! Style pool for deduplication

use super::Style;
use ahash::AHashMap;

/// Deduplicating store of cell styles
///
/// Cells reference styles by index; index 0 is always the default style.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<Style>", into = "Vec<Style>"))]
pub struct StylePool {
    styles: Vec<Style>,
    index_map: AHashMap<u64, u32>,
}

fn style_key(style: &Style) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = ahash::AHasher::default();
    style.hash(&mut hasher);
    hasher.finish()
}

impl StylePool {
    /// Create a new style pool with default style at index 0
    pub fn new() -> Self {
        let default = Style::default();
        let mut index_map = AHashMap::with_capacity(16);
        index_map.insert(style_key(&default), 0);
        Self {
            styles: vec![default],
            index_map,
        }
    }

    /// Get or create a style, returning its index
    pub fn get_or_insert(&mut self, style: Style) -> u32 {
        let key = style_key(&style);

        if let Some(&idx) = self.index_map.get(&key) {
            if self.styles[idx as usize] == style {
                return idx;
            }
        }

        let idx = self.styles.len() as u32;
        self.index_map.insert(key, idx);
        self.styles.push(style);
        idx
    }

    /// Get a style by index
    pub fn get(&self, index: u32) -> Option<&Style> {
        self.styles.get(index as usize)
    }

    /// Get the default style (index 0)
    pub fn default_style(&self) -> &Style {
        &self.styles[0]
    }

    /// Replace the default style; cells at index 0 follow the new default
    pub fn set_default_style(&mut self, style: Style) {
        let old = style_key(&self.styles[0]);
        if self.index_map.get(&old) == Some(&0) {
            self.index_map.remove(&old);
        }
        self.index_map.insert(style_key(&style), 0);
        self.styles[0] = style;
    }

    /// Get the number of styles, including the default
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the pool only holds the default style
    pub fn is_empty(&self) -> bool {
        self.styles.len() <= 1
    }
}

impl Default for StylePool {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Style>> for StylePool {
    fn from(styles: Vec<Style>) -> Self {
        let mut styles = styles.into_iter();
        let mut pool = StylePool::new();
        if let Some(default) = styles.next() {
            pool.set_default_style(default);
        }
        // Positions are preserved, duplicates included.
        for style in styles {
            let idx = pool.styles.len() as u32;
            pool.index_map.entry(style_key(&style)).or_insert(idx);
            pool.styles.push(style);
        }
        pool
    }
}

impl From<StylePool> for Vec<Style> {
    fn from(pool: StylePool) -> Self {
        pool.styles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn test_default_style() {
        let pool = StylePool::new();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(0), Some(&Style::default()));
    }

    #[test]
    fn test_deduplication() {
        let mut pool = StylePool::new();

        let idx1 = pool.get_or_insert(Style::new().bold(true));
        let idx2 = pool.get_or_insert(Style::new().bold(true));
        let idx3 = pool.get_or_insert(Style::new().fill_color(Color::RED));

        assert_eq!(idx1, idx2);
        assert_ne!(idx1, idx3);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.get_or_insert(Style::default()), 0);
    }

    #[test]
    fn test_from_vec_keeps_indices() {
        let styles = vec![
            Style::default(),
            Style::new().italic(true),
            Style::new().bold(true),
        ];
        let pool = StylePool::from(styles.clone());
        assert_eq!(pool.get(2), Some(&styles[2]));
        assert_eq!(Vec::<Style>::from(pool), styles);
    }

    #[test]
    fn test_set_default_style() {
        let mut pool = StylePool::new();
        let arial = Style::new().font_name("Arial");
        pool.set_default_style(arial.clone());
        assert_eq!(pool.get_or_insert(arial), 0);
        assert_eq!(pool.get_or_insert(Style::default()), 1);
    }
}
