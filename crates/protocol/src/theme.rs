use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::shared_str::SharedStr;

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Surface,
    Border,

    TextPrimary,
    TextSecondary,
    TextMuted,

    AxisLine,
    GridLine,

    DotFill,
    DotSelected,
    BrushOverlay,
    BrushBorder,

    SelectionHighlight,
    HoverHighlight,

    // Ten-slot categorical palette for language coloring.
    Category0,
    Category1,
    Category2,
    Category3,
    Category4,
    Category5,
    Category6,
    Category7,
    Category8,
    Category9,
}

const CATEGORIES: [ThemeToken; 10] = [
    ThemeToken::Category0,
    ThemeToken::Category1,
    ThemeToken::Category2,
    ThemeToken::Category3,
    ThemeToken::Category4,
    ThemeToken::Category5,
    ThemeToken::Category6,
    ThemeToken::Category7,
    ThemeToken::Category8,
    ThemeToken::Category9,
];

impl ThemeToken {
    /// Categorical token for slot `index`, wrapping past ten.
    pub fn category(index: usize) -> ThemeToken {
        CATEGORIES[index % CATEGORIES.len()]
    }
}

/// Stable ordinal color assignment keyed on category name.
///
/// Slots are handed out in first-seen order and never reassigned, so a
/// language keeps its color as filters add and remove files — the same
/// guarantee an ordinal scale gives a legend.
#[derive(Debug, Clone, Default)]
pub struct CategoryPalette {
    slots: HashMap<SharedStr, usize>,
    order: Vec<SharedStr>,
}

impl CategoryPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for `key`, assigning the next free slot on first sight.
    pub fn token(&mut self, key: &SharedStr) -> ThemeToken {
        if let Some(&slot) = self.slots.get(key) {
            return ThemeToken::category(slot);
        }
        let slot = self.order.len();
        self.slots.insert(key.clone(), slot);
        self.order.push(key.clone());
        ThemeToken::category(slot)
    }

    /// Keys in assignment order (legend order).
    pub fn keys(&self) -> &[SharedStr] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_is_stable_across_lookups() {
        let mut palette = CategoryPalette::new();
        let js = SharedStr::from("js");
        let css = SharedStr::from("css");

        let first = palette.token(&js);
        palette.token(&css);
        // Re-querying after other keys were added keeps the original slot.
        assert_eq!(palette.token(&js), first);
        assert_eq!(first, ThemeToken::Category0);
        assert_eq!(palette.token(&css), ThemeToken::Category1);
    }

    #[test]
    fn category_wraps_past_ten() {
        assert_eq!(ThemeToken::category(0), ThemeToken::category(10));
        assert_eq!(ThemeToken::category(3), ThemeToken::category(13));
    }
}
