//! Decorative elements offered by the picker. Each one is placed as an
//! ordinary text entry with fixed content.

pub struct Element {
    pub name: &'static str,
    pub content: &'static str,
}

pub struct Category {
    pub name: &'static str,
    pub elements: &'static [Element],
}

const fn el(name: &'static str, content: &'static str) -> Element {
    Element { name, content }
}

pub const CATALOGUE: &[Category] = &[
    Category {
        name: "Roads",
        elements: &[
            el("horizontal", "═══════════════════"),
            el("vertical", "║\n║\n║\n║\n║"),
            el("crossing", "═══╬═══\n   ║   \n   ║   "),
            el("corner", "═══╗\n   ║\n   ║"),
        ],
    },
    Category {
        name: "Nature",
        elements: &[
            el("pine", "   🌲\n  /|\\\n / | \\\n   |"),
            el("oak", "🌳"),
            el("bush", "🌿🌿🌿\n🌿🌿🌿"),
            el("flowers", "🌸🌼🌻\n🌿🌿🌿"),
            el("cactus", "🌵"),
        ],
    },
    Category {
        name: "Buildings",
        elements: &[
            el("house", "   🏠\n  /^\\\n /   \\\n|  ⚫  |\n|_____|"),
            el("tower", "┌─────┐\n│⚫ ⚫ │\n├─────┤\n│⚫ ⚫ │\n└─────┘"),
            el("shop", "  SHOP  \n┌───────┐\n│ ⚫   ⚫ │\n└───────┘"),
        ],
    },
    Category {
        name: "Landscape",
        elements: &[
            el("river", "~~~~~~~~~~~~~~~~~~~~\n~~~~~~~~~~~~~~~~~~~~"),
            el("hill", "   ⛰️\n  /▲▲\\\n /▲▲▲▲\\\n▲▲▲▲▲▲▲"),
            el("bridge", "═══════════\n▓▓▓▓▓▓▓▓▓▓▓\n~~~~~~~~~~~"),
        ],
    },
    Category {
        name: "Vehicles",
        elements: &[el("car", "🚗"), el("bus", "🚌"), el("bike", "🚲")],
    },
];

/// First three lines of an element, with an ellipsis when more were cut.
pub fn preview(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let mut out = lines.iter().take(3).copied().collect::<Vec<_>>().join("\n");
    if lines.len() > 3 {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_element_has_placeable_content() {
        for cat in CATALOGUE {
            assert!(!cat.elements.is_empty(), "{} is empty", cat.name);
            for e in cat.elements {
                assert!(!e.content.trim().is_empty(), "{}", e.name);
            }
        }
    }

    #[test]
    fn preview_truncates_tall_elements() {
        assert_eq!(preview("a\nb\nc\nd"), "a\nb\nc...");
        assert_eq!(preview("🚗"), "🚗");
    }
}
