//! Menu text and terminal colors.

const RESET: &str = "\u{1b}[0m";
const BLUE: &str = "\u{1b}[34m";
const PURPLE: &str = "\u{1b}[35m";
const RED: &str = "\u{1b}[31m";
const GREEN: &str = "\u{1b}[32m";

/// Highest option number on the main menu.
pub const MAIN_MENU_MAX: i64 = 13;

/// Highest option number on the list menu.
pub const LIST_MENU_MAX: i64 = 6;

/// Wraps text in ANSI color codes when enabled.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.enabled {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    pub fn title(&self, text: &str) -> String {
        self.paint(text, BLUE)
    }

    pub fn option(&self, text: &str) -> String {
        self.paint(text, PURPLE)
    }

    pub fn danger(&self, text: &str) -> String {
        self.paint(text, RED)
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, GREEN)
    }
}

pub fn main_menu(palette: &Palette) -> String {
    let options = [
        (1, "➕ Add a Baked Good"),
        (2, "❎ Delete a Baked Good"),
        (3, "✏️  Update a Baked Good"),
        (4, "📜 List Baked Goods"),
        (5, "✅ Add Ingredient to a Baked Good"),
        (6, "⚖️  Update Ingredient Quantity in a Baked Good"),
        (7, "🚫 Delete an Ingredient"),
        (8, "⚠️  Mark Ingredient Allergens"),
        (9, "🔍 Search Baked Goods"),
        (10, "🔍 Search Ingredients"),
        (11, "🔍 Search Baked Goods by Allergen"),
        (12, "📥 Load Baked Goods"),
        (13, "💾 Save Baked Goods"),
    ];

    let mut menu = format!("\n  {}\n\n", palette.title("🧁 Bakery App 🍰"));
    for (number, label) in options {
        menu.push_str(&format!("  | {:>2}) {}\n", number, palette.option(label)));
    }
    menu.push_str(&format!("  |  0) {}\n", palette.danger("🚪 Exit")));
    menu
}

pub fn list_menu(palette: &Palette) -> String {
    let options = [
        (1, "List ALL baked goods"),
        (2, "List Baked Goods by Category"),
        (3, "List Baked Goods by Price"),
        (4, "List Refrigerated Baked Goods"),
        (5, "List Non-Refrigerated Baked Goods"),
        (6, "List Baked Goods by Allergen"),
    ];

    let mut menu = format!("\n  {}\n\n", palette.title("🍰 LIST OF BAKED GOODS 🎁"));
    for (number, label) in options {
        menu.push_str(&format!("  | {}) {}\n", number, palette.option(label)));
    }
    menu
}
