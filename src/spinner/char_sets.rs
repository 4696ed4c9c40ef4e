//! Built-in character sets, addressed by index.

pub const CHAR_SETS: &[&[&str]] = &[
    &["←", "↖", "↑", "↗", "→", "↘", "↓", "↙"],
    &["▁", "▃", "▄", "▅", "▆", "▇", "█", "▇", "▆", "▅", "▄", "▃", "▁"],
    &["▖", "▘", "▝", "▗"],
    &["┤", "┘", "┴", "└", "├", "┌", "┬", "┐"],
    &["◢", "◣", "◤", "◥"],
    &["◰", "◳", "◲", "◱"],
    &["◴", "◷", "◶", "◵"],
    &["◐", "◓", "◑", "◒"],
    &[".", "o", "O", "@", "*"],
    &["|", "/", "-", "\\"],
    &["◡◡", "⊙⊙", "◠◠"],
    &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"],
    &[">))'>", " >))'>", "  >))'>", "   >))'>", "    >))'>", "   <'((<", "  <'((<", " <'((<"],
    &["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈"],
    &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
    &["▉", "▊", "▋", "▌", "▍", "▎", "▏", "▎", "▍", "▌", "▋", "▊", "▉"],
    &["■", "□", "▪", "▫"],
    &["←", "↑", "→", "↓"],
    &["╫", "╪"],
    &["⇐", "⇖", "⇑", "⇗", "⇒", "⇘", "⇓", "⇙"],
    &["⠈", "⠐", "⠠", "⢀", "⡀", "⠄", "⠂", "⠁"],
    &["[    ]", "[=   ]", "[==  ]", "[=== ]", "[ ===]", "[  ==]", "[   =]", "[    ]"],
    &["🌍", "🌎", "🌏"],
    &["◜", "◝", "◞", "◟"],
    &["⬒", "⬔", "⬓", "⬕"],
    &["-", "\\", "|", "/"],
];

/// Owned copy of the set at `index`.
pub fn get(index: usize) -> Option<Vec<String>> {
    CHAR_SETS
        .get(index)
        .map(|set| set.iter().map(|glyph| glyph.to_string()).collect())
}
