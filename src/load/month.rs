use once_cell::sync::Lazy;
use std::collections::HashMap;

static MONTHS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("jan", 1),
        ("january", 1),
        ("feb", 2),
        ("february", 2),
        ("mar", 3),
        ("march", 3),
        ("apr", 4),
        ("april", 4),
        ("may", 5),
        ("jun", 6),
        ("june", 6),
        ("jul", 7),
        ("july", 7),
        ("aug", 8),
        ("august", 8),
        ("sep", 9),
        ("september", 9),
        ("oct", 10),
        ("october", 10),
        ("nov", 11),
        ("november", 11),
        ("dec", 12),
        ("december", 12),
    ])
});

/// Month name or three-letter abbreviation → 1–12. Case and surrounding
/// whitespace are ignored; anything else is `None`.
pub fn month_rank(label: &str) -> Option<u32> {
    MONTHS.get(label.trim().to_lowercase().as_str()).copied()
}
