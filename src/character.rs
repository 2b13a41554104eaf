//! Which princess the player picked on the selection page.

pub const QUERY_PARAM: &str = "character";
pub const STORAGE_KEY: &str = "selectedPrincess";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Character {
    #[default]
    Princess1,
    Princess2,
    Princess3,
}

impl Character {
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_ascii_lowercase().as_str() {
            "princess1" => Some(Character::Princess1),
            "princess2" => Some(Character::Princess2),
            "princess3" => Some(Character::Princess3),
            _ => None,
        }
    }

    pub fn sprite_file(self) -> &'static str {
        match self {
            Character::Princess1 => "Princess_1_new.png",
            Character::Princess2 => "Princess_2_new.png",
            Character::Princess3 => "Princess_3_new.png",
        }
    }
}

/// Query parameter wins over the stored choice; the first non-empty one is used
/// even if it names an unknown character, which then falls back to the default.
pub fn resolve(query: Option<&str>, stored: Option<&str>) -> Character {
    query
        .filter(|s| !s.is_empty())
        .or(stored.filter(|s| !s.is_empty()))
        .and_then(Character::from_id)
        .unwrap_or_default()
}

/// Read `?character=` and `localStorage.selectedPrincess` from the current page.
pub fn selected_from_page() -> Character {
    let Some(win) = web_sys::window() else {
        return Character::default();
    };
    let query = win
        .location()
        .search()
        .ok()
        .and_then(|s| web_sys::UrlSearchParams::new_with_str(&s).ok())
        .and_then(|p| p.get(QUERY_PARAM));
    let stored = win
        .local_storage()
        .ok()
        .flatten()
        .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
    resolve(query.as_deref(), stored.as_deref())
}
