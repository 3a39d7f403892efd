// Light/dark theme flag. Only the surface background depends on it; the
// particle hue stays the same in both.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_light(self) -> bool {
        self == Theme::Light
    }

    /// Background fill as 0x00RRGGBB.
    pub fn background(self) -> u32 {
        match self {
            Theme::Dark => 0x000A_0E1A,
            Theme::Light => 0x00F4_F6FA,
        }
    }

    /// HUD text colour readable on `background()`.
    pub fn foreground(self) -> u32 {
        match self {
            Theme::Dark => 0x00E6_EDF3,
            Theme::Light => 0x0022_2831,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "DARK",
            Theme::Light => "LIGHT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trips() {
        let t = Theme::default();
        assert!(!t.is_light());
        assert!(t.toggle().is_light());
        assert_eq!(t.toggle().toggle(), t);
    }

    #[test]
    fn themes_differ_visibly() {
        assert_ne!(Theme::Dark.background(), Theme::Light.background());
        assert_ne!(Theme::Light.foreground(), Theme::Light.background());
    }
}
