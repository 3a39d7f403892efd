// Runtime knobs: field physics/look and the window host.

use crate::error::Error;
use crate::types::Rgba;
use std::path::PathBuf;

/// Constants of the particle field. Defaults reproduce the portfolio page.
#[derive(Debug, Clone, Copy)]
pub struct FieldConfig {
    /// Viewports narrower than this get the small population.
    pub breakpoint: usize,
    pub small_count: usize,
    pub large_count: usize,
    /// Max |v| per axis at spawn, px/frame.
    pub max_speed: f32,
    pub size_range: (f32, f32),
    pub opacity_range: (f32, f32),
    /// Where the pointer is assumed to be before the first move event.
    pub pointer_start: (f32, f32),
    /// Pointer influence radius.
    pub pointer_radius: f32,
    /// Displacement scale of the pointer force.
    pub pull: f32,
    /// Pairs closer than this get a link.
    pub link_distance: f32,
    /// Link alpha at zero distance.
    pub link_alpha: f32,
    pub color: Rgba,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            breakpoint: 768,
            small_count: 30,
            large_count: 50,
            max_speed: 0.25,
            size_range: (1.0, 3.0),
            opacity_range: (0.2, 0.7),
            pointer_start: (0.0, 0.0),
            pointer_radius: 100.0,
            pull: 0.01,
            link_distance: 100.0,
            link_alpha: 0.1,
            color: Rgba::new(0, 210, 255, 1.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub width: usize,
    pub height: usize,
    pub fps: usize,
    /// Fixed RNG seed; None seeds from the OS.
    pub seed: Option<u64>,
    pub backdrop: Option<PathBuf>,
    pub field: FieldConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 60,
            seed: None,
            backdrop: None,
            field: FieldConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse `--width N --height N --fps N --seed N --backdrop PATH`.
    /// Unknown flags are ignored; missing flags keep their defaults.
    pub fn from_args(args: &[String]) -> Result<Self, Error> {
        let mut cfg = Self::default();
        if let Some(v) = parse_arg(args, "--width")? {
            cfg.width = v;
        }
        if let Some(v) = parse_arg(args, "--height")? {
            cfg.height = v;
        }
        if let Some(v) = parse_arg::<usize>(args, "--fps")? {
            if v == 0 {
                return Err(Error::Config("--fps must be positive".into()));
            }
            cfg.fps = v;
        }
        cfg.seed = parse_arg(args, "--seed")?;
        cfg.backdrop = flag_value(args, "--backdrop").map(PathBuf::from);
        Ok(cfg)
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>, Error> {
    match flag_value(args, flag) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{flag}: cannot parse {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_flags() {
        let cfg = AppConfig::from_args(&args(&["particle-field"])).unwrap();
        assert_eq!((cfg.width, cfg.height, cfg.fps), (1280, 720, 60));
        assert!(cfg.seed.is_none());
        assert!(cfg.backdrop.is_none());
        assert_eq!(cfg.field.breakpoint, 768);
    }

    #[test]
    fn reads_all_flags() {
        let cfg = AppConfig::from_args(&args(&[
            "bin", "--width", "640", "--height", "480", "--fps", "30", "--seed", "7",
            "--backdrop", "me.png",
        ]))
        .unwrap();
        assert_eq!((cfg.width, cfg.height, cfg.fps), (640, 480, 30));
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.backdrop, Some(PathBuf::from("me.png")));
    }

    #[test]
    fn rejects_garbage_numbers() {
        let err = AppConfig::from_args(&args(&["bin", "--width", "wide"])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        let err = AppConfig::from_args(&args(&["bin", "--fps", "0"])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
