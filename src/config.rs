use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::color::ColorScheme;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub text: TextConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Simulation updates per second.
    pub fps: u64,
    /// Start the reveal immediately instead of waiting for a key.
    pub autostart: bool,
    pub color_scheme: ColorScheme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Downward acceleration added to each particle's vertical velocity per tick.
    pub gravity: f32,
    /// Seed grid spacing in canvas pixels.
    pub frequency: usize,
    /// Reveal window the deceleration schedule runs over.
    pub duration_ms: u64,
    /// Triangles stay hidden for this long after the reveal starts.
    pub reveal_delay_ms: u64,
    /// Degrees added to the cumulative rotation each frame.
    pub rotation_step: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Message to reveal.
    pub text: String,
    /// Glyph height in canvas pixels (multiple of 8).
    pub font_size: usize,
    /// Vertical advance between wrapped lines, in canvas pixels.
    pub line_height: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: 100,
            autostart: false,
            color_scheme: ColorScheme::White,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            gravity: 0.0,
            frequency: 5,
            duration_ms: 10_000,
            reveal_delay_ms: 500,
            rotation_step: 5.0,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            text: "Hello, world!".to_string(),
            font_size: 24,
            line_height: 26,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/triveal/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("triveal").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists.
    /// Returns None if the file doesn't exist, warns on parse errors.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            match Self::load(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config at {}: {}\nUsing defaults.",
                        path.display(),
                        e
                    );
                    None
                }
            }
        } else {
            None
        }
    }

    /// Initialize a default config file at the XDG path, returns the path.
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = Self::generate_config_template();
        std::fs::write(&path, template)?;

        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# Triveal Configuration
# This file is auto-generated. Edit as needed.

[display]
# Simulation updates per second
fps = 100
# Start the reveal immediately instead of waiting for a key
autostart = false
# Stroke color scheme: "white", "spectrum", "rainbow", "fire", "ocean"
color_scheme = "white"

[animation]
# Downward acceleration added to particles each tick (0.0 = drift freely)
gravity = 0.0
# Seed grid spacing in canvas pixels; lower = more particles
frequency = 5
# Reveal window in milliseconds; the particle field settles after it
duration_ms = 10000
# Triangles stay hidden for this long after the reveal starts
reveal_delay_ms = 500
# Degrees added to the triangle rotation each frame
rotation_step = 5.0

[text]
# Message to reveal
text = "Hello, world!"
# Glyph height in canvas pixels (multiple of 8)
font_size = 24
# Vertical advance between wrapped lines, in canvas pixels
line_height = 26
"#
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) {
        if let Some(fps) = args.fps {
            self.display.fps = fps.max(1);
        }
        if args.autostart {
            self.display.autostart = true;
        }
        if let Some(ref colors) = args.colors {
            self.display.color_scheme = colors.parse().unwrap_or(self.display.color_scheme);
        }

        if let Some(gravity) = args.gravity {
            self.animation.gravity = gravity;
        }
        if let Some(frequency) = args.frequency {
            self.animation.frequency = frequency.max(1);
        }
        if let Some(duration) = args.duration_ms {
            self.animation.duration_ms = duration;
        }

        if let Some(ref text) = args.text {
            self.text.text = text.clone();
        }
        if let Some(size) = args.font_size {
            self.text.font_size = size.max(8);
            self.text.line_height = self.text.line_height.max(size.max(8) + 2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_back_to_the_defaults() {
        let config: Config = toml::from_str(&Config::generate_config_template()).unwrap();
        assert_eq!(config.display.fps, 100);
        assert_eq!(config.display.color_scheme, ColorScheme::White);
        assert_eq!(config.animation.frequency, 5);
        assert_eq!(config.animation.duration_ms, 10_000);
        assert_eq!(config.text.font_size, 24);
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: Config = toml::from_str("[animation]\ngravity = 0.5\n").unwrap();
        assert_eq!(config.animation.gravity, 0.5);
        assert_eq!(config.animation.frequency, 5);
        assert_eq!(config.display.fps, 100);
    }

    #[test]
    fn cli_arguments_take_priority() {
        let mut config = Config::default();
        let args = crate::Args {
            text: Some("HI".to_string()),
            config: None,
            frequency: Some(3),
            gravity: Some(0.2),
            duration_ms: None,
            fps: Some(60),
            colors: Some("rainbow".to_string()),
            font_size: None,
            autostart: true,
            init_config: false,
            ctl: None,
        };
        config.merge_args(&args);

        assert_eq!(config.text.text, "HI");
        assert_eq!(config.animation.frequency, 3);
        assert_eq!(config.animation.gravity, 0.2);
        assert_eq!(config.display.fps, 60);
        assert_eq!(config.display.color_scheme, ColorScheme::Rainbow);
        assert!(config.display.autostart);
        // untouched by the CLI
        assert_eq!(config.animation.duration_ms, 10_000);
    }
}
