use serde::{Deserialize, Serialize};

/// RGB colour for region fill and stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

}

/// Drawing style for one region. Passed through to render output untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathStyle {
    pub fill: Color,
    pub fill_opacity: f32,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            fill_opacity: 0.5,
            stroke: None,
            stroke_width: 0.0,
        }
    }
}

impl PathStyle {
    pub fn with_fill(mut self, r: u8, g: u8, b: u8) -> Self {
        self.fill = Color::new(r, g, b);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.fill_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fill_is_half_black() {
        let style = PathStyle::default();
        assert_eq!(style.fill, Color::BLACK);
        assert_eq!(style.fill_opacity, 0.5);
        assert!(style.stroke.is_none());
    }

    #[test]
    fn test_builder_clamps_opacity() {
        let style = PathStyle::default().with_fill(255, 0, 0).with_opacity(3.0);
        assert_eq!(style.fill_opacity, 1.0);
        assert_eq!(style.fill, Color::new(255, 0, 0));
        assert_eq!(PathStyle::default().with_opacity(-1.0).fill_opacity, 0.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let style: PathStyle = serde_json::from_str(r#"{"stroke": {"r": 1, "g": 2, "b": 3}}"#).unwrap();
        assert_eq!(style.stroke, Some(Color::new(1, 2, 3)));
        assert_eq!(style.fill_opacity, 0.5);
    }
}
