use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub shape_fill: String,
    pub shape_stroke: String,
    pub text_color: String,
    pub line_color: String,
    pub background: String,
}

impl Theme {
    pub fn canvas_default() -> Self {
        Self {
            font_family: "Inter, ui-sans-serif, system-ui, sans-serif".to_string(),
            font_size: 14.0,
            shape_fill: "#F8FAFC".to_string(),
            shape_stroke: "#334155".to_string(),
            text_color: "#0F172A".to_string(),
            line_color: "#475569".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, ui-sans-serif, system-ui, sans-serif".to_string(),
            font_size: 14.0,
            shape_fill: "#1E293B".to_string(),
            shape_stroke: "#94A3B8".to_string(),
            text_color: "#E2E8F0".to_string(),
            line_color: "#CBD5E1".to_string(),
            background: "#0F172A".to_string(),
        }
    }
}
