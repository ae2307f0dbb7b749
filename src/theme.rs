use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub background: String,
    pub plot_background: String,
    pub frame_color: String,
    pub marker_color: String,
    pub marker_stroke: String,
    pub text_color: String,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"Open Sans\", verdana, arial, sans-serif".to_string(),
            background: "#FFFFFF".to_string(),
            plot_background: "#E5ECF6".to_string(),
            frame_color: "#FFFFFF".to_string(),
            marker_color: "#636EFA".to_string(),
            marker_stroke: "#FFFFFF".to_string(),
            text_color: "#2A3F5F".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            background: "#FFFFFF".to_string(),
            plot_background: "#F8FAFF".to_string(),
            frame_color: "#C7D2E5".to_string(),
            marker_color: "#7A8AA6".to_string(),
            marker_stroke: "#1C2430".to_string(),
            text_color: "#1C2430".to_string(),
        }
    }
}
