use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub positive: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            // institutional green
            accent: Color::Rgb(0, 132, 76),
            error: Color::Rgb(200, 80, 80),
            warning: Color::Rgb(214, 158, 46),
            info: Color::Rgb(90, 140, 220),
            positive: Color::Rgb(80, 180, 110),
        }
    }
}
