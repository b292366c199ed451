use plotters::style::{RGBAColor, RGBColor};

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
    /// Line and bar color of the commit charts
    pub series_color: RGBColor,
    /// Slice colors of the language pie, reused cyclically
    pub palette: Vec<RGBColor>,
}

impl ChartTheme {
    pub fn slice_color(&self, index: usize) -> RGBColor {
        self.palette[index % self.palette.len()]
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(0, 0, 0, 0.94),
            text_color: RGBAColor(255, 255, 255, 0.8),
            grid_color: RGBAColor(255, 255, 255, 0.15),
            axis_color: RGBAColor(255, 255, 255, 0.8),
            series_color: RGBColor(135, 206, 250),
            palette: vec![
                RGBColor(99, 110, 250),
                RGBColor(239, 85, 59),
                RGBColor(0, 204, 150),
                RGBColor(171, 99, 250),
                RGBColor(255, 161, 90),
                RGBColor(25, 211, 243),
                RGBColor(255, 102, 146),
                RGBColor(182, 232, 128),
                RGBColor(255, 151, 255),
                RGBColor(254, 203, 82),
            ],
        }
    }
}

/// Chart style configuration
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub line_width: u32,
    pub font_size: u32,
    pub caption_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 420,
            line_width: 2,
            font_size: 15,
            caption_size: 24,
            margin: 10,
            label_area_size: 50,
        }
    }
}
