use ratatui::style::Color;

pub const STATUS_BG: Color = Color::Rgb(30, 30, 40);
pub const HEADER_BG: Color = Color::Rgb(25, 25, 38);
pub const SELECTED_BG: Color = Color::Rgb(50, 50, 80);
pub const ACCENT: Color = Color::Rgb(140, 115, 200);
pub const SEPARATOR: Color = Color::Rgb(55, 55, 75);
pub const BORDER_COLOR: Color = Color::Rgb(120, 120, 180);
pub const DIM_TEXT: Color = Color::Rgb(100, 100, 120);
pub const KEY_COLOR: Color = Color::Cyan;

pub const COMMITTED_FG: Color = Color::Green;
pub const MISSING_FG: Color = Color::Red;
pub const ERROR_FG: Color = Color::LightRed;
pub const WARN_FG: Color = Color::Yellow;
