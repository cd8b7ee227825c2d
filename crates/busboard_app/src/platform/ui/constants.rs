use super::render::Rgb;

pub const ROUTE_WIDTH: usize = 6;
pub const DESTINATION_WIDTH: usize = 28;
pub const TIME_WIDTH: usize = 14;

pub const HEADER: Rgb = Rgb(255, 255, 255);
pub const BRIGHT: Rgb = Rgb(235, 235, 235);
pub const DIMMED: Rgb = Rgb(128, 128, 128);
pub const SOON: Rgb = Rgb(255, 200, 0);
pub const LATE: Rgb = Rgb(255, 80, 80);
