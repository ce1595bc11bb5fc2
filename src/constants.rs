// Quartile thresholds shared by every bin computation
pub const BIN_Q1: f64 = 0.25;
pub const BIN_Q2: f64 = 0.50;
pub const BIN_Q3: f64 = 0.75;

pub const BIN_LABELS: [&str; 4] = ["0-25%", "25-50%", "50-75%", "75-100%"];
pub const UNKNOWN_BIN_LABEL: &str = "unknown";

// Percentile-rank field names as they appear in dataset records
pub const LOCAL_PCT_FIELD: &str = "ugb_pct_rank";
pub const COUNTY_PCT_FIELD: &str = "county_pct_rank";
pub const STATE_PCT_FIELD: &str = "state_pct_rank";

pub const DISPLAY_LINE_BREAK: &str = "<br>";

// Screener flags shipped with every city dataset
pub const FLAG_TSUNAMI_ZONE: &str = "tsunami_zone";
pub const FLAG_TRANSMISSION_LINES: &str = "electric_transmission_lines";
pub const FLAG_HIGHWAY: &str = "highway";

pub const DEFAULT_FLAG_VARIABLES: [&str; 3] =
    [FLAG_TRANSMISSION_LINES, FLAG_HIGHWAY, FLAG_TSUNAMI_ZONE];

/// RGBA outline colors for screener layers
pub const TSUNAMI_ZONE_COLOR: [u8; 4] = [255, 0, 0, 255];
pub const TRANSMISSION_LINES_COLOR: [u8; 4] = [0, 0, 255, 255];
pub const HIGHWAY_COLOR: [u8; 4] = [0, 255, 0, 255];
pub const DEFAULT_SCREENER_COLOR: [u8; 4] = [128, 128, 128, 255];
