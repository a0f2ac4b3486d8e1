//! The pattern bank: six extraction strategies applied in priority order.
//!
//! Strategies are additive. Each one scans independently, and a later
//! strategy may re-find a coordinate an earlier one already produced; the
//! deduplicator keeps the first occurrence, so the ordering here decides
//! which format tag survives. Label alternations admit common OCR misreads
//! ("Lal" for "Lat", "L0ng" for "Long").

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::normalize::{clip_chars, TextViews};
use super::types::Coordinate;
use super::validate::in_bounds;

/// How far ahead of a latitude match the longitude may appear, in chars.
/// The normalized view is denser, so its window is half the size.
const FORWARD_WINDOW_ORIGINAL: usize = 200;
const FORWARD_WINDOW_NORMALIZED: usize = 100;

/// The closed set of extraction strategies, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Latitude and longitude labels with numbers on one (normalized) line.
    SameLinePair,
    /// Latitude label paired with a longitude label in a forward window,
    /// spanning line breaks.
    MultiLinePair,
    /// Labeled pair with comma or whitespace separators and optional sign.
    LabeledPair,
    /// Bare decimal pairs with GPS-typical fractional precision.
    DecimalPair,
    /// Degrees-minutes-seconds with hemisphere letters.
    DegreesMinutesSeconds,
    /// Degrees and decimal minutes with hemisphere letters.
    DegreesDecimalMinutes,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::SameLinePair,
        Strategy::MultiLinePair,
        Strategy::LabeledPair,
        Strategy::DecimalPair,
        Strategy::DegreesMinutesSeconds,
        Strategy::DegreesDecimalMinutes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SameLinePair => "same_line_pair",
            Self::MultiLinePair => "multi_line_pair",
            Self::LabeledPair => "labeled_pair",
            Self::DecimalPair => "decimal_pair",
            Self::DegreesMinutesSeconds => "dms",
            Self::DegreesDecimalMinutes => "ddm",
        }
    }

    /// Run this strategy over the text views. Only candidates that pass
    /// bounds validation are emitted; numeric parse failures drop the
    /// candidate silently.
    pub fn extract(&self, views: &TextViews<'_>) -> Vec<Coordinate> {
        match self {
            Self::SameLinePair => same_line_pairs(&views.normalized),
            Self::MultiLinePair => multi_line_pairs(views),
            Self::LabeledPair => labeled_pairs(views.original),
            Self::DecimalPair => decimal_pairs(views.original),
            Self::DegreesMinutesSeconds => dms_pairs(views.original),
            Self::DegreesDecimalMinutes => ddm_pairs(views.original),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static SAME_LINE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // "Lat 30.045977° Long 73.604948°", optional colon and degree glyph
        Regex::new(r"(?i)(?:Lat|Latitude|Lal)[:\s]*(\d+\.\d+)[°\s]*(?:Long|Longitude|Lon|Lng|L0ng)[:\s]*(\d+\.\d+)").unwrap(),
        // "Lat: 30.045977 Long: 73.604948"
        Regex::new(r"(?i)(?:Lat|Latitude)[:\s]+(\d+\.\d+)\s+(?:Long|Longitude|Lon|Lng)[:\s]+(\d+\.\d+)").unwrap(),
        // "Latitude 30.045977 Longitude 73.604948"
        Regex::new(r"(?i)(?:Lat|Latitude)\s+(\d+\.\d+)\s+(?:Long|Longitude|Lon|Lng)\s+(\d+\.\d+)").unwrap(),
        // Fully case-tolerant, digit zero admitted for the O in "Long"
        Regex::new(r"(?i)Lat[:\s]*(\d+\.\d+)[°\s]*L[o0]ng[:\s]*(\d+\.\d+)").unwrap(),
    ]
});

static LAT_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:Lat|Latitude|Lal)[:\s]*(\d+\.\d+)[°\s]*").unwrap());
static LON_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:Long|Longitude|Lon|Lng|L0ng)[:\s]*(\d+\.\d+)[°\s]*").unwrap());

static LABELED_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)(?:Latitude|Lat)[:\s]+(-?\d+\.?\d*)[,\s]+(?:Longitude|Long|Lon|Lng)[:\s]+(-?\d+\.?\d*)").unwrap(),
        Regex::new(r"(?i)(?:Latitude|Lat)[:\s]+(-?\d+\.?\d*)\s+(?:Longitude|Long|Lon|Lng)[:\s]+(-?\d+\.?\d*)").unwrap(),
    ]
});

// Bare pairs of decimals; 3-4+ fractional digits is the precision typical
// of GPS output, which keeps ordinary prose numbers out.
static AUTO_PAIR_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(\d{1,2}\.\d{4,})\s+(\d{1,3}\.\d{4,})").unwrap(),
        Regex::new(r"(\d{1,2}\.\d{3,})[,\s]+(\d{1,3}\.\d{3,})").unwrap(),
        Regex::new(r"(-?\d{1,2}\.\d{4,})[,\s]+(-?\d{1,3}\.\d{4,})").unwrap(),
    ]
});
static DECIMAL_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(-?\d{1,2}\.\d{3,})[,\s]+(-?\d{1,3}\.\d{3,})").unwrap());

static DMS_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(\d+)[°\s]+(\d+)['\s]+(\d+)["\s]*([NS])\s+(\d+)[°\s]+(\d+)['\s]+(\d+)["\s]*([EW])"#)
        .unwrap()
});
static DDM_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)[°\s]+(\d+\.\d+)['\s]*([NS])\s+(\d+)[°\s]+(\d+\.\d+)['\s]*([EW])")
        .unwrap()
});

fn push_if_valid(out: &mut Vec<Coordinate>, tag: &str, lat_text: &str, lon_text: &str) {
    let (Ok(lat), Ok(lon)) = (lat_text.parse::<f64>(), lon_text.parse::<f64>()) else {
        return;
    };
    if in_bounds(lat, lon) {
        out.push(Coordinate::new(tag, lat, lon));
    }
}

fn same_line_pairs(normalized: &str) -> Vec<Coordinate> {
    let mut found = Vec::new();
    for pattern in SAME_LINE_PATTERNS.iter() {
        for caps in pattern.captures_iter(normalized) {
            push_if_valid(&mut found, "Lat/Long", &caps[1], &caps[2]);
        }
    }
    found
}

fn multi_line_pairs(views: &TextViews<'_>) -> Vec<Coordinate> {
    let mut found = Vec::new();
    scan_forward(
        &mut found,
        views.original,
        FORWARD_WINDOW_ORIGINAL,
        "Lat/Long (multi-line)",
    );
    scan_forward(
        &mut found,
        &views.normalized,
        FORWARD_WINDOW_NORMALIZED,
        "Lat/Long (normalized)",
    );
    found
}

/// Pair every latitude label with the first longitude label inside a bounded
/// forward window. OCR frequently splits a stacked pair across lines, which
/// is why the window spans line breaks.
fn scan_forward(out: &mut Vec<Coordinate>, text: &str, window: usize, tag: &str) {
    for lat_caps in LAT_LABEL.captures_iter(text) {
        let Some(lat_match) = lat_caps.get(0) else {
            continue;
        };
        let Ok(lat) = lat_caps[1].parse::<f64>() else {
            continue;
        };
        let ahead = clip_chars(&text[lat_match.end()..], window);
        let Some(lon_caps) = LON_LABEL.captures(ahead) else {
            continue;
        };
        let Ok(lon) = lon_caps[1].parse::<f64>() else {
            continue;
        };
        if in_bounds(lat, lon) {
            out.push(Coordinate::new(tag, lat, lon));
        }
    }
}

fn labeled_pairs(original: &str) -> Vec<Coordinate> {
    let mut found = Vec::new();
    for pattern in LABELED_PATTERNS.iter() {
        for caps in pattern.captures_iter(original) {
            push_if_valid(&mut found, "Labeled", &caps[1], &caps[2]);
        }
    }
    found
}

fn decimal_pairs(original: &str) -> Vec<Coordinate> {
    let mut found = Vec::new();
    for pattern in AUTO_PAIR_PATTERNS.iter() {
        for caps in pattern.captures_iter(original) {
            let (Ok(a), Ok(b)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) else {
                continue;
            };
            // Try both orderings; the first that fits bounds wins.
            for (lat, lon) in [(a, b), (b, a)] {
                if in_bounds(lat, lon) {
                    found.push(Coordinate::new("Auto-detected", lat, lon));
                    break;
                }
            }
        }
    }
    for caps in DECIMAL_PAIR.captures_iter(original) {
        push_if_valid(&mut found, "Decimal", &caps[1], &caps[2]);
    }
    found
}

fn dms_pairs(original: &str) -> Vec<Coordinate> {
    let mut found = Vec::new();
    for caps in DMS_PAIR.captures_iter(original) {
        let (Ok(lat_deg), Ok(lat_min), Ok(lat_sec)) = (
            caps[1].parse::<f64>(),
            caps[2].parse::<f64>(),
            caps[3].parse::<f64>(),
        ) else {
            continue;
        };
        let (Ok(lon_deg), Ok(lon_min), Ok(lon_sec)) = (
            caps[5].parse::<f64>(),
            caps[6].parse::<f64>(),
            caps[7].parse::<f64>(),
        ) else {
            continue;
        };
        let mut lat = lat_deg + lat_min / 60.0 + lat_sec / 3600.0;
        if caps[4].eq_ignore_ascii_case("S") {
            lat = -lat;
        }
        let mut lon = lon_deg + lon_min / 60.0 + lon_sec / 3600.0;
        if caps[8].eq_ignore_ascii_case("W") {
            lon = -lon;
        }
        if in_bounds(lat, lon) {
            found.push(Coordinate::new("DMS", lat, lon));
        }
    }
    found
}

fn ddm_pairs(original: &str) -> Vec<Coordinate> {
    let mut found = Vec::new();
    for caps in DDM_PAIR.captures_iter(original) {
        let (Ok(lat_deg), Ok(lat_min)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) else {
            continue;
        };
        let (Ok(lon_deg), Ok(lon_min)) = (caps[4].parse::<f64>(), caps[5].parse::<f64>()) else {
            continue;
        };
        let mut lat = lat_deg + lat_min / 60.0;
        if caps[3].eq_ignore_ascii_case("S") {
            lat = -lat;
        }
        let mut lon = lon_deg + lon_min / 60.0;
        if caps[6].eq_ignore_ascii_case("W") {
            lon = -lon;
        }
        if in_bounds(lat, lon) {
            found.push(Coordinate::new("DDM", lat, lon));
        }
    }
    found
}
