//! Deterministic placeholder product synthesis
//!
//! Builds a plausible product purely from the digits of a lookup code, so the
//! same code always yields the same record. Used when the upstream API has no
//! usable data or cannot be reached.
//!
//! Digit mapping (`d[i]` = i-th digit, `n` = code length):
//! - name: `PRODUCT_TYPES[d0 % 10]`, `BRAND_TAGS[d1 % 5]`, last 4 digits
//! - manufacturer: `MANUFACTURERS[d2 % 10]`
//! - model: `SERIES_PREFIXES[d3 % 5]`, digits `[n-6, n-2)`, `SUFFIX_LETTERS[d4 % 5]`
//! - specs: template family chosen by `d[n-1] % 3`

use super::jan_code::LookupCode;
use crate::models::CanonicalProduct;
use serde_json::{Map, Value};

pub const PRODUCT_TYPES: [&str; 10] = [
    "ワイヤレスマウス",
    "メカニカルキーボード",
    "USBハブ",
    "外付けSSD",
    "液晶モニター",
    "Webカメラ",
    "ヘッドセット",
    "ドッキングステーション",
    "ポータブルHDD",
    "スピーカー",
];

pub const BRAND_TAGS: [&str; 5] = ["Pro", "Lite", "Plus", "Max", "Neo"];

pub const MANUFACTURERS: [&str; 10] = [
    "サンプル電機",
    "テクノワークス",
    "ミライデバイス",
    "アオバ精機",
    "ヒカリ工業",
    "ユニバース技研",
    "ホクト電子",
    "ソラネット",
    "カエデシステムズ",
    "ツバサ産業",
];

pub const SERIES_PREFIXES: [&str; 5] = ["MX", "TR", "ZX", "KS", "VP"];

pub const SUFFIX_LETTERS: [&str; 5] = ["A", "B", "C", "S", "X"];

const RESOLUTIONS: [&str; 3] = ["1920×1080", "2560×1440", "3840×2160"];
const PANEL_TYPES: [&str; 3] = ["IPS", "VA", "TN"];
const CONNECTIONS: [&str; 3] = ["USB Type-C", "Bluetooth 5.0", "2.4GHz無線"];
const CAPACITIES: [&str; 5] = ["256GB", "512GB", "1TB", "2TB", "4TB"];
const INTERFACES: [&str; 3] = ["USB 3.2 Gen2", "Thunderbolt 4", "USB 3.0"];

/// Spec template families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecTemplate {
    Display,
    Peripheral,
    Storage,
}

impl SpecTemplate {
    /// Family for a code, keyed by `last_digit % 3`
    pub fn for_code(code: &LookupCode) -> Self {
        let (last, _) = tail_digits(&code.digits());
        match last % 3 {
            0 => SpecTemplate::Display,
            1 => SpecTemplate::Peripheral,
            _ => SpecTemplate::Storage,
        }
    }
}

/// (last digit, second-to-last digit)
fn tail_digits(digits: &[u8]) -> (u32, u32) {
    let n = digits.len();
    (u32::from(digits[n - 1]), u32::from(digits[n - 2]))
}

/// Synthesize the full placeholder record
pub fn synthesize(code: &LookupCode) -> CanonicalProduct {
    CanonicalProduct {
        name: Some(synthesize_name(code)),
        manufacturer_name: Some(synthesize_manufacturer(code)),
        model_name: Some(synthesize_model(code)),
        specs: Some(synthesize_specs(code)),
    }
}

pub fn synthesize_name(code: &LookupCode) -> String {
    let digits = code.digits();
    let s = code.as_str();
    format!(
        "{} {} {}",
        PRODUCT_TYPES[usize::from(digits[0] % 10)],
        BRAND_TAGS[usize::from(digits[1] % 5)],
        &s[s.len() - 4..]
    )
}

pub fn synthesize_manufacturer(code: &LookupCode) -> String {
    let digits = code.digits();
    MANUFACTURERS[usize::from(digits[2] % 10)].to_string()
}

pub fn synthesize_model(code: &LookupCode) -> String {
    let digits = code.digits();
    let s = code.as_str();
    let n = s.len();
    format!(
        "{}-{}{}",
        SERIES_PREFIXES[usize::from(digits[3] % 5)],
        &s[n - 6..n - 2],
        SUFFIX_LETTERS[usize::from(digits[4] % 5)]
    )
}

pub fn synthesize_specs(code: &LookupCode) -> Map<String, Value> {
    let (last, second) = tail_digits(&code.digits());
    let idx = |value: u32, len: usize| value as usize % len;

    let entries: Vec<(&str, String)> = match SpecTemplate::for_code(code) {
        SpecTemplate::Display => vec![
            ("画面サイズ", format!("{}インチ", 20 + last % 15)),
            ("解像度", RESOLUTIONS[idx(second, 3)].to_string()),
            ("リフレッシュレート", format!("{}Hz", 60 + second * 15)),
            ("応答速度", format!("{}ms", 1 + last % 5)),
            ("パネル種類", PANEL_TYPES[idx(last + second, 3)].to_string()),
        ],
        SpecTemplate::Peripheral => vec![
            ("接続方式", CONNECTIONS[idx(second, 3)].to_string()),
            ("最大DPI", format!("{}", 800 + last * 400)),
            ("ボタン数", format!("{}", 3 + second % 6)),
            ("重量", format!("{}g", 60 + last * 10)),
            ("バッテリー持続時間", format!("{}時間", 20 + second * 10)),
        ],
        SpecTemplate::Storage => vec![
            ("容量", CAPACITIES[idx(second, 5)].to_string()),
            ("読込速度", format!("{}MB/s", 500 + last * 250)),
            ("書込速度", format!("{}MB/s", 450 + second * 200)),
            ("インターフェース", INTERFACES[idx(second, 3)].to_string()),
            ("重量", format!("{}g", 40 + last * 5)),
        ],
    };

    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), Value::String(value)))
        .collect()
}
