//! Names of stems, branches, solar terms and lunar months/days.

use crate::calendar::Month;

pub const STEM_HANJA: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
pub const STEM_HANGUL: [&str; 10] = ["갑", "을", "병", "정", "무", "기", "경", "신", "임", "계"];
pub const BRANCH_HANJA: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];
pub const BRANCH_HANGUL: [&str; 12] = [
    "자", "축", "인", "묘", "진", "사", "오", "미", "신", "유", "술", "해",
];
pub const ELEMENT_HANJA: [&str; 5] = ["木", "火", "土", "金", "水"];

/// 漢數字，第 `1..=9` 項分別為「一」到「九」。為便於格式化日期，第 0 項為「十」。
pub const NUM_CHINESE: &[&str] = &["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// Lunar month name including 「月」, 「冬月」「臘月」 for the 11th and 12th.
///
/// # Example
///
/// ```
/// use saju::calendar::Month::*;
/// use saju::sexagenary::fmt;
///
/// assert_eq!("冬月", fmt::month(Common(11)));
/// assert_eq!("閏正月", fmt::month(Leap(1)));
/// ```
///
/// # Panics
///
/// If the month number is not in `1..=12`.
pub fn month(m: Month) -> String {
    let mut rt = String::new();
    if m.is_leap() {
        rt += "閏";
    }
    let num = m.num();
    rt += match num {
        1 => "正",
        2..=9 => NUM_CHINESE[num as usize],
        10 => "十",
        11 => "冬",
        12 => "臘",
        _ => panic!("month {} not in 1..=12", num),
    };
    rt += "月";
    rt
}

/// Lunar day name: 「初一」 to 「初十」, then 「十一」, 「二十」, 「廿一」, 「三十」.
///
/// ```
/// use saju::sexagenary::fmt;
///
/// assert_eq!("初十", fmt::day(10));
/// assert_eq!("廿五", fmt::day(25));
/// ```
///
/// # Panics
///
/// If `d` is not in `1..=30`.
pub fn day(d: u32) -> String {
    match d {
        1..=10 => "初",
        11..=19 => "十",
        20 => "二",
        21..=29 => "廿",
        30 => "三",
        _ => panic!("day {} not in 1..=30", d),
    }
    .to_owned()
        + NUM_CHINESE[(d % 10) as usize]
}

/// Solar term name, `1..=24` for 立春 through 大寒.
///
/// ```
/// use saju::sexagenary::fmt;
///
/// assert_eq!("立春", fmt::solar_term(1));
/// assert_eq!("小寒", fmt::solar_term(23));
/// ```
pub fn solar_term(term: u32) -> &'static str {
    const NAMES: &[&str] = &[
        "大寒", "立春", "雨水", "驚蟄", "春分", "清明", "穀雨", "立夏", "小滿", "芒種", "夏至",
        "小暑", "大暑", "立秋", "處暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪",
        "冬至", "小寒",
    ];
    NAMES[term.rem_euclid(24) as usize]
}
