//! The sexagenary (60-term) cycle of heavenly stems and earthly branches.
//!
//! Every pillar of a chart is a position in this cycle. Position `i` pairs
//! stem `i mod 10` with branch `i mod 12`, so only stems and branches of the
//! same polarity ever meet.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SajuError};

pub mod fmt;

/// The five elements (五行).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Element {
    #[serde(rename = "木")]
    Wood,
    #[serde(rename = "火")]
    Fire,
    #[serde(rename = "土")]
    Earth,
    #[serde(rename = "金")]
    Metal,
    #[serde(rename = "水")]
    Water,
}

impl Element {
    pub fn hanja(&self) -> &'static str {
        fmt::ELEMENT_HANJA[*self as usize]
    }
}

/// Yin/yang polarity (陰陽).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    #[serde(rename = "陽")]
    Yang,
    #[serde(rename = "陰")]
    Yin,
}

impl Polarity {
    fn of_index(index: usize) -> Self {
        if index % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }
}

/// Heavenly stems (天干), in cycle order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Stem {
    #[serde(rename = "甲")]
    Gap,
    #[serde(rename = "乙")]
    Eul,
    #[serde(rename = "丙")]
    Byeong,
    #[serde(rename = "丁")]
    Jeong,
    #[serde(rename = "戊")]
    Mu,
    #[serde(rename = "己")]
    Gi,
    #[serde(rename = "庚")]
    Gyeong,
    #[serde(rename = "辛")]
    Sin,
    #[serde(rename = "壬")]
    Im,
    #[serde(rename = "癸")]
    Gye,
}

/// All 10 stems in order (index 0 = 甲).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Gap,
    Stem::Eul,
    Stem::Byeong,
    Stem::Jeong,
    Stem::Mu,
    Stem::Gi,
    Stem::Gyeong,
    Stem::Sin,
    Stem::Im,
    Stem::Gye,
];

impl Stem {
    /// Stem at `index`, taken modulo 10.
    pub fn from_index(index: i64) -> Self {
        ALL_STEMS[index.rem_euclid(10) as usize]
    }
    /// Position in `0..10`.
    pub fn index(&self) -> usize {
        *self as usize
    }
    /// Two consecutive stems share an element: 甲乙 wood through 壬癸 water.
    pub fn element(&self) -> Element {
        const ELEMENTS: [Element; 5] = [
            Element::Wood,
            Element::Fire,
            Element::Earth,
            Element::Metal,
            Element::Water,
        ];
        ELEMENTS[self.index() / 2]
    }
    pub fn polarity(&self) -> Polarity {
        Polarity::of_index(self.index())
    }
    pub fn hanja(&self) -> &'static str {
        fmt::STEM_HANJA[self.index()]
    }
    pub fn hangul(&self) -> &'static str {
        fmt::STEM_HANGUL[self.index()]
    }
}

impl Display for Stem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanja())
    }
}

/// Earthly branches (地支), in cycle order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "子")]
    Ja,
    #[serde(rename = "丑")]
    Chuk,
    #[serde(rename = "寅")]
    In,
    #[serde(rename = "卯")]
    Myo,
    #[serde(rename = "辰")]
    Jin,
    #[serde(rename = "巳")]
    Sa,
    #[serde(rename = "午")]
    O,
    #[serde(rename = "未")]
    Mi,
    #[serde(rename = "申")]
    Sin,
    #[serde(rename = "酉")]
    Yu,
    #[serde(rename = "戌")]
    Sul,
    #[serde(rename = "亥")]
    Hae,
}

/// All 12 branches in order (index 0 = 子).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Ja,
    Branch::Chuk,
    Branch::In,
    Branch::Myo,
    Branch::Jin,
    Branch::Sa,
    Branch::O,
    Branch::Mi,
    Branch::Sin,
    Branch::Yu,
    Branch::Sul,
    Branch::Hae,
];

impl Branch {
    /// Branch at `index`, taken modulo 12.
    pub fn from_index(index: i64) -> Self {
        ALL_BRANCHES[index.rem_euclid(12) as usize]
    }
    /// Position in `0..12`.
    pub fn index(&self) -> usize {
        *self as usize
    }
    pub fn element(&self) -> Element {
        use Branch::*;
        match self {
            In | Myo => Element::Wood,
            Sa | O => Element::Fire,
            Chuk | Jin | Mi | Sul => Element::Earth,
            Sin | Yu => Element::Metal,
            Hae | Ja => Element::Water,
        }
    }
    pub fn polarity(&self) -> Polarity {
        Polarity::of_index(self.index())
    }
    pub fn hanja(&self) -> &'static str {
        fmt::BRANCH_HANJA[self.index()]
    }
    pub fn hangul(&self) -> &'static str {
        fmt::BRANCH_HANGUL[self.index()]
    }

    /// The double hour (時辰) containing `hour`, where 子 covers 23:00–00:59,
    /// 丑 01:00–02:59 and so on. `hour` is taken modulo 24.
    ///
    /// # Example
    ///
    /// ```
    /// use saju::sexagenary::Branch;
    ///
    /// assert_eq!(Branch::Ja, Branch::from_hour(23));
    /// assert_eq!(Branch::Ja, Branch::from_hour(0));
    /// assert_eq!(Branch::Hae, Branch::from_hour(22));
    /// ```
    pub fn from_hour(hour: u32) -> Self {
        Self::from_index(((hour % 24 + 1) / 2) as i64)
    }
    /// First civil hour of this branch's double hour: 23 for 子, 1 for 丑, ...
    pub fn start_hour(&self) -> u32 {
        (self.index() as u32 * 2 + 23) % 24
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanja())
    }
}

/// A (stem, branch) pair.
///
/// Fields are public for convenience; pillars produced by [`pillar_at`] always
/// have matching polarity, and [`Pillar::new`] checks it for hand-built ones.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    pub fn new(stem: Stem, branch: Branch) -> Result<Self> {
        let pillar = Pillar { stem, branch };
        index_of(pillar)?;
        Ok(pillar)
    }
    /// Cycle position, see [`index_of`].
    pub fn index(&self) -> Result<u8> {
        index_of(*self)
    }
    /// Korean reading, e.g. 「병인」 for 丙寅.
    pub fn hangul(&self) -> String {
        format!("{}{}", self.stem.hangul(), self.branch.hangul())
    }
    /// The pillar `steps` positions further along the cycle.
    pub fn advance(&self, steps: i64) -> Result<Self> {
        Ok(pillar_at(self.index()? as i64 + steps))
    }
}

impl Display for Pillar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

/// Pillar at cycle position `index`, taken modulo 60 (negative values count
/// backwards from 甲子).
///
/// # Example
///
/// ```
/// use saju::sexagenary::{pillar_at, Branch, Stem};
///
/// let p = pillar_at(2);
/// assert_eq!((Stem::Byeong, Branch::In), (p.stem, p.branch));
/// assert_eq!(pillar_at(-1), pillar_at(59)); // 癸亥
/// ```
pub fn pillar_at(index: i64) -> Pillar {
    let index = index.rem_euclid(60);
    Pillar {
        stem: Stem::from_index(index),
        branch: Branch::from_index(index),
    }
}

/// Cycle position of `pillar` in `0..60`.
///
/// `6s - 5b` is congruent to `s` modulo 10 and to `b` modulo 12 exactly when
/// `s` and `b` have the same parity; mismatched pairs are rejected with
/// [`SajuError::InvalidPillar`].
pub fn index_of(pillar: Pillar) -> Result<u8> {
    let (s, b) = (pillar.stem.index() as i64, pillar.branch.index() as i64);
    if s % 2 != b % 2 {
        return Err(SajuError::InvalidPillar {
            stem: pillar.stem,
            branch: pillar.branch,
        });
    }
    Ok((6 * s - 5 * b).rem_euclid(60) as u8)
}
