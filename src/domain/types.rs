//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during analysis
//! - exported to text/JSON reports
//! - reloaded later for comparisons

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A validated 4-digit number, the atomic unit of analysis.
///
/// Stored as four digits in `0..=9`, most significant first. Construction
/// zero-pads numeric-looking input to 4 characters and truncates anything
/// longer, mirroring how draw feeds commonly format short numbers.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DigitString {
    digits: [u8; 4],
}

impl DigitString {
    /// The number 0000, used as a neutral fallback by infallible call sites.
    pub const ZERO: DigitString = DigitString { digits: [0, 0, 0, 0] };

    /// Build from raw digits. Returns `None` if any digit is out of range.
    pub fn from_digits(digits: [u8; 4]) -> Option<Self> {
        if digits.iter().all(|&d| d <= 9) {
            Some(Self { digits })
        } else {
            None
        }
    }

    /// Build from an index in `0..10_000` (e.g. an exhaustive scan).
    pub fn from_index(index: u16) -> Option<Self> {
        if index >= 10_000 {
            return None;
        }
        let i = index;
        Some(Self {
            digits: [
                (i / 1000 % 10) as u8,
                (i / 100 % 10) as u8,
                (i / 10 % 10) as u8,
                (i % 10) as u8,
            ],
        })
    }

    /// Parse a textual number: trim, zero-pad to 4, truncate to 4.
    ///
    /// Returns `None` when the padded/truncated form is not fully numeric
    /// (callers drop such entries silently and count them).
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        if s.is_empty() || s.len() > 4 {
            // Truncation keeps the leading 4 characters, as the source feeds do.
            let truncated: String = s.chars().take(4).collect();
            return if truncated.is_empty() {
                None
            } else {
                Self::parse_exact(&truncated)
            };
        }
        let padded = format!("{s:0>4}");
        Self::parse_exact(&padded)
    }

    fn parse_exact(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 4 {
            return None;
        }
        let mut digits = [0u8; 4];
        for (slot, &b) in digits.iter_mut().zip(bytes) {
            if !b.is_ascii_digit() {
                return None;
            }
            *slot = b - b'0';
        }
        Some(Self { digits })
    }

    pub fn digits(&self) -> [u8; 4] {
        self.digits
    }

    pub fn digit(&self, pos: usize) -> u8 {
        self.digits[pos]
    }

    /// Sum of the four digits (0..=36).
    pub fn digit_sum(&self) -> u8 {
        self.digits.iter().sum()
    }

    /// Number of distinct digits (1..=4).
    pub fn distinct_digits(&self) -> usize {
        let mut seen = [false; 10];
        for &d in &self.digits {
            seen[d as usize] = true;
        }
        seen.iter().filter(|&&s| s).count()
    }

    /// Count of digit positions shared with `other`.
    pub fn shared_positions(&self, other: &DigitString) -> usize {
        self.digits
            .iter()
            .zip(other.digits.iter())
            .filter(|(a, b)| a == b)
            .count()
    }

    /// True if the digit run `needle` occurs contiguously in this number.
    pub fn contains_run(&self, needle: &[u8]) -> bool {
        if needle.is_empty() || needle.len() > 4 {
            return false;
        }
        self.digits.windows(needle.len()).any(|w| w == needle)
    }

    /// Value as an integer in `0..10_000`.
    pub fn value(&self) -> u16 {
        self.digits
            .iter()
            .fold(0u16, |acc, &d| acc * 10 + u16::from(d))
    }
}

impl fmt::Display for DigitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &d in &self.digits {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for DigitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DigitString({self})")
    }
}

// Serialize as the 4-character string so exports read naturally.
impl Serialize for DigitString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DigitString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        DigitString::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid 4-digit number '{s}'")))
    }
}

/// One draw day: a date plus the numbers drawn on that date.
#[derive(Debug, Clone)]
pub struct DrawRecord {
    pub date: NaiveDate,
    pub numbers: Vec<DigitString>,
}

/// Identity of one entry in the pattern catalog.
///
/// The catalog is a fixed registry: every variant carries its display name and
/// its generation strategy, and classification dispatches through
/// `patterns::classify`. Order here is the reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternId {
    SequentialUp,
    SequentialDown,
    Palindrome,
    MirrorAbba,
    RepeatAabb,
    AlternatingAbab,
    AllEven,
    AllOdd,
    MixedEvenOdd,
    SmallDigits,
    BigDigits,
    BigSmallMix,
    Arithmetic,
    Geometric,
    FibonacciLike,
    Birthday,
    Mountain,
    Valley,
    Plateau,
    Cliff,
    DoublePair,
    Triple,
    Quad,
    AllDifferent,
    FirstLastSame,
    MiddleSame,
    Bookend,
    SmallTotal,
    MediumTotal,
    LargeTotal,
    ExtremeTotal,
    HotDigits,
    ColdDigits,
    Balanced,
    Lucky,
    HistoricalEcho,
    Seasonal,
    DateBased,
    Unseen,
    SpecialCombination,
}

impl PatternId {
    /// Full catalog, in reporting order.
    pub const ALL: [PatternId; 40] = [
        PatternId::SequentialUp,
        PatternId::SequentialDown,
        PatternId::Palindrome,
        PatternId::MirrorAbba,
        PatternId::RepeatAabb,
        PatternId::AlternatingAbab,
        PatternId::AllEven,
        PatternId::AllOdd,
        PatternId::MixedEvenOdd,
        PatternId::SmallDigits,
        PatternId::BigDigits,
        PatternId::BigSmallMix,
        PatternId::Arithmetic,
        PatternId::Geometric,
        PatternId::FibonacciLike,
        PatternId::Birthday,
        PatternId::Mountain,
        PatternId::Valley,
        PatternId::Plateau,
        PatternId::Cliff,
        PatternId::DoublePair,
        PatternId::Triple,
        PatternId::Quad,
        PatternId::AllDifferent,
        PatternId::FirstLastSame,
        PatternId::MiddleSame,
        PatternId::Bookend,
        PatternId::SmallTotal,
        PatternId::MediumTotal,
        PatternId::LargeTotal,
        PatternId::ExtremeTotal,
        PatternId::HotDigits,
        PatternId::ColdDigits,
        PatternId::Balanced,
        PatternId::Lucky,
        PatternId::HistoricalEcho,
        PatternId::Seasonal,
        PatternId::DateBased,
        PatternId::Unseen,
        PatternId::SpecialCombination,
    ];

    /// How this pattern's candidates are produced.
    pub fn generation_kind(self) -> GenerationKind {
        match self {
            PatternId::SequentialUp
            | PatternId::SequentialDown
            | PatternId::Palindrome
            | PatternId::MirrorAbba
            | PatternId::RepeatAabb
            | PatternId::AlternatingAbab
            | PatternId::Arithmetic
            | PatternId::Geometric
            | PatternId::FibonacciLike
            | PatternId::Birthday
            | PatternId::Plateau
            | PatternId::DoublePair
            | PatternId::Triple
            | PatternId::Quad
            | PatternId::Bookend
            | PatternId::Unseen => GenerationKind::Enumeration,
            PatternId::AllEven
            | PatternId::AllOdd
            | PatternId::MixedEvenOdd
            | PatternId::SmallDigits
            | PatternId::BigDigits
            | PatternId::BigSmallMix
            | PatternId::Mountain
            | PatternId::Valley
            | PatternId::Cliff
            | PatternId::AllDifferent
            | PatternId::FirstLastSame
            | PatternId::MiddleSame
            | PatternId::SmallTotal
            | PatternId::MediumTotal
            | PatternId::LargeTotal
            | PatternId::ExtremeTotal
            | PatternId::HotDigits
            | PatternId::ColdDigits
            | PatternId::Balanced => GenerationKind::Sampling,
            PatternId::Lucky
            | PatternId::HistoricalEcho
            | PatternId::Seasonal
            | PatternId::DateBased
            | PatternId::SpecialCombination => GenerationKind::Curated,
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            PatternId::SequentialUp => "Sequential Up",
            PatternId::SequentialDown => "Sequential Down",
            PatternId::Palindrome => "Palindrome",
            PatternId::MirrorAbba => "Mirror ABBA",
            PatternId::RepeatAabb => "Repeat AABB",
            PatternId::AlternatingAbab => "Alternating ABAB",
            PatternId::AllEven => "All Even",
            PatternId::AllOdd => "All Odd",
            PatternId::MixedEvenOdd => "Mixed Even/Odd",
            PatternId::SmallDigits => "Small 0-4",
            PatternId::BigDigits => "Big 5-9",
            PatternId::BigSmallMix => "Big/Small Mix",
            PatternId::Arithmetic => "Arithmetic",
            PatternId::Geometric => "Geometric",
            PatternId::FibonacciLike => "Fibonacci-like",
            PatternId::Birthday => "Birthday",
            PatternId::Mountain => "Mountain",
            PatternId::Valley => "Valley",
            PatternId::Plateau => "Plateau",
            PatternId::Cliff => "Cliff",
            PatternId::DoublePair => "Double Pair",
            PatternId::Triple => "Triple",
            PatternId::Quad => "Quad",
            PatternId::AllDifferent => "All Different",
            PatternId::FirstLastSame => "First-Last Same",
            PatternId::MiddleSame => "Middle Same",
            PatternId::Bookend => "Bookend",
            PatternId::SmallTotal => "Small Total",
            PatternId::MediumTotal => "Medium Total",
            PatternId::LargeTotal => "Large Total",
            PatternId::ExtremeTotal => "Extreme Total",
            PatternId::HotDigits => "Hot Digits",
            PatternId::ColdDigits => "Cold Digits",
            PatternId::Balanced => "Balanced",
            PatternId::Lucky => "Lucky",
            PatternId::HistoricalEcho => "Historical Echo",
            PatternId::Seasonal => "Seasonal",
            PatternId::DateBased => "Date-Based",
            PatternId::Unseen => "Unseen",
            PatternId::SpecialCombination => "Special Combination",
        }
    }
}

/// How a pattern's candidate pool is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationKind {
    /// Closed form, enumerated exhaustively (possibly capped).
    Enumeration,
    /// Bounded rejection or alphabet-restricted sampling.
    Sampling,
    /// Fixed or date-derived curated lists.
    Curated,
}

impl GenerationKind {
    pub fn label(self) -> &'static str {
        match self {
            GenerationKind::Enumeration => "enumerated",
            GenerationKind::Sampling => "sampled",
            GenerationKind::Curated => "curated",
        }
    }
}

/// Which form a Birthday-style number matched, in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateForm {
    DayMonth,
    MonthDay,
    Year,
}

impl DateForm {
    pub fn label(self) -> &'static str {
        match self {
            DateForm::DayMonth => "DDMM",
            DateForm::MonthDay => "MMDD",
            DateForm::Year => "YYYY",
        }
    }
}

/// Optional auxiliary value attached to a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternPayload {
    /// Common difference of an arithmetic progression.
    Difference(i8),
    /// Common ratio of a geometric progression.
    Ratio(f64),
    /// Matched date form for birthday-style numbers.
    Date(DateForm),
}

/// Result of classifying one number against one predicate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub matched: bool,
    pub payload: Option<PatternPayload>,
}

impl Verdict {
    pub fn no() -> Self {
        Self {
            matched: false,
            payload: None,
        }
    }

    pub fn yes() -> Self {
        Self {
            matched: true,
            payload: None,
        }
    }

    pub fn yes_with(payload: PatternPayload) -> Self {
        Self {
            matched: true,
            payload: Some(payload),
        }
    }
}

/// Identity of a non-pattern analysis strategy (frequency/statistics based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyId {
    Frequency,
    PositionWeighted,
    HotColdNumbers,
    EvenOddTemplates,
    DigitSum,
    Repetition,
    PrizePosition,
    SlidingWindow,
    Rarest,
}

impl StrategyId {
    pub const ALL: [StrategyId; 9] = [
        StrategyId::Frequency,
        StrategyId::PositionWeighted,
        StrategyId::HotColdNumbers,
        StrategyId::EvenOddTemplates,
        StrategyId::DigitSum,
        StrategyId::Repetition,
        StrategyId::PrizePosition,
        StrategyId::SlidingWindow,
        StrategyId::Rarest,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            StrategyId::Frequency => "Frequency Leaders",
            StrategyId::PositionWeighted => "Position-Weighted Draw",
            StrategyId::HotColdNumbers => "Hot/Cold Numbers",
            StrategyId::EvenOddTemplates => "Even/Odd Templates",
            StrategyId::DigitSum => "Digit Sum Targets",
            StrategyId::Repetition => "Repetition Shapes",
            StrategyId::PrizePosition => "Prize Position",
            StrategyId::SlidingWindow => "Sliding Window",
            StrategyId::Rarest => "Rarest Numbers",
        }
    }
}

/// What nominated a candidate set: a catalog pattern or a strategy analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    Pattern(PatternId),
    Strategy(StrategyId),
}

impl CandidateSource {
    pub fn display_name(self) -> &'static str {
        match self {
            CandidateSource::Pattern(id) => id.display_name(),
            CandidateSource::Strategy(id) => id.display_name(),
        }
    }
}

/// Deduplicated candidates proposed by one source.
///
/// May be shorter than the requested count when sampling under-fills; callers
/// must not assume exact-length output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSet {
    pub source: CandidateSource,
    pub numbers: Vec<DigitString>,
}

impl CandidateSet {
    pub fn empty(source: CandidateSource) -> Self {
        Self {
            source,
            numbers: Vec::new(),
        }
    }
}

/// Confidence tier derived from cross-source recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Base,
}

impl Confidence {
    pub fn from_recurrence(count: usize) -> Self {
        match count {
            c if c >= 3 => Confidence::High,
            2 => Confidence::Medium,
            _ => Confidence::Base,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Base => "base",
        }
    }
}

/// A candidate with its accumulated score and supporting evidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub number: DigitString,
    /// Weighted bonus score (see `consensus::bonus_score`).
    pub score: i32,
    /// How many distinct sources nominated this number.
    pub recurrence: usize,
    pub confidence: Confidence,
    /// Names of the nominating sources, in catalog order.
    pub sources: Vec<String>,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub history_path: PathBuf,
    /// Reference date for seasonal/date-based rules (defaults to today).
    pub asof_date: NaiveDate,
    /// Candidates requested per pattern after deduplication.
    pub per_pattern: usize,
    /// Length of the final recommendation list.
    pub top_n: usize,
    /// Base seed; each generation task derives its own stream from it.
    pub seed: u64,
    /// Draws covered by the sliding-window strategy.
    pub window: usize,
    pub export_report: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}
