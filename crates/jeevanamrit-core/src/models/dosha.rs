use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// One of the three constitutional categories scored by the intake questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
}

impl Dosha {
    pub const ALL: [Dosha; 3] = [Dosha::Vata, Dosha::Pitta, Dosha::Kapha];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dosha::Vata => "vata",
            Dosha::Pitta => "pitta",
            Dosha::Kapha => "kapha",
        }
    }

    /// The element pair shown next to the dosha on the assessment screen.
    pub fn elements(&self) -> &'static str {
        match self {
            Dosha::Vata => "Air & Space",
            Dosha::Pitta => "Fire & Water",
            Dosha::Kapha => "Earth & Water",
        }
    }

    pub fn qualities(&self) -> &'static str {
        match self {
            Dosha::Vata => "Movement, creativity, anxiety when imbalanced",
            Dosha::Pitta => "Transformation, focus, anger when imbalanced",
            Dosha::Kapha => "Structure, stability, lethargy when imbalanced",
        }
    }
}

impl fmt::Display for Dosha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dosha {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vata" => Ok(Dosha::Vata),
            "pitta" => Ok(Dosha::Pitta),
            "kapha" => Ok(Dosha::Kapha),
            other => Err(CoreError::InvalidDosha(other.to_string())),
        }
    }
}

/// Per-dosha score totals.
///
/// Always derived from a full set of answers; see
/// `jeevanamrit_instruments::scoring::score`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DoshaScores {
    pub vata: u32,
    pub pitta: u32,
    pub kapha: u32,
}

impl DoshaScores {
    pub fn get(&self, dosha: Dosha) -> u32 {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }

    /// Add `weight` to one dosha and return its new total. On overflow the
    /// scores are left unchanged and `None` is returned.
    pub fn checked_add(&mut self, dosha: Dosha, weight: u32) -> Option<u32> {
        let slot = match dosha {
            Dosha::Vata => &mut self.vata,
            Dosha::Pitta => &mut self.pitta,
            Dosha::Kapha => &mut self.kapha,
        };
        *slot = slot.checked_add(weight)?;
        Some(*slot)
    }

    pub fn total(&self) -> u64 {
        u64::from(self.vata) + u64::from(self.pitta) + u64::from(self.kapha)
    }

    /// Whole-number share of the total for each dosha, rounded half up.
    /// All zero when nothing has been scored yet.
    pub fn percentages(&self) -> DoshaShares {
        let total = self.total();
        let share = |value: u32| -> u8 {
            if total == 0 {
                return 0;
            }
            ((u64::from(value) * 200 + total) / (2 * total)) as u8
        };
        DoshaShares {
            vata: share(self.vata),
            pitta: share(self.pitta),
            kapha: share(self.kapha),
        }
    }
}

/// Rounded percentages for the results screen. Each share is rounded on its
/// own, so the three may sum to 99 or 101.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DoshaShares {
    pub vata: u8,
    pub pitta: u8,
    pub kapha: u8,
}

/// Classification result: a single dominant dosha, or `Tridoshic` when the
/// top score is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Constitution {
    Vata,
    Pitta,
    Kapha,
    Tridoshic,
}

impl Constitution {
    pub fn dominant(&self) -> Option<Dosha> {
        match self {
            Constitution::Vata => Some(Dosha::Vata),
            Constitution::Pitta => Some(Dosha::Pitta),
            Constitution::Kapha => Some(Dosha::Kapha),
            Constitution::Tridoshic => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Constitution::Vata => "vata",
            Constitution::Pitta => "pitta",
            Constitution::Kapha => "kapha",
            Constitution::Tridoshic => "tridoshic",
        }
    }
}

impl From<Dosha> for Constitution {
    fn from(dosha: Dosha) -> Self {
        match dosha {
            Dosha::Vata => Constitution::Vata,
            Dosha::Pitta => Constitution::Pitta,
            Dosha::Kapha => Constitution::Kapha,
        }
    }
}

impl fmt::Display for Constitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Constitution {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("tridoshic") {
            return Ok(Constitution::Tridoshic);
        }
        s.parse::<Dosha>().map(Constitution::from)
    }
}
