use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum IntakeStep {
    Demographics,
    Disclosures,
    Assessment,
    Results,
}

impl IntakeStep {
    pub const ALL: [IntakeStep; 4] = [
        IntakeStep::Demographics,
        IntakeStep::Disclosures,
        IntakeStep::Assessment,
        IntakeStep::Results,
    ];

    pub fn next(self) -> Option<IntakeStep> {
        match self {
            IntakeStep::Demographics => Some(IntakeStep::Disclosures),
            IntakeStep::Disclosures => Some(IntakeStep::Assessment),
            IntakeStep::Assessment => Some(IntakeStep::Results),
            IntakeStep::Results => None,
        }
    }

    pub fn previous(self) -> Option<IntakeStep> {
        match self {
            IntakeStep::Demographics => None,
            IntakeStep::Disclosures => Some(IntakeStep::Demographics),
            IntakeStep::Assessment => Some(IntakeStep::Disclosures),
            IntakeStep::Results => Some(IntakeStep::Assessment),
        }
    }

    /// 1-based position, as shown in "Step 2 of 4".
    pub fn number(self) -> u8 {
        match self {
            IntakeStep::Demographics => 1,
            IntakeStep::Disclosures => 2,
            IntakeStep::Assessment => 3,
            IntakeStep::Results => 4,
        }
    }

    pub fn progress(self) -> Progress {
        let total = Self::ALL.len() as u8;
        let step = self.number();
        Progress {
            step,
            total,
            percent: ((u16::from(step) * 100 + u16::from(total) / 2) / u16::from(total)) as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Progress {
    pub step: u8,
    pub total: u8,
    pub percent: u8,
}
