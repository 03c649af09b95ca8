use jeevanamrit_core::models::dosha::Dosha;

use crate::questionnaire::{AnswerOption, Question, QuestionBank};
use crate::Instrument;

/// Prakriti intake questionnaire: five questions, one option per dosha,
/// each option worth 2 points. Totals range 0–10 per dosha.
pub struct Prakriti;

impl Instrument for Prakriti {
    fn id(&self) -> &str {
        "prakriti"
    }

    fn name(&self) -> &str {
        "Prakriti Assessment"
    }

    fn bank(&self) -> &QuestionBank {
        static BANK: std::sync::LazyLock<QuestionBank> = std::sync::LazyLock::new(|| {
            let items: [(&str, [&str; 3]); 5] = [
                (
                    "How would you describe your body build?",
                    ["Thin, lean frame", "Medium, athletic build", "Large, heavy frame"],
                ),
                (
                    "How is your digestion?",
                    [
                        "Variable, sometimes good, sometimes poor",
                        "Strong, I can eat anything",
                        "Slow but steady",
                    ],
                ),
                (
                    "How do you handle stress?",
                    [
                        "I get anxious and worried easily",
                        "I get irritated and angry",
                        "I remain calm and composed",
                    ],
                ),
                (
                    "What's your energy pattern?",
                    [
                        "High bursts followed by fatigue",
                        "Intense and focused energy",
                        "Steady, enduring energy",
                    ],
                ),
                (
                    "How do you sleep?",
                    [
                        "Light sleeper, difficulty falling asleep",
                        "Moderate sleep, wake up refreshed",
                        "Deep, long sleep",
                    ],
                ),
            ];

            let questions = items
                .iter()
                .map(|(prompt, texts)| Question {
                    prompt: prompt.to_string(),
                    options: Dosha::ALL
                        .iter()
                        .zip(texts)
                        .map(|(dosha, text)| AnswerOption {
                            text: text.to_string(),
                            category: *dosha,
                            weight: 2,
                        })
                        .collect(),
                })
                .collect();

            QuestionBank::new(questions)
        });
        &BANK
    }
}
