//! Skincare quiz wizard.
//!
//! The quiz is a fixed sequence of nine steps. Each submit validates the
//! fields of the current step only; valid answers are merged into
//! [`QuizAnswers`] and the wizard advances, either to the next applicable
//! step or to the step's override (sensitive skin skips exfoliation).
//! Invalid input leaves the state untouched and reports per-field messages.
//!
//! State lives in the visitor's session (see [`store`]) as
//! `{ "current_step": u8, "answers": {...} }`.

mod form;
pub mod store;

pub use form::{FieldErrors, FormFields, QuizError};

use lumen_core::{
    AgeGroup, ClimateType, ExfoliantType, ExfoliationFrequency, MakeupFrequency, MakeupType,
    SkinGoal, SkinType, SleepHabits,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use form::{boolean, multi, optional, required};

/// A quiz step, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Step {
    Splash = 1,
    SkinType = 2,
    Exfoliation = 3,
    AgeGroup = 4,
    Environment = 5,
    Sleep = 6,
    Makeup = 7,
    Goals = 8,
    Summary = 9,
}

impl Step {
    pub const ALL: [Self; 9] = [
        Self::Splash,
        Self::SkinType,
        Self::Exfoliation,
        Self::AgeGroup,
        Self::Environment,
        Self::Sleep,
        Self::Makeup,
        Self::Goals,
        Self::Summary,
    ];

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.index() == index)
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    #[must_use]
    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Splash => "Find your routine",
            Self::SkinType => "What is your skin type?",
            Self::Exfoliation => "How do you exfoliate?",
            Self::AgeGroup => "How old are you?",
            Self::Environment => "Where do you live?",
            Self::Sleep => "How do you sleep?",
            Self::Makeup => "Do you wear makeup?",
            Self::Goals => "What are your skin goals?",
            Self::Summary => "Your skincare profile",
        }
    }

    /// Progress through the question steps, 0 to 100.
    #[must_use]
    pub fn progress_percent(self) -> u16 {
        let total = u16::from(Self::Summary.index() - 1);
        u16::from(self.index() - 1) * 100 / total
    }
}

/// Answers accumulated across steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizAnswers {
    pub skin_type: Option<SkinType>,
    pub exfoliation_frequency: Option<ExfoliationFrequency>,
    pub exfoliants: Vec<ExfoliantType>,
    pub age_group: Option<AgeGroup>,
    pub climate_type: Option<ClimateType>,
    pub sleep_habits: Option<SleepHabits>,
    pub wears_makeup: Option<bool>,
    pub makeup_types: Vec<MakeupType>,
    pub makeup_frequency: Option<MakeupFrequency>,
    pub skin_goals: Vec<SkinGoal>,
}

/// What a routine should concentrate on, most important first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Fragrance-free, low-irritation products for sensitive skin.
    BarrierCare,
    Goal(SkinGoal),
}

impl Focus {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::BarrierCare => "Gentle barrier care",
            Self::Goal(goal) => goal.label(),
        }
    }
}

impl QuizAnswers {
    /// Exfoliation is only asked of non-sensitive skin.
    #[must_use]
    pub fn applies(&self, step: Step) -> bool {
        step != Step::Exfoliation || self.skin_type != Some(SkinType::Sensitive)
    }

    /// Concerns for the summary: chosen goals plus skin-type adjustments.
    #[must_use]
    pub fn recommended_focus(&self) -> Vec<Focus> {
        let mut focus = Vec::new();
        if self.skin_type == Some(SkinType::Sensitive) {
            focus.push(Focus::BarrierCare);
        }

        focus.extend(
            SkinGoal::ALL
                .iter()
                .filter(|g| self.skin_goals.contains(g))
                .map(|g| Focus::Goal(*g)),
        );

        let implied = match self.skin_type {
            Some(SkinType::Dry) => Some(SkinGoal::Hydration),
            Some(SkinType::Oily | SkinType::Combination) => Some(SkinGoal::PoreMinimization),
            _ => None,
        };
        if let Some(goal) = implied.filter(|g| !self.skin_goals.contains(g)) {
            focus.push(Focus::Goal(goal));
        }

        focus
    }

    /// Label/value rows for the summary step.
    #[must_use]
    pub fn summary_rows(&self) -> Vec<(&'static str, String)> {
        fn join<T: std::fmt::Display>(items: &[T]) -> String {
            items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        }

        let mut rows = Vec::new();
        if let Some(skin) = self.skin_type {
            rows.push(("Skin type", skin.to_string()));
        }
        if let Some(freq) = self.exfoliation_frequency {
            rows.push(("Exfoliation", freq.to_string()));
        }
        if !self.exfoliants.is_empty() {
            rows.push(("Exfoliants", join(&self.exfoliants)));
        }
        if let Some(age) = self.age_group {
            rows.push(("Age", age.to_string()));
        }
        if let Some(climate) = self.climate_type {
            rows.push(("Environment", climate.to_string()));
        }
        if let Some(sleep) = self.sleep_habits {
            rows.push(("Sleep", sleep.to_string()));
        }
        if let Some(wears) = self.wears_makeup {
            rows.push(("Wears makeup", if wears { "Yes" } else { "No" }.to_string()));
        }
        if !self.makeup_types.is_empty() {
            rows.push(("Makeup", join(&self.makeup_types)));
        }
        if let Some(freq) = self.makeup_frequency {
            rows.push(("Makeup frequency", freq.to_string()));
        }
        if !self.skin_goals.is_empty() {
            rows.push(("Goals", join(&self.skin_goals)));
        }
        rows
    }
}

/// Validated answers of a single step.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StepAnswers {
    Nothing,
    SkinType(SkinType),
    Exfoliation {
        frequency: ExfoliationFrequency,
        exfoliants: Vec<ExfoliantType>,
    },
    AgeGroup(AgeGroup),
    Climate(ClimateType),
    Sleep(SleepHabits),
    Makeup {
        wears: bool,
        types: Vec<MakeupType>,
        frequency: Option<MakeupFrequency>,
    },
    Goals(Vec<SkinGoal>),
}

impl StepAnswers {
    fn validate(step: Step, fields: &FormFields) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let parsed = match step {
            Step::Splash | Step::Summary => Some(Self::Nothing),
            Step::SkinType => required(
                fields,
                &mut errors,
                "skin_type",
                "Please select your skin type",
            )
            .map(Self::SkinType),
            Step::Exfoliation => {
                let frequency: Option<ExfoliationFrequency> = required(
                    fields,
                    &mut errors,
                    "exfoliation_frequency",
                    "Please select how often you exfoliate",
                );
                let exfoliants = multi(fields, &mut errors, "exfoliants");
                frequency.map(|frequency| Self::Exfoliation {
                    frequency,
                    exfoliants: if frequency == ExfoliationFrequency::Never {
                        Vec::new()
                    } else {
                        exfoliants
                    },
                })
            }
            Step::AgeGroup => required(
                fields,
                &mut errors,
                "age_group",
                "Please select your age group",
            )
            .map(Self::AgeGroup),
            Step::Environment => required(
                fields,
                &mut errors,
                "climate_type",
                "Please select an environmental factor",
            )
            .map(Self::Climate),
            Step::Sleep => required(
                fields,
                &mut errors,
                "sleep_habits",
                "Please select your sleep habits",
            )
            .map(Self::Sleep),
            Step::Makeup => {
                let wears = boolean(
                    fields,
                    &mut errors,
                    "wears_makeup",
                    "Please tell us whether you wear makeup",
                );
                let types = multi(fields, &mut errors, "makeup_types");
                let frequency = optional(fields, &mut errors, "makeup_frequency");
                match wears {
                    Some(true) if frequency.is_none() => {
                        errors.add(
                            "makeup_frequency",
                            "Please select how often you wear makeup",
                        );
                        None
                    }
                    Some(true) => Some(Self::Makeup {
                        wears: true,
                        types,
                        frequency,
                    }),
                    Some(false) => Some(Self::Makeup {
                        wears: false,
                        types: Vec::new(),
                        frequency: None,
                    }),
                    None => None,
                }
            }
            Step::Goals => {
                let goals: Vec<SkinGoal> = multi(fields, &mut errors, "skin_goals");
                if goals.is_empty() {
                    errors.add("skin_goals", "Please select at least one skin goal");
                }
                Some(Self::Goals(goals))
            }
        };

        match parsed {
            Some(answers) if errors.is_empty() => Ok(answers),
            _ => Err(errors),
        }
    }

    /// Step to jump to instead of the next one.
    const fn override_step(&self) -> Option<Step> {
        match self {
            Self::SkinType(SkinType::Sensitive) => Some(Step::AgeGroup),
            _ => None,
        }
    }

    fn merge_into(self, answers: &mut QuizAnswers) {
        match self {
            Self::Nothing => {}
            Self::SkinType(skin) => {
                answers.skin_type = Some(skin);
                if skin == SkinType::Sensitive {
                    answers.exfoliation_frequency = None;
                    answers.exfoliants.clear();
                }
            }
            Self::Exfoliation {
                frequency,
                exfoliants,
            } => {
                answers.exfoliation_frequency = Some(frequency);
                answers.exfoliants = exfoliants;
            }
            Self::AgeGroup(age) => answers.age_group = Some(age),
            Self::Climate(climate) => answers.climate_type = Some(climate),
            Self::Sleep(sleep) => answers.sleep_habits = Some(sleep),
            Self::Makeup {
                wears,
                types,
                frequency,
            } => {
                answers.wears_makeup = Some(wears);
                answers.makeup_types = types;
                answers.makeup_frequency = frequency;
            }
            Self::Goals(goals) => answers.skin_goals = goals,
        }
    }
}

/// Wizard position plus accumulated answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PersistedQuiz", into = "PersistedQuiz")]
pub struct QuizState {
    current: Step,
    answers: QuizAnswers,
}

impl Default for QuizState {
    fn default() -> Self {
        Self {
            current: Step::Splash,
            answers: QuizAnswers::default(),
        }
    }
}

impl QuizState {
    #[must_use]
    pub const fn current(&self) -> Step {
        self.current
    }

    #[must_use]
    pub const fn answers(&self) -> &QuizAnswers {
        &self.answers
    }

    /// Validate and apply the answers for `posted_step`.
    ///
    /// # Errors
    ///
    /// [`QuizError::StaleStep`] when `posted_step` is not the current step,
    /// [`QuizError::Invalid`] when a field fails validation. The state is
    /// unchanged in both cases.
    pub fn submit(&mut self, posted_step: u8, fields: &FormFields) -> Result<Step, QuizError> {
        if posted_step != self.current.index() {
            return Err(QuizError::StaleStep {
                posted: posted_step,
                current: self.current,
            });
        }

        if self.current == Step::Summary {
            return Ok(Step::Summary);
        }

        let step_answers =
            StepAnswers::validate(self.current, fields).map_err(QuizError::Invalid)?;
        let target = step_answers.override_step().or_else(|| self.current.next());
        step_answers.merge_into(&mut self.answers);

        let mut next = target.unwrap_or(Step::Summary);
        while !self.answers.applies(next) {
            next = next.next().unwrap_or(Step::Summary);
        }
        self.current = next;
        Ok(next)
    }

    /// Go to the previous applicable step, keeping all answers.
    pub fn back(&mut self) -> Step {
        let mut prev = self.current.prev();
        while let Some(step) = prev.filter(|s| !self.answers.applies(*s)) {
            prev = step.prev();
        }
        self.current = prev.unwrap_or(Step::Splash);
        self.current
    }

    /// Clear every answer and return to step 1.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Restore persisted state, falling back to a fresh quiz when the
    /// document is unreadable.
    #[must_use]
    pub fn from_persisted(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            warn!(error = %e, "Discarding unreadable quiz state");
            Self::default()
        })
    }
}

/// Session representation of [`QuizState`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedQuiz {
    current_step: u8,
    #[serde(default)]
    answers: QuizAnswers,
}

impl From<PersistedQuiz> for QuizState {
    fn from(persisted: PersistedQuiz) -> Self {
        let answers = persisted.answers;
        let mut current = Step::from_index(persisted.current_step).unwrap_or(Step::Splash);
        if !answers.applies(current) {
            current = Step::AgeGroup;
        }
        Self { current, answers }
    }
}

impl From<QuizState> for PersistedQuiz {
    fn from(state: QuizState) -> Self {
        Self {
            current_step: state.current.index(),
            answers: state.answers,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        FormFields::new(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    fn at(step: Step, answers: QuizAnswers) -> QuizState {
        QuizState {
            current: step,
            answers,
        }
    }

    #[test]
    fn test_valid_submit_advances_by_one() {
        let cases = [
            (Step::Splash, fields(&[])),
            (Step::SkinType, fields(&[("skin_type", "DRY")])),
            (
                Step::Exfoliation,
                fields(&[("exfoliation_frequency", "WEEKLY"), ("exfoliants", "PHYSICAL_SCRUBS")]),
            ),
            (Step::AgeGroup, fields(&[("age_group", "THIRTIES")])),
            (Step::Environment, fields(&[("climate_type", "URBAN")])),
            (Step::Sleep, fields(&[("sleep_habits", "POOR")])),
            (Step::Makeup, fields(&[("wears_makeup", "false")])),
            (Step::Goals, fields(&[("skin_goals", "ACNE")])),
        ];

        for (step, form) in cases {
            let mut state = at(step, QuizAnswers::default());
            let next = state.submit(step.index(), &form).unwrap();
            assert_eq!(next.index(), step.index() + 1, "from {step:?}");
            assert_eq!(state.current(), next);
        }
    }

    #[test]
    fn test_sensitive_skin_skips_exfoliation() {
        let mut state = at(Step::SkinType, QuizAnswers::default());
        let next = state.submit(2, &fields(&[("skin_type", "SENSITIVE")])).unwrap();
        assert_eq!(next, Step::AgeGroup);
    }

    #[test]
    fn test_sensitive_clears_exfoliation_answers() {
        let answers = QuizAnswers {
            exfoliation_frequency: Some(ExfoliationFrequency::Weekly),
            exfoliants: vec![ExfoliantType::ChemicalExfoliants],
            ..QuizAnswers::default()
        };
        let mut state = at(Step::SkinType, answers);
        state.submit(2, &fields(&[("skin_type", "SENSITIVE")])).unwrap();

        assert_eq!(state.answers().exfoliation_frequency, None);
        assert!(state.answers().exfoliants.is_empty());
    }

    #[test]
    fn test_invalid_submit_leaves_state_untouched() {
        let mut state = at(Step::AgeGroup, QuizAnswers::default());
        let before = state.clone();

        let err = state.submit(4, &fields(&[])).unwrap_err();
        let QuizError::Invalid(errors) = err else {
            panic!("expected field errors");
        };
        assert_eq!(errors.get("age_group"), Some("Please select your age group"));
        assert_eq!(state, before);

        let err = state.submit(4, &fields(&[("age_group", "CENTENARIAN")])).unwrap_err();
        assert!(matches!(err, QuizError::Invalid(_)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_stale_step_is_rejected() {
        let mut state = at(Step::Sleep, QuizAnswers::default());
        let err = state.submit(2, &fields(&[("skin_type", "OILY")])).unwrap_err();
        assert_eq!(
            err,
            QuizError::StaleStep {
                posted: 2,
                current: Step::Sleep
            }
        );
        assert_eq!(state.answers().skin_type, None);
    }

    #[test]
    fn test_makeup_frequency_required_when_wearing_makeup() {
        let mut state = at(Step::Makeup, QuizAnswers::default());
        let err = state
            .submit(7, &fields(&[("wears_makeup", "true"), ("makeup_types", "MASCARA")]))
            .unwrap_err();
        let QuizError::Invalid(errors) = err else {
            panic!("expected field errors");
        };
        assert!(errors.get("makeup_frequency").is_some());

        state
            .submit(
                7,
                &fields(&[
                    ("wears_makeup", "true"),
                    ("makeup_types", "MASCARA"),
                    ("makeup_frequency", "DAILY"),
                ]),
            )
            .unwrap();
        assert_eq!(state.answers().makeup_types, [MakeupType::Mascara]);
    }

    #[test]
    fn test_no_makeup_drops_types_and_frequency() {
        let answers = QuizAnswers {
            makeup_types: vec![MakeupType::Blush],
            makeup_frequency: Some(MakeupFrequency::Daily),
            ..QuizAnswers::default()
        };
        let mut state = at(Step::Makeup, answers);
        state
            .submit(7, &fields(&[("wears_makeup", "false"), ("makeup_types", "BLUSH")]))
            .unwrap();

        assert_eq!(state.answers().wears_makeup, Some(false));
        assert!(state.answers().makeup_types.is_empty());
        assert_eq!(state.answers().makeup_frequency, None);
    }

    #[test]
    fn test_never_exfoliating_drops_exfoliants() {
        let mut state = at(Step::Exfoliation, QuizAnswers::default());
        state
            .submit(
                3,
                &fields(&[("exfoliation_frequency", "NEVER"), ("exfoliants", "PHYSICAL_SCRUBS")]),
            )
            .unwrap();
        assert!(state.answers().exfoliants.is_empty());
    }

    #[test]
    fn test_goals_need_one_selection() {
        let mut state = at(Step::Goals, QuizAnswers::default());
        assert!(state.submit(8, &fields(&[])).is_err());
        assert_eq!(state.current(), Step::Goals);
    }

    #[test]
    fn test_back_keeps_answers_and_skips_inapplicable_steps() {
        let mut state = QuizState::default();
        state.submit(1, &fields(&[])).unwrap();
        state.submit(2, &fields(&[("skin_type", "SENSITIVE")])).unwrap();
        assert_eq!(state.current(), Step::AgeGroup);

        assert_eq!(state.back(), Step::SkinType);
        assert_eq!(state.answers().skin_type, Some(SkinType::Sensitive));
        assert_eq!(state.back(), Step::Splash);
        assert_eq!(state.back(), Step::Splash);
    }

    #[test]
    fn test_reset_clears_answers() {
        let answers = QuizAnswers {
            skin_type: Some(SkinType::Oily),
            skin_goals: vec![SkinGoal::Acne],
            ..QuizAnswers::default()
        };
        let mut state = at(Step::Summary, answers);
        state.reset();

        assert_eq!(state.current(), Step::Splash);
        assert_eq!(state.answers(), &QuizAnswers::default());
    }

    #[test]
    fn test_summary_is_terminal() {
        let mut state = at(Step::Summary, QuizAnswers::default());
        assert_eq!(state.submit(9, &fields(&[])).unwrap(), Step::Summary);
    }

    #[test]
    fn test_persisted_round_trip_shape() {
        let state = at(
            Step::Sleep,
            QuizAnswers {
                skin_type: Some(SkinType::Combination),
                ..QuizAnswers::default()
            },
        );
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["current_step"], 6);
        assert_eq!(value["answers"]["skin_type"], "COMBINATION");
        assert_eq!(QuizState::from_persisted(value), state);
    }

    #[test]
    fn test_persisted_step_out_of_range_is_clamped() {
        for step in [0, 10, 255] {
            let state = QuizState::from_persisted(json!({ "current_step": step, "answers": {} }));
            assert_eq!(state.current(), Step::Splash);
        }
    }

    #[test]
    fn test_persisted_garbage_starts_fresh() {
        let state = QuizState::from_persisted(json!({ "answers": { "skin_type": "GREASY" } }));
        assert_eq!(state, QuizState::default());
    }

    #[test]
    fn test_persisted_exfoliation_for_sensitive_moves_on() {
        let state = QuizState::from_persisted(
            json!({ "current_step": 3, "answers": { "skin_type": "SENSITIVE" } }),
        );
        assert_eq!(state.current(), Step::AgeGroup);
    }

    #[test]
    fn test_recommended_focus() {
        let sensitive = QuizAnswers {
            skin_type: Some(SkinType::Sensitive),
            skin_goals: vec![SkinGoal::Hydration, SkinGoal::AntiAging],
            ..QuizAnswers::default()
        };
        assert_eq!(
            sensitive.recommended_focus(),
            [
                Focus::BarrierCare,
                Focus::Goal(SkinGoal::AntiAging),
                Focus::Goal(SkinGoal::Hydration)
            ]
        );

        let dry = QuizAnswers {
            skin_type: Some(SkinType::Dry),
            skin_goals: vec![SkinGoal::Brightening],
            ..QuizAnswers::default()
        };
        assert_eq!(
            dry.recommended_focus(),
            [Focus::Goal(SkinGoal::Brightening), Focus::Goal(SkinGoal::Hydration)]
        );
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(Step::Splash.progress_percent(), 0);
        assert_eq!(Step::Summary.progress_percent(), 100);
    }
}
